//! Engine registry lifecycle and multi-engine tests.

mod common;

use common::items;
use keel_api_types::PageParams;
use keel_storage::{DbManager, EngineConfig, SqlRepository, StorageError};
use sea_orm::{EntityTrait, QueryOrder};

fn file_url(dir: &std::path::Path, name: &str) -> String {
    format!("sqlite://{}?mode=rwc", dir.join(name).display())
}

#[tokio::test]
async fn unregistered_engine_is_an_error() {
    let manager = DbManager::new();
    let err = manager.default_engine().unwrap_err();
    assert!(matches!(err, StorageError::UnknownEngine { ref name } if name == "default"));

    let err = manager.get("replica").unwrap_err();
    assert!(err.to_string().contains("replica"));
}

#[tokio::test]
async fn duplicate_setup_keeps_the_existing_engine() {
    let (manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 5).await;

    // Second setup under the same name is skipped, not an error, and the
    // seeded data stays reachable through the registry.
    manager
        .setup(EngineConfig::new("sqlite::memory:").max_connections(1))
        .await
        .unwrap();

    let page = manager
        .paginate(
            items::Entity::find().order_by_asc(items::Column::Id),
            &PageParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn named_engines_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let manager = DbManager::new();
    manager
        .setup(EngineConfig::new(file_url(dir.path(), "primary.db")))
        .await
        .unwrap();
    manager
        .setup_named("replica", EngineConfig::new(file_url(dir.path(), "replica.db")))
        .await
        .unwrap();

    let primary = manager.default_engine().unwrap();
    common::create_items_table(&primary).await;
    common::seed_items(&primary, 3).await;

    let replica = manager.get("replica").unwrap();
    common::create_items_table(&replica).await;
    common::seed_items(&replica, 5).await;

    let primary_repo = SqlRepository::new(&manager).unwrap();
    let replica_repo = SqlRepository::named(&manager, "replica").unwrap();
    assert_eq!(primary_repo.engine_name(), "default");
    assert_eq!(replica_repo.engine_name(), "replica");

    let select = || items::Entity::find().order_by_asc(items::Column::Id);
    let primary_page = primary_repo
        .paginate(select(), &PageParams::default())
        .await
        .unwrap();
    let replica_page = replica_repo
        .paginate(select(), &PageParams::default())
        .await
        .unwrap();
    assert_eq!(primary_page.total, 3);
    assert_eq!(replica_page.total, 5);

    manager.shutdown().await.unwrap();
}

#[tokio::test]
async fn create_table_derives_schema_from_the_entity() {
    let manager = DbManager::new();
    manager
        .setup(
            EngineConfig::new("sqlite::memory:")
                .max_connections(1)
                .min_connections(1),
        )
        .await
        .unwrap();

    manager.create_table("default", items::Entity).await.unwrap();
    // Repeating the call is a no-op, not an error.
    manager.create_table("default", items::Entity).await.unwrap();
    assert!(matches!(
        manager.create_table("ghost", items::Entity).await,
        Err(StorageError::UnknownEngine { .. })
    ));

    let conn = manager.default_engine().unwrap();
    common::seed_items(&conn, 3).await;
    let rows = items::Entity::find().all(&conn).await.unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn verify_checks_the_connection() {
    let (manager, _conn) = common::setup_manager().await;
    manager.verify("default").await.unwrap();
    assert!(manager.verify("ghost").await.is_err());
}

#[tokio::test]
async fn shutdown_clears_the_registry() {
    let (manager, _conn) = common::setup_manager().await;
    manager.shutdown().await.unwrap();

    assert!(matches!(
        manager.default_engine(),
        Err(StorageError::UnknownEngine { .. })
    ));
}

#[tokio::test]
async fn repository_keeps_its_binding_after_shutdown_lookup_fails() {
    let (manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 2).await;

    let repo = SqlRepository::new(&manager).unwrap();
    manager.shutdown().await.unwrap();

    // New bindings fail once the registry is cleared.
    assert!(SqlRepository::new(&manager).is_err());
    // The old handle still points at the (now closed) pool.
    assert_eq!(repo.engine_name(), "default");
}
