//! Shared fixtures for storage integration tests.
#![allow(dead_code)]

use keel_storage::{DbManager, EngineConfig};
use sea_orm::{ConnectionTrait, DatabaseConnection, Set};

pub mod items {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: i32,
        pub name: String,
        pub category: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// An in-memory engine registered as the default. The pool is pinned to a
/// single connection so every query sees the same in-memory database.
pub async fn setup_manager() -> (DbManager, DatabaseConnection) {
    let manager = DbManager::new();
    manager
        .setup(
            EngineConfig::new("sqlite::memory:")
                .max_connections(1)
                .min_connections(1),
        )
        .await
        .expect("setup default engine");
    let conn = manager.default_engine().expect("default engine");
    create_items_table(&conn).await;
    (manager, conn)
}

pub async fn create_items_table(conn: &DatabaseConnection) {
    keel_storage::create_table(conn, items::Entity)
        .await
        .expect("create items table");
}

/// Insert rows with ids `1..=n`, names `item-<id>` and categories
/// `c<id % 10>`.
pub async fn seed_items<C: ConnectionTrait>(conn: &C, n: i32) {
    use sea_orm::EntityTrait;

    let rows: Vec<items::ActiveModel> = (1..=n)
        .map(|id| items::ActiveModel {
            id: Set(id),
            name: Set(format!("item-{id}")),
            category: Set(format!("c{}", id % 10)),
        })
        .collect();
    items::Entity::insert_many(rows)
        .exec(conn)
        .await
        .expect("seed items");
}
