//! Pagination behavior against a live (in-memory) database.

mod common;

use common::items;
use keel_api_types::PageParams;
use keel_storage::{paginate, paginate_into, paginate_map};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};

fn ordered() -> sea_orm::Select<items::Entity> {
    items::Entity::find().order_by_asc(items::Column::Id)
}

#[tokio::test]
async fn first_page_of_97_rows() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let page = paginate(&conn, ordered(), &PageParams::new(1, 20))
        .await
        .unwrap();

    assert_eq!(page.total, 97);
    assert_eq!(page.page, 1);
    assert_eq!(page.size, 20);
    let ids: Vec<i32> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<_>>());
}

#[tokio::test]
async fn last_partial_page_of_97_rows() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let page = paginate(&conn, ordered(), &PageParams::new(5, 20))
        .await
        .unwrap();

    assert_eq!(page.total, 97);
    assert_eq!(page.items.len(), 17);
    let ids: Vec<i32> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, (81..=97).collect::<Vec<_>>());
}

#[tokio::test]
async fn total_is_independent_of_page_and_size() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    for (page, size) in [(1, 20), (5, 20), (2, 7), (100, 50)] {
        let result = paginate(&conn, ordered(), &PageParams::new(page, size))
            .await
            .unwrap();
        assert_eq!(result.total, 97, "total changed for page={page} size={size}");
        assert!(result.items.len() as u64 <= size);
    }
}

#[tokio::test]
async fn identical_calls_yield_identical_pages() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 42).await;

    let params = PageParams::new(2, 10);
    let first = paginate(&conn, ordered(), &params).await.unwrap();
    let second = paginate(&conn, ordered(), &params).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn ordering_is_preserved_on_the_page_query() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let select = items::Entity::find().order_by_desc(items::Column::Id);
    let page = paginate(&conn, select, &PageParams::new(1, 5)).await.unwrap();

    let ids: Vec<i32> = page.items.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![97, 96, 95, 94, 93]);
    assert_eq!(page.total, 97);
}

#[tokio::test]
async fn page_beyond_the_end_is_empty_with_full_total() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let page = paginate(&conn, ordered(), &PageParams::new(10, 20))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 97);
}

#[tokio::test]
async fn filtered_query_counts_only_matching_rows() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let select = items::Entity::find()
        .filter(items::Column::Id.lte(10))
        .order_by_asc(items::Column::Id);
    let page = paginate(&conn, select, &PageParams::new(1, 20)).await.unwrap();

    assert_eq!(page.total, 10);
    assert_eq!(page.items.len(), 10);
}

#[derive(Debug, FromQueryResult)]
struct CategoryCount {
    category: String,
    n: i64,
}

#[tokio::test]
async fn grouped_query_counts_groups_not_rows() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    // 97 rows spread over 10 categories; a bare COUNT(*) over the grouped
    // projection would report 97.
    let select = items::Entity::find()
        .select_only()
        .column(items::Column::Category)
        .column_as(items::Column::Id.count(), "n")
        .group_by(items::Column::Category)
        .order_by_asc(items::Column::Category);

    let page = paginate_into::<_, _, CategoryCount>(&conn, select, &PageParams::new(1, 3))
        .await
        .unwrap();

    assert_eq!(page.total, 10);
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].category, "c0");
    // ids 10,20,..,90 fall in c0: 9 rows
    assert_eq!(page.items[0].n, 9);
}

#[tokio::test]
async fn rows_can_be_mapped_during_pagination() {
    let (_manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 30).await;

    let page = paginate_map(&conn, ordered(), &PageParams::new(1, 3), |m| m.name)
        .await
        .unwrap();

    assert_eq!(page.items, vec!["item-1", "item-2", "item-3"]);
    assert_eq!(page.total, 30);
}

#[tokio::test]
async fn paginating_inside_a_transaction_sees_its_own_writes() {
    let (manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let txn = manager.begin("default").await.unwrap();
    use sea_orm::Set;
    items::Entity::insert(items::ActiveModel {
        id: Set(98),
        name: Set("item-98".to_string()),
        category: Set("c8".to_string()),
    })
    .exec(&txn)
    .await
    .unwrap();

    let inside = paginate(&txn, ordered(), &PageParams::new(1, 20)).await.unwrap();
    assert_eq!(inside.total, 98);

    txn.rollback().await.unwrap();

    let after = paginate(&conn, ordered(), &PageParams::new(1, 20)).await.unwrap();
    assert_eq!(after.total, 97);
}

#[tokio::test]
async fn manager_paginate_uses_default_engine() {
    let (manager, conn) = common::setup_manager().await;
    common::seed_items(&conn, 97).await;

    let page = manager
        .paginate(ordered(), &PageParams::new(5, 20))
        .await
        .unwrap();
    assert_eq!(page.total, 97);
    assert_eq!(page.items.len(), 17);
}
