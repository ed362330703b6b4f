//! Count-aware pagination over arbitrary selects.
//!
//! The total is computed by rewriting the base select: ordering, limit and
//! offset are stripped and the remaining projection is wrapped as
//! `SELECT COUNT(*) FROM (<base>) AS subquery`. Counting over the bare
//! projection would undercount grouped queries, so the subquery wrap is
//! mandatory. The page itself is fetched from the original select with its
//! ordering intact.

use sea_orm::sea_query::{Alias, Expr, SelectStatement};
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QuerySelect, QueryTrait, Select,
};

use keel_api_types::{PagedResponse, PageParams};

/// Fetch one page of `select` plus the unpaginated total.
///
/// `db` may be a pooled connection or an open transaction, so the call can
/// compose with other operations in one transaction.
pub async fn paginate<C, E>(
    db: &C,
    select: Select<E>,
    params: &PageParams,
) -> Result<PagedResponse<E::Model>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let total = count_rows(db, select.clone().into_query()).await?;
    let items = select
        .limit(params.limit())
        .offset(params.offset())
        .all(db)
        .await?;
    Ok(PagedResponse::new(items, total, params))
}

/// Like [`paginate`], but materializes rows into a custom
/// [`FromQueryResult`] projection (e.g. a grouped aggregate row).
pub async fn paginate_into<C, E, M>(
    db: &C,
    select: Select<E>,
    params: &PageParams,
) -> Result<PagedResponse<M>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    M: FromQueryResult + Send + Sync,
{
    let total = count_rows(db, select.clone().into_query()).await?;
    let items = select
        .limit(params.limit())
        .offset(params.offset())
        .into_model::<M>()
        .all(db)
        .await?;
    Ok(PagedResponse::new(items, total, params))
}

/// Like [`paginate`], transforming every fetched row through `f`.
pub async fn paginate_map<C, E, F, U>(
    db: &C,
    select: Select<E>,
    params: &PageParams,
    f: F,
) -> Result<PagedResponse<U>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
    F: FnMut(E::Model) -> U,
{
    Ok(paginate(db, select, params).await?.map(f))
}

async fn count_rows<C>(db: &C, mut inner: SelectStatement) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
{
    inner.clear_order_by();
    inner.reset_limit();
    inner.reset_offset();

    let count_stmt = SelectStatement::new()
        .expr_as(Expr::cust("COUNT(*)"), Alias::new("num_rows"))
        .from_subquery(inner, Alias::new("subquery"))
        .to_owned();

    let backend = db.get_database_backend();
    let row = db.query_one(backend.build(&count_stmt)).await?;
    let total = match row {
        Some(row) => row.try_get::<i64>("", "num_rows")?.max(0) as u64,
        None => 0,
    };
    Ok(total)
}
