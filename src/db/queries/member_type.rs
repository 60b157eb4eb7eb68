use sqlx::PgPool;

use crate::db::error::StoreResult;
use crate::db::models::{MemberType, MemberTypeId};

pub async fn find_member_type(pool: &PgPool, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
    let member_type = sqlx::query_as::<_, MemberType>(
        "SELECT id, discount, posts_limit_per_month FROM member_types WHERE id = $1",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(member_type)
}

pub async fn list_member_types(pool: &PgPool) -> StoreResult<Vec<MemberType>> {
    let member_types = sqlx::query_as::<_, MemberType>(
        "SELECT id, discount, posts_limit_per_month FROM member_types ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(member_types)
}

pub async fn list_member_types_by_ids(
    pool: &PgPool,
    ids: &[MemberTypeId],
) -> StoreResult<Vec<MemberType>> {
    let ids: Vec<&str> = ids.iter().map(MemberTypeId::as_str).collect();

    let member_types = sqlx::query_as::<_, MemberType>(
        "SELECT id, discount, posts_limit_per_month FROM member_types WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(member_types)
}
