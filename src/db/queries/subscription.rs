use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::error::StoreResult;
use crate::db::models::{Subscription, User};

/// A user row tagged with the id on the other side of the edge.
#[derive(Debug, FromRow)]
struct LinkedUser {
    link_id: Uuid,
    #[sqlx(flatten)]
    user: User,
}

pub async fn insert_subscription(
    pool: &PgPool,
    subscriber_id: Uuid,
    author_id: Uuid,
) -> StoreResult<Subscription> {
    let subscription = sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (subscriber_id, author_id)
        VALUES ($1, $2)
        RETURNING subscriber_id, author_id
        "#,
    )
    .bind(subscriber_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(subscription)
}

pub async fn delete_subscriptions(
    pool: &PgPool,
    subscriber_id: Uuid,
    author_id: Uuid,
) -> StoreResult<u64> {
    let result = sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND author_id = $2")
        .bind(subscriber_id)
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn list_authors_of_subscribers(
    pool: &PgPool,
    subscriber_ids: &[Uuid],
) -> StoreResult<Vec<(Uuid, User)>> {
    let rows = sqlx::query_as::<_, LinkedUser>(
        r#"
        SELECT s.subscriber_id AS link_id, u.id, u.name, u.balance
        FROM subscriptions s
        JOIN users u ON u.id = s.author_id
        WHERE s.subscriber_id = ANY($1)
        ORDER BY u.name, u.id
        "#,
    )
    .bind(subscriber_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| (row.link_id, row.user)).collect())
}

pub async fn list_subscribers_of_authors(
    pool: &PgPool,
    author_ids: &[Uuid],
) -> StoreResult<Vec<(Uuid, User)>> {
    let rows = sqlx::query_as::<_, LinkedUser>(
        r#"
        SELECT s.author_id AS link_id, u.id, u.name, u.balance
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.author_id = ANY($1)
        ORDER BY u.name, u.id
        "#,
    )
    .bind(author_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| (row.link_id, row.user)).collect())
}
