use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::error::{StoreError, StoreResult};
use crate::db::models::{NewUser, UpdateUser, User};

const USER_COLUMNS: &str = "id, name, balance";

pub async fn find_user(pool: &PgPool, id: Uuid) -> StoreResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, name, balance FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn list_users(pool: &PgPool) -> StoreResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT id, name, balance FROM users ORDER BY name, id")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn list_users_by_ids(pool: &PgPool, ids: &[Uuid]) -> StoreResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, balance FROM users WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn insert_user(pool: &PgPool, new: &NewUser) -> StoreResult<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, balance)
        VALUES ($1, $2, $3)
        RETURNING id, name, balance
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(new.balance)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn update_user(pool: &PgPool, id: Uuid, update: &UpdateUser) -> StoreResult<User> {
    if update.is_empty() {
        return find_user(pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("User", id));
    }

    let mut query_builder = build_user_update(id, update);

    query_builder
        .build_query_as::<User>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::not_found("User", id))
}

/// `UPDATE ... RETURNING` touching only the fields present in `update`.
/// Callers must rule out an empty update first.
fn build_user_update(id: Uuid, update: &UpdateUser) -> QueryBuilder<'_, Postgres> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE users SET ");
    let mut first = true; // Controls comma placement

    if let Some(name) = &update.name {
        if !first { query_builder.push(", "); }
        query_builder.push("name = ").push_bind(name);
        first = false;
    }
    if let Some(balance) = update.balance {
        if !first { query_builder.push(", "); }
        query_builder.push("balance = ").push_bind(balance);
    }

    query_builder.push(" WHERE id = ").push_bind(id);
    query_builder.push(" RETURNING ").push(USER_COLUMNS);
    query_builder
}

pub async fn delete_user(pool: &PgPool, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("User", id));
    }

    Ok(())
}
