use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::error::{StoreError, StoreResult};
use crate::db::models::{NewPost, Post, UpdatePost};

const POST_COLUMNS: &str = "id, title, content, author_id";

pub async fn find_post(pool: &PgPool, id: Uuid) -> StoreResult<Option<Post>> {
    let post = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, author_id FROM posts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

pub async fn list_posts(pool: &PgPool) -> StoreResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        "SELECT id, title, content, author_id FROM posts ORDER BY title, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn list_posts_by_authors(pool: &PgPool, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, content, author_id
        FROM posts
        WHERE author_id = ANY($1)
        ORDER BY title, id
        "#,
    )
    .bind(author_ids)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

pub async fn insert_post(pool: &PgPool, new: &NewPost) -> StoreResult<Post> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, title, content, author_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, content, author_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.title)
    .bind(&new.content)
    .bind(new.author_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

pub async fn update_post(pool: &PgPool, id: Uuid, update: &UpdatePost) -> StoreResult<Post> {
    if update.is_empty() {
        return find_post(pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Post", id));
    }

    let mut query_builder = build_post_update(id, update);

    query_builder
        .build_query_as::<Post>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::not_found("Post", id))
}

fn build_post_update(id: Uuid, update: &UpdatePost) -> QueryBuilder<'_, Postgres> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE posts SET ");
    let mut first = true;

    if let Some(title) = &update.title {
        if !first { query_builder.push(", "); }
        query_builder.push("title = ").push_bind(title);
        first = false;
    }
    if let Some(content) = &update.content {
        if !first { query_builder.push(", "); }
        query_builder.push("content = ").push_bind(content);
    }

    query_builder.push(" WHERE id = ").push_bind(id);
    query_builder.push(" RETURNING ").push(POST_COLUMNS);
    query_builder
}

pub async fn delete_post(pool: &PgPool, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("Post", id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(title: Option<&str>, content: Option<&str>) -> UpdatePost {
        UpdatePost {
            title: title.map(String::from),
            content: content.map(String::from),
        }
    }

    #[test]
    fn update_sets_only_given_fields() {
        let id = Uuid::nil();
        let returning = "RETURNING id, title, content, author_id";

        let title = update(Some("t"), None);
        assert_eq!(
            build_post_update(id, &title).sql(),
            format!("UPDATE posts SET title = $1 WHERE id = $2 {returning}")
        );

        let content = update(None, Some("c"));
        assert_eq!(
            build_post_update(id, &content).sql(),
            format!("UPDATE posts SET content = $1 WHERE id = $2 {returning}")
        );

        let both = update(Some("t"), Some("c"));
        assert_eq!(
            build_post_update(id, &both).sql(),
            format!("UPDATE posts SET title = $1, content = $2 WHERE id = $3 {returning}")
        );
    }
}
