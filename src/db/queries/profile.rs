use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::error::{StoreError, StoreResult};
use crate::db::models::{MemberTypeId, NewProfile, Profile, UpdateProfile};

const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, member_type_id";

pub async fn find_profile(pool: &PgPool, id: Uuid) -> StoreResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        "SELECT id, is_male, year_of_birth, user_id, member_type_id FROM profiles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn list_profiles(pool: &PgPool) -> StoreResult<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(
        "SELECT id, is_male, year_of_birth, user_id, member_type_id FROM profiles ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

pub async fn list_profiles_by_users(pool: &PgPool, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, is_male, year_of_birth, user_id, member_type_id
        FROM profiles
        WHERE user_id = ANY($1)
        "#,
    )
    .bind(user_ids)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

pub async fn list_profiles_by_member_types(
    pool: &PgPool,
    member_type_ids: &[MemberTypeId],
) -> StoreResult<Vec<Profile>> {
    let ids: Vec<&str> = member_type_ids.iter().map(MemberTypeId::as_str).collect();

    let profiles = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, is_male, year_of_birth, user_id, member_type_id
        FROM profiles
        WHERE member_type_id = ANY($1)
        ORDER BY id
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

pub async fn insert_profile(pool: &PgPool, new: &NewProfile) -> StoreResult<Profile> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (id, is_male, year_of_birth, user_id, member_type_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, is_male, year_of_birth, user_id, member_type_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.is_male)
    .bind(new.year_of_birth)
    .bind(new.user_id)
    .bind(new.member_type_id.as_str())
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &UpdateProfile,
) -> StoreResult<Profile> {
    if update.is_empty() {
        return find_profile(pool, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Profile", id));
    }

    let mut query_builder = build_profile_update(id, update);

    query_builder
        .build_query_as::<Profile>()
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| StoreError::not_found("Profile", id))
}

fn build_profile_update(id: Uuid, update: &UpdateProfile) -> QueryBuilder<'static, Postgres> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE profiles SET ");
    let mut first = true;

    if let Some(is_male) = update.is_male {
        if !first { query_builder.push(", "); }
        query_builder.push("is_male = ").push_bind(is_male);
        first = false;
    }
    if let Some(year_of_birth) = update.year_of_birth {
        if !first { query_builder.push(", "); }
        query_builder.push("year_of_birth = ").push_bind(year_of_birth);
        first = false;
    }
    if let Some(member_type_id) = update.member_type_id {
        if !first { query_builder.push(", "); }
        query_builder.push("member_type_id = ").push_bind(member_type_id.as_str());
    }

    query_builder.push(" WHERE id = ").push_bind(id);
    query_builder.push(" RETURNING ").push(PROFILE_COLUMNS);
    query_builder
}

pub async fn delete_profile(pool: &PgPool, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StoreError::not_found("Profile", id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sets_only_given_fields() {
        let id = Uuid::nil();
        let returning = "RETURNING id, is_male, year_of_birth, user_id, member_type_id";

        let cases = [
            (
                UpdateProfile { is_male: Some(true), ..Default::default() },
                "is_male = $1 WHERE id = $2",
            ),
            (
                UpdateProfile { year_of_birth: Some(1990), ..Default::default() },
                "year_of_birth = $1 WHERE id = $2",
            ),
            (
                UpdateProfile { member_type_id: Some(MemberTypeId::Business), ..Default::default() },
                "member_type_id = $1 WHERE id = $2",
            ),
            (
                UpdateProfile {
                    is_male: Some(false),
                    year_of_birth: None,
                    member_type_id: Some(MemberTypeId::Basic),
                },
                "is_male = $1, member_type_id = $2 WHERE id = $3",
            ),
            (
                UpdateProfile {
                    is_male: Some(false),
                    year_of_birth: Some(1990),
                    member_type_id: Some(MemberTypeId::Basic),
                },
                "is_male = $1, year_of_birth = $2, member_type_id = $3 WHERE id = $4",
            ),
        ];

        for (update, expected) in cases {
            assert_eq!(
                build_profile_update(id, &update).sql(),
                format!("UPDATE profiles SET {expected} {returning}")
            );
        }
    }
}
