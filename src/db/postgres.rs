use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::error::StoreResult;
use super::models::{
    MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile, Subscription,
    UpdatePost, UpdateProfile, UpdateUser, User,
};
use super::queries::{member_type, post, profile, subscription, user};
use super::store::DataStore;

/// Postgres-backed store. Every call is one round trip on the shared pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        user::find_user(&self.pool, id).await
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        user::list_users(&self.pool).await
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        user::list_users_by_ids(&self.pool, ids).await
    }

    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let created = user::insert_user(&self.pool, &new).await?;
        tracing::debug!(user_id = %created.id, "user created");
        Ok(created)
    }

    async fn update_user(&self, id: Uuid, update: UpdateUser) -> StoreResult<User> {
        user::update_user(&self.pool, id, &update).await
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        user::delete_user(&self.pool, id).await?;
        tracing::debug!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn post_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        post::find_post(&self.pool, id).await
    }

    async fn posts(&self) -> StoreResult<Vec<Post>> {
        post::list_posts(&self.pool).await
    }

    async fn posts_by_authors(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        post::list_posts_by_authors(&self.pool, author_ids).await
    }

    async fn create_post(&self, new: NewPost) -> StoreResult<Post> {
        let created = post::insert_post(&self.pool, &new).await?;
        tracing::debug!(post_id = %created.id, author_id = %created.author_id, "post created");
        Ok(created)
    }

    async fn update_post(&self, id: Uuid, update: UpdatePost) -> StoreResult<Post> {
        post::update_post(&self.pool, id, &update).await
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<()> {
        post::delete_post(&self.pool, id).await
    }

    async fn profile_by_id(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        profile::find_profile(&self.pool, id).await
    }

    async fn profiles(&self) -> StoreResult<Vec<Profile>> {
        profile::list_profiles(&self.pool).await
    }

    async fn profiles_by_users(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        profile::list_profiles_by_users(&self.pool, user_ids).await
    }

    async fn profiles_by_member_types(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> StoreResult<Vec<Profile>> {
        profile::list_profiles_by_member_types(&self.pool, member_type_ids).await
    }

    async fn create_profile(&self, new: NewProfile) -> StoreResult<Profile> {
        let created = profile::insert_profile(&self.pool, &new).await?;
        tracing::debug!(profile_id = %created.id, user_id = %created.user_id, "profile created");
        Ok(created)
    }

    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> StoreResult<Profile> {
        profile::update_profile(&self.pool, id, &update).await
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<()> {
        profile::delete_profile(&self.pool, id).await
    }

    async fn member_type_by_id(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        member_type::find_member_type(&self.pool, id).await
    }

    async fn member_types(&self) -> StoreResult<Vec<MemberType>> {
        member_type::list_member_types(&self.pool).await
    }

    async fn member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>> {
        member_type::list_member_types_by_ids(&self.pool, ids).await
    }

    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> StoreResult<Subscription> {
        subscription::insert_subscription(&self.pool, subscriber_id, author_id).await
    }

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> StoreResult<u64> {
        subscription::delete_subscriptions(&self.pool, subscriber_id, author_id).await
    }

    async fn authors_of_subscribers(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<(Uuid, User)>> {
        subscription::list_authors_of_subscribers(&self.pool, subscriber_ids).await
    }

    async fn subscribers_of_authors(
        &self,
        author_ids: &[Uuid],
    ) -> StoreResult<Vec<(Uuid, User)>> {
        subscription::list_subscribers_of_authors(&self.pool, author_ids).await
    }
}
