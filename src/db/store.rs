//! Data access seam for the GraphQL layer.
//!
//! Resolvers only ever talk to a [`DataStore`]. `PgStore` backs it with Postgres,
//! `MemoryStore` keeps everything in process for tests and local runs.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::error::StoreResult;
use super::models::{
    MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile, Subscription,
    UpdatePost, UpdateProfile, UpdateUser, User,
};

pub type SharedStore = Arc<dyn DataStore>;

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Cheap round trip used by readiness checks
    async fn ping(&self) -> StoreResult<()>;

    /// Bring the schema up to date
    async fn migrate(&self) -> StoreResult<()>;

    // users

    async fn user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn users(&self) -> StoreResult<Vec<User>>;

    async fn users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>>;

    async fn create_user(&self, new: NewUser) -> StoreResult<User>;

    /// Fails with `NotFound` when no user has `id`
    async fn update_user(&self, id: Uuid, update: UpdateUser) -> StoreResult<User>;

    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;

    // posts

    async fn post_by_id(&self, id: Uuid) -> StoreResult<Option<Post>>;

    async fn posts(&self) -> StoreResult<Vec<Post>>;

    async fn posts_by_authors(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>>;

    async fn create_post(&self, new: NewPost) -> StoreResult<Post>;

    async fn update_post(&self, id: Uuid, update: UpdatePost) -> StoreResult<Post>;

    async fn delete_post(&self, id: Uuid) -> StoreResult<()>;

    // profiles

    async fn profile_by_id(&self, id: Uuid) -> StoreResult<Option<Profile>>;

    async fn profiles(&self) -> StoreResult<Vec<Profile>>;

    async fn profiles_by_users(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>>;

    async fn profiles_by_member_types(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> StoreResult<Vec<Profile>>;

    async fn create_profile(&self, new: NewProfile) -> StoreResult<Profile>;

    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> StoreResult<Profile>;

    async fn delete_profile(&self, id: Uuid) -> StoreResult<()>;

    // member types

    async fn member_type_by_id(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>>;

    async fn member_types(&self) -> StoreResult<Vec<MemberType>>;

    async fn member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>>;

    // subscriptions

    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> StoreResult<Subscription>;

    /// Returns how many edges were removed
    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> StoreResult<u64>;

    /// Authors followed by each of `subscriber_ids`, paired with the subscriber
    async fn authors_of_subscribers(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<(Uuid, User)>>;

    /// Followers of each of `author_ids`, paired with the author
    async fn subscribers_of_authors(&self, author_ids: &[Uuid])
        -> StoreResult<Vec<(Uuid, User)>>;
}
