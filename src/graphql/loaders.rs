//! Per-request batch loaders for relational fields.
//!
//! Each loader turns the keys collected during one execution step into a single
//! store call. They are built fresh for every request and never cache, so a read
//! after a mutation in the same document sees the mutation.

use async_graphql::dataloader::{DataLoader, Loader};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::models::{MemberType, MemberTypeId, Post, Profile, User};
use crate::db::{SharedStore, StoreError};

type LoadResult<K, V> = Result<HashMap<K, V>, Arc<StoreError>>;

fn group_by<K, V>(rows: impl IntoIterator<Item = (K, V)>) -> HashMap<K, Vec<V>>
where
    K: std::hash::Hash + Eq,
{
    let mut grouped: HashMap<K, Vec<V>> = HashMap::new();
    for (key, value) in rows {
        grouped.entry(key).or_default().push(value);
    }
    grouped
}

pub struct UserLoader(SharedStore);

impl Loader<Uuid> for UserLoader {
    type Value = User;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> LoadResult<Uuid, User> {
        let users = self.0.users_by_ids(keys).await.map_err(Arc::new)?;
        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }
}

pub struct MemberTypeLoader(SharedStore);

impl Loader<MemberTypeId> for MemberTypeLoader {
    type Value = MemberType;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[MemberTypeId]) -> LoadResult<MemberTypeId, MemberType> {
        let member_types = self.0.member_types_by_ids(keys).await.map_err(Arc::new)?;
        Ok(member_types.into_iter().map(|m| (m.id, m)).collect())
    }
}

/// Keyed by owning user id.
pub struct ProfileByUserLoader(SharedStore);

impl Loader<Uuid> for ProfileByUserLoader {
    type Value = Profile;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> LoadResult<Uuid, Profile> {
        let profiles = self.0.profiles_by_users(keys).await.map_err(Arc::new)?;
        Ok(profiles.into_iter().map(|p| (p.user_id, p)).collect())
    }
}

pub struct ProfilesByMemberTypeLoader(SharedStore);

impl Loader<MemberTypeId> for ProfilesByMemberTypeLoader {
    type Value = Vec<Profile>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[MemberTypeId]) -> LoadResult<MemberTypeId, Vec<Profile>> {
        let profiles = self.0.profiles_by_member_types(keys).await.map_err(Arc::new)?;
        Ok(group_by(profiles.into_iter().map(|p| (p.member_type_id, p))))
    }
}

/// Keyed by author id.
pub struct PostsByAuthorLoader(SharedStore);

impl Loader<Uuid> for PostsByAuthorLoader {
    type Value = Vec<Post>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> LoadResult<Uuid, Vec<Post>> {
        let posts = self.0.posts_by_authors(keys).await.map_err(Arc::new)?;
        Ok(group_by(posts.into_iter().map(|p| (p.author_id, p))))
    }
}

/// Keyed by subscriber id; yields the authors they follow.
pub struct SubscribedAuthorsLoader(SharedStore);

impl Loader<Uuid> for SubscribedAuthorsLoader {
    type Value = Vec<User>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> LoadResult<Uuid, Vec<User>> {
        let linked = self.0.authors_of_subscribers(keys).await.map_err(Arc::new)?;
        Ok(group_by(linked))
    }
}

/// Keyed by author id; yields their followers.
pub struct SubscribersLoader(SharedStore);

impl Loader<Uuid> for SubscribersLoader {
    type Value = Vec<User>;
    type Error = Arc<StoreError>;

    async fn load(&self, keys: &[Uuid]) -> LoadResult<Uuid, Vec<User>> {
        let linked = self.0.subscribers_of_authors(keys).await.map_err(Arc::new)?;
        Ok(group_by(linked))
    }
}

pub struct Loaders {
    pub users: DataLoader<UserLoader>,
    pub member_types: DataLoader<MemberTypeLoader>,
    pub profile_by_user: DataLoader<ProfileByUserLoader>,
    pub profiles_by_member_type: DataLoader<ProfilesByMemberTypeLoader>,
    pub posts_by_author: DataLoader<PostsByAuthorLoader>,
    pub subscribed_authors: DataLoader<SubscribedAuthorsLoader>,
    pub subscribers: DataLoader<SubscribersLoader>,
}

impl Loaders {
    pub fn new(store: SharedStore) -> Self {
        Self {
            users: DataLoader::new(UserLoader(store.clone()), tokio::spawn),
            member_types: DataLoader::new(MemberTypeLoader(store.clone()), tokio::spawn),
            profile_by_user: DataLoader::new(ProfileByUserLoader(store.clone()), tokio::spawn),
            profiles_by_member_type: DataLoader::new(
                ProfilesByMemberTypeLoader(store.clone()),
                tokio::spawn,
            ),
            posts_by_author: DataLoader::new(PostsByAuthorLoader(store.clone()), tokio::spawn),
            subscribed_authors: DataLoader::new(
                SubscribedAuthorsLoader(store.clone()),
                tokio::spawn,
            ),
            subscribers: DataLoader::new(SubscribersLoader(store), tokio::spawn),
        }
    }
}
