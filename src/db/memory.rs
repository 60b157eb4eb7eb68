//! In-process store with the same integrity rules as the Postgres migrations.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::models::{
    MemberType, MemberTypeId, NewPost, NewProfile, NewUser, Post, Profile, Subscription,
    UpdatePost, UpdateProfile, UpdateUser, User,
};
use super::store::DataStore;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    profiles: HashMap<Uuid, Profile>,
    member_types: HashMap<MemberTypeId, MemberType>,
    subscriptions: HashSet<Subscription>,
}

impl Tables {
    fn require_user(&self, id: Uuid, relation: &str) -> StoreResult<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "{relation} references missing user {id}"
            )))
        }
    }

    fn require_member_type(&self, id: MemberTypeId) -> StoreResult<()> {
        if self.member_types.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::Constraint(format!(
                "profiles.member_type_id references missing member type {id}"
            )))
        }
    }

    fn users_sorted<'a>(&self, users: impl Iterator<Item = &'a User>) -> Vec<User> {
        let mut users: Vec<User> = users.cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        users
    }
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store holding only the seeded member types.
    pub fn new() -> Self {
        let tables = Tables {
            member_types: MemberType::seed()
                .into_iter()
                .map(|member_type| (member_type.id, member_type))
                .collect(),
            ..Tables::default()
        };

        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_posts(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
    posts
}

fn sorted_profiles(mut profiles: Vec<Profile>) -> Vec<Profile> {
    profiles.sort_by_key(|profile| profile.id);
    profiles
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn migrate(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users_sorted(tables.users.values()))
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(ids.iter().filter_map(|id| tables.users.get(id).cloned()).collect())
    }

    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            balance: new.balance,
        };
        self.tables.write().await.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, update: UpdateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("User", id))?;
        update.apply(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(StoreError::not_found("User", id));
        }

        // ON DELETE CASCADE
        tables.posts.retain(|_, post| post.author_id != id);
        tables.profiles.retain(|_, profile| profile.user_id != id);
        tables
            .subscriptions
            .retain(|edge| edge.subscriber_id != id && edge.author_id != id);
        Ok(())
    }

    async fn post_by_id(&self, id: Uuid) -> StoreResult<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn posts(&self) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        Ok(sorted_posts(tables.posts.values().cloned().collect()))
    }

    async fn posts_by_authors(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        let tables = self.tables.read().await;
        let posts = tables
            .posts
            .values()
            .filter(|post| author_ids.contains(&post.author_id))
            .cloned()
            .collect();
        Ok(sorted_posts(posts))
    }

    async fn create_post(&self, new: NewPost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        tables.require_user(new.author_id, "posts.author_id")?;

        let post = Post {
            id: Uuid::new_v4(),
            title: new.title,
            content: new.content,
            author_id: new.author_id,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, update: UpdatePost) -> StoreResult<Post> {
        let mut tables = self.tables.write().await;
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Post", id))?;
        update.apply(post);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Post", id))
    }

    async fn profile_by_id(&self, id: Uuid) -> StoreResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&id).cloned())
    }

    async fn profiles(&self) -> StoreResult<Vec<Profile>> {
        let tables = self.tables.read().await;
        Ok(sorted_profiles(tables.profiles.values().cloned().collect()))
    }

    async fn profiles_by_users(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        let tables = self.tables.read().await;
        let profiles = tables
            .profiles
            .values()
            .filter(|profile| user_ids.contains(&profile.user_id))
            .cloned()
            .collect();
        Ok(sorted_profiles(profiles))
    }

    async fn profiles_by_member_types(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> StoreResult<Vec<Profile>> {
        let tables = self.tables.read().await;
        let profiles = tables
            .profiles
            .values()
            .filter(|profile| member_type_ids.contains(&profile.member_type_id))
            .cloned()
            .collect();
        Ok(sorted_profiles(profiles))
    }

    async fn create_profile(&self, new: NewProfile) -> StoreResult<Profile> {
        let mut tables = self.tables.write().await;
        tables.require_user(new.user_id, "profiles.user_id")?;
        tables.require_member_type(new.member_type_id)?;

        if tables.profiles.values().any(|p| p.user_id == new.user_id) {
            return Err(StoreError::Constraint(format!(
                "user {} already has a profile",
                new.user_id
            )));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: new.is_male,
            year_of_birth: new.year_of_birth,
            user_id: new.user_id,
            member_type_id: new.member_type_id,
        };
        tables.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, id: Uuid, update: UpdateProfile) -> StoreResult<Profile> {
        let mut tables = self.tables.write().await;
        if let Some(member_type_id) = update.member_type_id {
            tables.require_member_type(member_type_id)?;
        }

        let profile = tables
            .profiles
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Profile", id))?;
        update.apply(profile);
        Ok(profile.clone())
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<()> {
        self.tables
            .write()
            .await
            .profiles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Profile", id))
    }

    async fn member_type_by_id(&self, id: MemberTypeId) -> StoreResult<Option<MemberType>> {
        Ok(self.tables.read().await.member_types.get(&id).cloned())
    }

    async fn member_types(&self) -> StoreResult<Vec<MemberType>> {
        let tables = self.tables.read().await;
        let mut member_types: Vec<MemberType> = tables.member_types.values().cloned().collect();
        member_types.sort_by_key(|member_type| member_type.id);
        Ok(member_types)
    }

    async fn member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.member_types.get(id).cloned())
            .collect())
    }

    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> StoreResult<Subscription> {
        let mut tables = self.tables.write().await;
        tables.require_user(subscriber_id, "subscriptions.subscriber_id")?;
        tables.require_user(author_id, "subscriptions.author_id")?;

        let edge = Subscription {
            subscriber_id,
            author_id,
        };
        if !tables.subscriptions.insert(edge) {
            return Err(StoreError::Constraint(format!(
                "user {subscriber_id} is already subscribed to {author_id}"
            )));
        }
        Ok(edge)
    }

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> StoreResult<u64> {
        let removed = self.tables.write().await.subscriptions.remove(&Subscription {
            subscriber_id,
            author_id,
        });
        Ok(u64::from(removed))
    }

    async fn authors_of_subscribers(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<(Uuid, User)>> {
        let tables = self.tables.read().await;
        let mut linked = Vec::new();
        for &subscriber_id in subscriber_ids {
            let authors = tables.users_sorted(
                tables
                    .subscriptions
                    .iter()
                    .filter(|edge| edge.subscriber_id == subscriber_id)
                    .filter_map(|edge| tables.users.get(&edge.author_id)),
            );
            linked.extend(authors.into_iter().map(|author| (subscriber_id, author)));
        }
        Ok(linked)
    }

    async fn subscribers_of_authors(
        &self,
        author_ids: &[Uuid],
    ) -> StoreResult<Vec<(Uuid, User)>> {
        let tables = self.tables.read().await;
        let mut linked = Vec::new();
        for &author_id in author_ids {
            let subscribers = tables.users_sorted(
                tables
                    .subscriptions
                    .iter()
                    .filter(|edge| edge.author_id == author_id)
                    .filter_map(|edge| tables.users.get(&edge.subscriber_id)),
            );
            linked.extend(subscribers.into_iter().map(|subscriber| (author_id, subscriber)));
        }
        Ok(linked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    async fn user(store: &MemoryStore, name: &str) -> User {
        store
            .create_user(NewUser {
                name: name.to_string(),
                balance: 10.0,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn seeds_both_member_types() {
        let store = MemoryStore::new();
        let ids: Vec<MemberTypeId> = store
            .member_types()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![MemberTypeId::Basic, MemberTypeId::Business]);
    }

    #[tokio::test]
    async fn profile_user_id_is_unique() {
        let store = MemoryStore::new();
        let owner = user(&store, "owner").await;
        let new = NewProfile {
            is_male: true,
            year_of_birth: 1990,
            user_id: owner.id,
            member_type_id: MemberTypeId::Basic,
        };

        assert_ok!(store.create_profile(new.clone()).await);
        let err = assert_err!(store.create_profile(new).await);
        assert_eq!(err.code(), "CONSTRAINT_VIOLATION");
    }

    #[tokio::test]
    async fn foreign_keys_must_exist() {
        let store = MemoryStore::new();
        let err = assert_err!(
            store
                .create_post(NewPost {
                    title: "t".into(),
                    content: "c".into(),
                    author_id: Uuid::new_v4(),
                })
                .await
        );
        assert!(matches!(err, StoreError::Constraint(_)));

        let alice = user(&store, "alice").await;
        assert_err!(store.subscribe(alice.id, Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn subscription_edge_is_unique() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        assert_ok!(store.subscribe(alice.id, bob.id).await);
        assert_err!(store.subscribe(alice.id, bob.id).await);
        assert_eq!(store.unsubscribe(alice.id, bob.id).await.unwrap(), 1);
        assert_eq!(store.unsubscribe(alice.id, bob.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleting_a_user_cascades() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        store
            .create_post(NewPost {
                title: "hello".into(),
                content: "world".into(),
                author_id: alice.id,
            })
            .await
            .unwrap();
        store
            .create_profile(NewProfile {
                is_male: false,
                year_of_birth: 1985,
                user_id: alice.id,
                member_type_id: MemberTypeId::Business,
            })
            .await
            .unwrap();
        store.subscribe(bob.id, alice.id).await.unwrap();

        assert_ok!(store.delete_user(alice.id).await);
        assert!(store.posts().await.unwrap().is_empty());
        assert!(store.profiles().await.unwrap().is_empty());
        assert!(store.authors_of_subscribers(&[bob.id]).await.unwrap().is_empty());
        assert_err!(store.delete_user(alice.id).await);
    }

    #[tokio::test]
    async fn missing_ids_on_update_are_not_found() {
        let store = MemoryStore::new();
        let err = assert_err!(store.update_user(Uuid::nil(), UpdateUser::default()).await);
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
