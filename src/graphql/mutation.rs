use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::inputs::{
    ChangePostInput, ChangeProfileInput, ChangeUserInput, CreatePostInput, CreateProfileInput,
    CreateUserInput,
};
use super::scalars::UuidScalar;
use super::types::{PostGQL, ProfileGQL, UserGQL};
use crate::db::{SharedStore, StoreResult};

/// Deletes report success as a plain boolean. Every failure becomes `false`.
fn deleted(entity: &'static str, id: UuidScalar, result: StoreResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(entity, %id, error = %err, "delete failed");
            false
        }
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<PostGQL> {
        let store = ctx.data::<SharedStore>()?;
        let post = store.create_post(dto.into()).await.map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: UuidScalar,
        dto: ChangePostInput,
    ) -> Result<PostGQL> {
        let store = ctx.data::<SharedStore>()?;
        let post = store
            .update_post(id.0, dto.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(post.into())
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;
        Ok(deleted("Post", id, store.delete_post(id.0).await))
    }

    async fn create_profile(
        &self,
        ctx: &Context<'_>,
        dto: CreateProfileInput,
    ) -> Result<ProfileGQL> {
        let store = ctx.data::<SharedStore>()?;
        let profile = store
            .create_profile(dto.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(profile.into())
    }

    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: UuidScalar,
        dto: ChangeProfileInput,
    ) -> Result<ProfileGQL> {
        let store = ctx.data::<SharedStore>()?;
        let profile = store
            .update_profile(id.0, dto.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(profile.into())
    }

    async fn delete_profile(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;
        Ok(deleted("Profile", id, store.delete_profile(id.0).await))
    }

    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<UserGQL> {
        let store = ctx.data::<SharedStore>()?;
        let user = store.create_user(dto.into()).await.map_err(|e| e.extend())?;

        Ok(user.into())
    }

    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: UuidScalar,
        dto: ChangeUserInput,
    ) -> Result<UserGQL> {
        let store = ctx.data::<SharedStore>()?;
        let user = store
            .update_user(id.0, dto.into())
            .await
            .map_err(|e| e.extend())?;

        Ok(user.into())
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<bool> {
        let store = ctx.data::<SharedStore>()?;
        Ok(deleted("User", id, store.delete_user(id.0).await))
    }

    /// Adds the edge `userId -> authorId` and returns the subscriber.
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: UuidScalar,
        author_id: UuidScalar,
    ) -> Result<Option<UserGQL>> {
        let store = ctx.data::<SharedStore>()?;
        store
            .subscribe(user_id.0, author_id.0)
            .await
            .map_err(|e| e.extend())?;

        let subscriber = store.user_by_id(user_id.0).await.map_err(|e| e.extend())?;
        Ok(subscriber.map(UserGQL::from))
    }

    /// Removes the edge if present. Always resolves to `null`.
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: UuidScalar,
        author_id: UuidScalar,
    ) -> Result<Option<bool>> {
        let store = ctx.data::<SharedStore>()?;
        let removed = store
            .unsubscribe(user_id.0, author_id.0)
            .await
            .map_err(|e| e.extend())?;

        tracing::debug!(%user_id, %author_id, removed, "unsubscribed");
        Ok(None)
    }
}
