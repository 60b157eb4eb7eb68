use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::scalars::UuidScalar;
use super::types::{MemberTypeGQL, PostGQL, ProfileGQL, UserGQL};
use crate::db::models::MemberTypeId;
use crate::db::SharedStore;

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Missing ids resolve to `null` for every single-item lookup.
    async fn user(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<UserGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let user = store.user_by_id(id.0).await.map_err(|e| e.extend())?;

        Ok(user.map(UserGQL::from))
    }

    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<UserGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let users = store.users().await.map_err(|e| e.extend())?;

        Ok(users.into_iter().map(UserGQL::from).collect())
    }

    async fn post(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<PostGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let post = store.post_by_id(id.0).await.map_err(|e| e.extend())?;

        Ok(post.map(PostGQL::from))
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let posts = store.posts().await.map_err(|e| e.extend())?;

        Ok(posts.into_iter().map(PostGQL::from).collect())
    }

    async fn profile(&self, ctx: &Context<'_>, id: UuidScalar) -> Result<Option<ProfileGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let profile = store.profile_by_id(id.0).await.map_err(|e| e.extend())?;

        Ok(profile.map(ProfileGQL::from))
    }

    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<ProfileGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let profiles = store.profiles().await.map_err(|e| e.extend())?;

        Ok(profiles.into_iter().map(ProfileGQL::from).collect())
    }

    async fn member_type(
        &self,
        ctx: &Context<'_>,
        id: MemberTypeId,
    ) -> Result<Option<MemberTypeGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let member_type = store.member_type_by_id(id).await.map_err(|e| e.extend())?;

        Ok(member_type.map(MemberTypeGQL::from))
    }

    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberTypeGQL>> {
        let store = ctx.data::<SharedStore>()?;
        let member_types = store.member_types().await.map_err(|e| e.extend())?;

        Ok(member_types.into_iter().map(MemberTypeGQL::from).collect())
    }
}
