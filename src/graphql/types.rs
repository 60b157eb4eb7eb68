use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject};

use super::loaders::Loaders;
use super::scalars::UuidScalar;
use crate::db::models::{MemberType, MemberTypeId, Post, Profile, User};

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex, name = "User")]
pub struct UserGQL {
    pub id: UuidScalar,
    pub name: String,
    pub balance: f64,
}

#[ComplexObject]
impl UserGQL {
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<ProfileGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let profile = loaders
            .profile_by_user
            .load_one(self.id.0)
            .await
            .map_err(|e| e.extend())?;

        Ok(profile.map(ProfileGQL::from))
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let posts = loaders
            .posts_by_author
            .load_one(self.id.0)
            .await
            .map_err(|e| e.extend())?
            .unwrap_or_default();

        Ok(posts.into_iter().map(PostGQL::from).collect())
    }

    /// Authors this user is subscribed to
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<UserGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let authors = loaders
            .subscribed_authors
            .load_one(self.id.0)
            .await
            .map_err(|e| e.extend())?
            .unwrap_or_default();

        Ok(authors.into_iter().map(UserGQL::from).collect())
    }

    /// Users subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Vec<UserGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let subscribers = loaders
            .subscribers
            .load_one(self.id.0)
            .await
            .map_err(|e| e.extend())?
            .unwrap_or_default();

        Ok(subscribers.into_iter().map(UserGQL::from).collect())
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex, name = "Post")]
pub struct PostGQL {
    pub id: UuidScalar,
    pub title: String,
    pub content: String,
    pub author_id: UuidScalar,
}

#[ComplexObject]
impl PostGQL {
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<UserGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let author = loaders
            .users
            .load_one(self.author_id.0)
            .await
            .map_err(|e| e.extend())?;

        Ok(author.map(UserGQL::from))
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex, name = "Profile")]
pub struct ProfileGQL {
    pub id: UuidScalar,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: UuidScalar,
    pub member_type_id: MemberTypeId,
}

#[ComplexObject]
impl ProfileGQL {
    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberTypeGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let member_type = loaders
            .member_types
            .load_one(self.member_type_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(member_type.map(MemberTypeGQL::from))
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<Option<UserGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let user = loaders
            .users
            .load_one(self.user_id.0)
            .await
            .map_err(|e| e.extend())?;

        Ok(user.map(UserGQL::from))
    }
}

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex, name = "MemberType")]
pub struct MemberTypeGQL {
    pub id: MemberTypeId,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

#[ComplexObject]
impl MemberTypeGQL {
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<ProfileGQL>> {
        let loaders = ctx.data::<Loaders>()?;
        let profiles = loaders
            .profiles_by_member_type
            .load_one(self.id)
            .await
            .map_err(|e| e.extend())?
            .unwrap_or_default();

        Ok(profiles.into_iter().map(ProfileGQL::from).collect())
    }
}

impl From<User> for UserGQL {
    fn from(user: User) -> Self {
        UserGQL {
            id: user.id.into(),
            name: user.name,
            balance: user.balance,
        }
    }
}

impl From<Post> for PostGQL {
    fn from(post: Post) -> Self {
        PostGQL {
            id: post.id.into(),
            title: post.title,
            content: post.content,
            author_id: post.author_id.into(),
        }
    }
}

impl From<Profile> for ProfileGQL {
    fn from(profile: Profile) -> Self {
        ProfileGQL {
            id: profile.id.into(),
            is_male: profile.is_male,
            year_of_birth: profile.year_of_birth,
            user_id: profile.user_id.into(),
            member_type_id: profile.member_type_id,
        }
    }
}

impl From<MemberType> for MemberTypeGQL {
    fn from(member_type: MemberType) -> Self {
        MemberTypeGQL {
            id: member_type.id,
            discount: member_type.discount,
            posts_limit_per_month: member_type.posts_limit_per_month,
        }
    }
}
