use async_graphql::InputObject;

use super::scalars::UuidScalar;
use crate::db::models::{
    MemberTypeId, NewPost, NewProfile, NewUser, UpdatePost, UpdateProfile, UpdateUser,
};

#[derive(InputObject, Debug)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

#[derive(InputObject, Debug, Default)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

#[derive(InputObject, Debug)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: UuidScalar,
}

#[derive(InputObject, Debug, Default)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(InputObject, Debug)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: UuidScalar,
    pub member_type_id: MemberTypeId,
}

#[derive(InputObject, Debug, Default)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl From<CreateUserInput> for NewUser {
    fn from(dto: CreateUserInput) -> Self {
        NewUser {
            name: dto.name,
            balance: dto.balance,
        }
    }
}

impl From<ChangeUserInput> for UpdateUser {
    fn from(dto: ChangeUserInput) -> Self {
        UpdateUser {
            name: dto.name,
            balance: dto.balance,
        }
    }
}

impl From<CreatePostInput> for NewPost {
    fn from(dto: CreatePostInput) -> Self {
        NewPost {
            title: dto.title,
            content: dto.content,
            author_id: dto.author_id.into(),
        }
    }
}

impl From<ChangePostInput> for UpdatePost {
    fn from(dto: ChangePostInput) -> Self {
        UpdatePost {
            title: dto.title,
            content: dto.content,
        }
    }
}

impl From<CreateProfileInput> for NewProfile {
    fn from(dto: CreateProfileInput) -> Self {
        NewProfile {
            is_male: dto.is_male,
            year_of_birth: dto.year_of_birth,
            user_id: dto.user_id.into(),
            member_type_id: dto.member_type_id,
        }
    }
}

impl From<ChangeProfileInput> for UpdateProfile {
    fn from(dto: ChangeProfileInput) -> Self {
        UpdateProfile {
            is_male: dto.is_male,
            year_of_birth: dto.year_of_birth,
            member_type_id: dto.member_type_id,
        }
    }
}
