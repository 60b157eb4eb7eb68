use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::MemberTypeId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub member_type_id: MemberTypeId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// A profile never moves to another user, so `user_id` is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl UpdateProfile {
    pub fn is_empty(&self) -> bool {
        self.is_male.is_none() && self.year_of_birth.is_none() && self.member_type_id.is_none()
    }

    pub fn apply(&self, profile: &mut Profile) {
        if let Some(is_male) = self.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = self.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
        if let Some(member_type_id) = self.member_type_id {
            profile.member_type_id = member_type_id;
        }
    }
}
