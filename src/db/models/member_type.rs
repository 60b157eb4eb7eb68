use async_graphql::Enum;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of membership tiers. Stored as lowercase text.
#[derive(Enum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[graphql(name = "MemberTypeId", rename_items = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    pub const ALL: [MemberTypeId; 2] = [MemberTypeId::Basic, MemberTypeId::Business];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "basic",
            MemberTypeId::Business => "business",
        }
    }
}

impl fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown member type: {0}")]
pub struct UnknownMemberType(pub String);

impl FromStr for MemberTypeId {
    type Err = UnknownMemberType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(MemberTypeId::Basic),
            "business" => Ok(MemberTypeId::Business),
            other => Err(UnknownMemberType(other.to_string())),
        }
    }
}

impl TryFrom<String> for MemberTypeId {
    type Error = UnknownMemberType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, FromRow)]
pub struct MemberType {
    #[sqlx(try_from = "String")]
    pub id: MemberTypeId,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

impl MemberType {
    /// Rows seeded by the initial migration.
    pub fn seed() -> Vec<MemberType> {
        vec![
            MemberType {
                id: MemberTypeId::Basic,
                discount: 2.3,
                posts_limit_per_month: 20,
            },
            MemberType {
                id: MemberTypeId::Business,
                discount: 7.7,
                posts_limit_per_month: 100,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_round_trips() {
        for id in MemberTypeId::ALL {
            assert_eq!(id.as_str().parse::<MemberTypeId>().unwrap(), id);
        }
        assert!("BASIC".parse::<MemberTypeId>().is_err());
        assert!(MemberTypeId::try_from("gold".to_string()).is_err());
    }
}
