use async_graphql::ErrorExtensions;
use thiserror::Error;

use super::models::member_type::UnknownMemberType;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("record not found")]
    RowNotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } | StoreError::RowNotFound => "NOT_FOUND",
            StoreError::Constraint(_) => "CONSTRAINT_VIOLATION",
            StoreError::InvalidData(_) => "INVALID_DATA",
            StoreError::Database(_) | StoreError::Migration(_) => "DATABASE_ERROR",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::RowNotFound,
            sqlx::Error::Database(db_err) if is_integrity_violation(db_err.code().as_deref()) => {
                StoreError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::ColumnDecode { source, .. } => StoreError::InvalidData(source.to_string()),
            other => StoreError::Database(other),
        }
    }
}

impl From<UnknownMemberType> for StoreError {
    fn from(err: UnknownMemberType) -> Self {
        StoreError::InvalidData(err.to_string())
    }
}

/// SQLSTATE class 23 covers unique, foreign key, not-null and check violations.
fn is_integrity_violation(code: Option<&str>) -> bool {
    code.is_some_and(|c| c.starts_with("23"))
}

impl ErrorExtensions for StoreError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.code());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "record not found");
    }

    #[test]
    fn class_23_is_an_integrity_violation() {
        assert!(is_integrity_violation(Some("23505")));
        assert!(is_integrity_violation(Some("23503")));
        assert!(!is_integrity_violation(Some("42P01")));
        assert!(!is_integrity_violation(None));
    }

    #[test]
    fn graphql_error_carries_code() {
        let err = StoreError::not_found("Post", "abc")
            .extend()
            .into_server_error(async_graphql::Pos::default());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["message"], "Post abc not found");
        assert_eq!(json["extensions"]["code"], "NOT_FOUND");
    }
}
