use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Directed edge: `subscriber_id` follows `author_id`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow)]
pub struct Subscription {
    pub subscriber_id: Uuid,
    pub author_id: Uuid,
}
