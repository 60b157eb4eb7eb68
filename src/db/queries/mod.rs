//! Postgres queries, one module per table. `PgStore` is the only caller.

pub mod member_type;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;
