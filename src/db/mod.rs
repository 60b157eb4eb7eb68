pub mod error;
pub mod memory;
pub mod models;
pub mod pool;
pub mod postgres;
pub mod queries;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{DataStore, SharedStore};
