//! SurrealDB storage for the engagement queue admin.
//!
//! Repositories cover members, submissions, the genre taxonomy, queues,
//! queue assignments and settings. [`SurrealAssignmentStore`] plugs the
//! assignment table into the queue editor.
//!
//! Cargo features pick the engines compiled in: `memory` (default) for
//! `mem://`, `rocksdb` for `rocksdb://` paths.

mod connection;
mod schema;
mod store;
pub mod repositories;

pub use connection::{Database, DbConfig, DbError, get_db, init_db};
pub use schema::init_schema;
pub use store::SurrealAssignmentStore;

/// Connect and define every table and index. Safe to call repeatedly.
pub async fn init(config: DbConfig) -> Result<(), DbError> {
    init_db(config).await?;
    init_schema().await?;
    Ok(())
}
