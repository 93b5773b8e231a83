//! Repository implementations for database operations.
//!
//! Each repository maps between the loosely typed SurrealDB rows and the
//! domain structs in `queue_core`. Record ids are the entity's ULID.

mod assignment_repo;
mod genre_repo;
mod member_repo;
mod queue_repo;
mod settings_repo;
mod submission_repo;

pub use assignment_repo::{AssignmentRepository, NewAssignment};
pub use genre_repo::GenreRepository;
pub use member_repo::MemberRepository;
pub use queue_repo::QueueRepository;
pub use settings_repo::SettingsRepository;
pub use submission_repo::{SubmissionFilter, SubmissionRepository};

use surrealdb::sql::Thing;

use crate::DbError;

/// Raw key of a record id, e.g. the ULID in `queue:01H...`.
fn record_key(id: &Option<Thing>) -> Option<String> {
    id.as_ref().map(|t| t.id.to_raw())
}

/// Parse a record id into a typed identifier.
fn parse_record_id<T, E>(
    id: &Option<Thing>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Result<T, DbError>
where
    E: std::fmt::Display,
{
    let key = record_key(id).ok_or_else(|| DbError::Serialization("record without id".into()))?;
    parse(&key).map_err(|e| DbError::Serialization(format!("bad record id '{}': {}", key, e)))
}
