//! Database schema definitions using SurrealQL.

use crate::{DbError, get_db};

/// Initialize the database schema.
///
/// This creates all necessary tables, fields, and indexes.
pub async fn init_schema() -> Result<(), DbError> {
    let db = get_db()?;

    tracing::info!("Initializing database schema...");

    db.query(MEMBER_SCHEMA).await?;
    db.query(GENRE_SCHEMA).await?;
    db.query(SUBMISSION_SCHEMA).await?;
    db.query(QUEUE_SCHEMA).await?;
    db.query(ASSIGNMENT_SCHEMA).await?;
    db.query(SETTING_SCHEMA).await?;

    tracing::info!("Database schema initialized");

    Ok(())
}

/// Member table schema.
const MEMBER_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS member SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS name ON member TYPE string;
DEFINE FIELD IF NOT EXISTS email ON member TYPE string;
DEFINE FIELD IF NOT EXISTS credits ON member TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS status ON member TYPE string DEFAULT "active";
DEFINE FIELD IF NOT EXISTS created_at ON member TYPE datetime DEFAULT time::now();

DEFINE INDEX IF NOT EXISTS member_email ON member FIELDS email UNIQUE;
"#;

/// Genre taxonomy: families and their subgenres.
const GENRE_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS genre_family SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS name ON genre_family TYPE string;
DEFINE INDEX IF NOT EXISTS genre_family_name ON genre_family FIELDS name UNIQUE;

DEFINE TABLE IF NOT EXISTS subgenre SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS family_id ON subgenre TYPE string;
DEFINE FIELD IF NOT EXISTS name ON subgenre TYPE string;
DEFINE INDEX IF NOT EXISTS subgenre_family ON subgenre FIELDS family_id;
"#;

/// Submission table schema.
const SUBMISSION_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS submission SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS member_id ON submission TYPE string;
DEFINE FIELD IF NOT EXISTS artist_name ON submission TYPE string;
DEFINE FIELD IF NOT EXISTS track_name ON submission TYPE string;
DEFINE FIELD IF NOT EXISTS track_url ON submission TYPE string;
DEFINE FIELD IF NOT EXISTS family ON submission TYPE option<string>;
DEFINE FIELD IF NOT EXISTS subgenres ON submission TYPE array<string> DEFAULT [];
DEFINE FIELD IF NOT EXISTS status ON submission TYPE string DEFAULT "pending";
DEFINE FIELD IF NOT EXISTS submitted_at ON submission TYPE datetime DEFAULT time::now();

DEFINE INDEX IF NOT EXISTS submission_member ON submission FIELDS member_id;
DEFINE INDEX IF NOT EXISTS submission_status ON submission FIELDS status;
"#;

/// Queue table schema. One queue per day.
const QUEUE_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS queue SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS date ON queue TYPE string;
DEFINE FIELD IF NOT EXISTS status ON queue TYPE string DEFAULT "draft";
DEFINE FIELD IF NOT EXISTS total_slots ON queue TYPE int;
DEFINE FIELD IF NOT EXISTS filled_slots ON queue TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS notes ON queue TYPE option<string>;
DEFINE FIELD IF NOT EXISTS created_at ON queue TYPE datetime DEFAULT time::now();
DEFINE FIELD IF NOT EXISTS updated_at ON queue TYPE datetime DEFAULT time::now();

DEFINE INDEX IF NOT EXISTS queue_date ON queue FIELDS date UNIQUE;
DEFINE INDEX IF NOT EXISTS queue_status ON queue FIELDS status;
"#;

/// Queue assignment table schema.
///
/// `(queue_id, position)` is not unique: positions are written
/// row by row and pass through duplicates while a reorder is in flight.
const ASSIGNMENT_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS queue_assignment SCHEMAFULL;

DEFINE FIELD IF NOT EXISTS queue_id ON queue_assignment TYPE string;
DEFINE FIELD IF NOT EXISTS submission_id ON queue_assignment TYPE option<string>;
DEFINE FIELD IF NOT EXISTS supporter_id ON queue_assignment TYPE option<string>;
DEFINE FIELD IF NOT EXISTS position ON queue_assignment TYPE int;
DEFINE FIELD IF NOT EXISTS credits_allocated ON queue_assignment TYPE int DEFAULT 0;
DEFINE FIELD IF NOT EXISTS status ON queue_assignment TYPE string DEFAULT "assigned";
DEFINE FIELD IF NOT EXISTS created_at ON queue_assignment TYPE datetime DEFAULT time::now();
DEFINE FIELD IF NOT EXISTS updated_at ON queue_assignment TYPE datetime DEFAULT time::now();

DEFINE INDEX IF NOT EXISTS assignment_queue ON queue_assignment FIELDS queue_id;
DEFINE INDEX IF NOT EXISTS assignment_queue_position ON queue_assignment FIELDS queue_id, position;
DEFINE INDEX IF NOT EXISTS assignment_supporter ON queue_assignment FIELDS supporter_id;
"#;

/// Key/value settings. Values are arbitrary JSON, so the table is schemaless.
const SETTING_SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS setting SCHEMALESS;
"#;
