//! Queue repository for CRUD operations.

use chrono::{DateTime, NaiveDate, Utc};
use queue_core::{Queue, QueueId, QueueStatus};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::parse_record_id;
use crate::{DbError, get_db};

/// Repository for queue persistence operations.
pub struct QueueRepository;

/// Internal record type for SurrealDB reads.
#[derive(Debug, Deserialize)]
struct QueueRecord {
    #[serde(default)]
    id: Option<Thing>,
    date: NaiveDate,
    status: QueueStatus,
    total_slots: u32,
    #[serde(default)]
    filled_slots: u32,
    #[serde(default)]
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QueueRecord {
    fn into_queue(self, queue_id: QueueId) -> Queue {
        Queue {
            id: queue_id,
            date: self.date,
            status: self.status,
            total_slots: self.total_slots,
            filled_slots: self.filled_slots,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn into_queue_with_record_id(self) -> Result<Queue, DbError> {
        let queue_id = parse_record_id(&self.id, QueueId::parse)?;
        Ok(self.into_queue(queue_id))
    }
}

/// Struct for creating queues - omits datetime fields to use SurrealDB defaults.
#[derive(Debug, Clone, Serialize)]
struct QueueCreate {
    date: NaiveDate,
    status: QueueStatus,
    total_slots: u32,
    filled_slots: u32,
    notes: Option<String>,
}

impl QueueRepository {
    /// Create a new queue in the database.
    ///
    /// Fails if a queue already exists for the same date.
    pub async fn create(queue: &Queue) -> Result<Queue, DbError> {
        let db = get_db()?;
        let queue_id = queue.id.to_string();

        let create_data = QueueCreate {
            date: queue.date,
            status: queue.status,
            total_slots: queue.total_slots,
            filled_slots: queue.filled_slots,
            notes: queue.notes.clone(),
        };

        let record: Option<QueueRecord> =
            db.create(("queue", queue_id)).content(create_data).await?;

        record
            .map(|r| r.into_queue(queue.id))
            .ok_or_else(|| DbError::Query("Failed to create queue".into()))
    }

    /// Get a queue by ID.
    pub async fn get(id: QueueId) -> Result<Queue, DbError> {
        let db = get_db()?;

        let record: Option<QueueRecord> = db.select(("queue", id.to_string())).await?;

        record
            .map(|r| r.into_queue(id))
            .ok_or_else(|| DbError::NotFound(format!("Queue not found: {}", id)))
    }

    /// Get the queue for a given day.
    pub async fn get_by_date(date: NaiveDate) -> Result<Queue, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM queue WHERE date = $date LIMIT 1")
            .bind(("date", date.to_string()))
            .await?;

        let records: Vec<QueueRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound(format!("No queue for {}", date)))?
            .into_queue_with_record_id()
    }

    /// List all queues, newest date first.
    pub async fn list() -> Result<Vec<Queue>, DbError> {
        let db = get_db()?;

        let mut result = db.query("SELECT * FROM queue ORDER BY date DESC").await?;
        let records: Vec<QueueRecord> = result.take(0)?;

        records
            .into_iter()
            .map(QueueRecord::into_queue_with_record_id)
            .collect()
    }

    /// List queues with the given status, newest date first.
    pub async fn list_by_status(status: QueueStatus) -> Result<Vec<Queue>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM queue WHERE status = $status ORDER BY date DESC")
            .bind(("status", status.as_str().to_string()))
            .await?;

        let records: Vec<QueueRecord> = result.take(0)?;

        records
            .into_iter()
            .map(QueueRecord::into_queue_with_record_id)
            .collect()
    }

    /// Update a queue's status.
    ///
    /// The lifecycle check happens in the caller; this only writes.
    pub async fn update_status(id: QueueId, status: QueueStatus) -> Result<Queue, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("UPDATE type::thing('queue', $id) SET status = $status, updated_at = time::now() RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("status", status))
            .await?;

        let records: Vec<QueueRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .map(|r| r.into_queue(id))
            .ok_or_else(|| DbError::NotFound(format!("Queue not found: {}", id)))
    }

    /// Recount the queue's assignments into `filled_slots`.
    pub async fn sync_filled_slots(id: QueueId) -> Result<Queue, DbError> {
        let db = get_db()?;

        let mut result = db
            .query(
                r#"
                LET $filled = (SELECT count() AS count FROM queue_assignment WHERE queue_id = $id GROUP ALL)[0].count ?? 0;
                UPDATE type::thing('queue', $id) SET filled_slots = $filled, updated_at = time::now() RETURN AFTER;
                "#,
            )
            .bind(("id", id.to_string()))
            .await?;

        let records: Vec<QueueRecord> = result.take(1)?;

        records
            .into_iter()
            .next()
            .map(|r| r.into_queue(id))
            .ok_or_else(|| DbError::NotFound(format!("Queue not found: {}", id)))
    }

    /// Update a queue's editable fields.
    pub async fn update(queue: &Queue) -> Result<Queue, DbError> {
        let db = get_db()?;

        let mut result = db
            .query(
                "UPDATE type::thing('queue', $id) SET date = $date, status = $status, total_slots = $total_slots, notes = $notes, updated_at = time::now() RETURN AFTER",
            )
            .bind(("id", queue.id.to_string()))
            .bind(("date", queue.date.to_string()))
            .bind(("status", queue.status))
            .bind(("total_slots", queue.total_slots))
            .bind(("notes", queue.notes.clone()))
            .await?;

        let records: Vec<QueueRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .map(|r| r.into_queue(queue.id))
            .ok_or_else(|| DbError::NotFound(format!("Queue not found: {}", queue.id)))
    }

    /// Delete a queue together with its assignments.
    pub async fn delete(id: QueueId) -> Result<(), DbError> {
        let db = get_db()?;

        db.query("DELETE queue_assignment WHERE queue_id = $id; DELETE type::thing('queue', $id);")
            .bind(("id", id.to_string()))
            .await?
            .check()?;

        Ok(())
    }

    /// Check if a queue exists.
    pub async fn exists(id: QueueId) -> Result<bool, DbError> {
        let db = get_db()?;

        let record: Option<QueueRecord> = db.select(("queue", id.to_string())).await?;

        Ok(record.is_some())
    }
}
