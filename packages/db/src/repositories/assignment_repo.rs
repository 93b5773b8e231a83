//! Queue assignment repository.

use queue_core::{
    AssignmentId, AssignmentStatus, MemberId, QueueAssignment, QueueId, SubmissionId,
    SubmissionRef, SupporterRef,
};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::parse_record_id;
use crate::{Database, DbError, get_db};

/// Repository for queue assignment rows.
pub struct AssignmentRepository;

/// Input for a new assignment row.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub queue_id: QueueId,
    pub submission_id: Option<SubmissionId>,
    pub supporter_id: Option<MemberId>,
    pub position: u32,
    pub credits_allocated: u32,
}

impl NewAssignment {
    pub fn new(queue_id: QueueId, position: u32) -> Self {
        Self {
            queue_id,
            submission_id: None,
            supporter_id: None,
            position,
            credits_allocated: 0,
        }
    }

    pub fn submission(mut self, id: SubmissionId) -> Self {
        self.submission_id = Some(id);
        self
    }

    pub fn supporter(mut self, id: MemberId) -> Self {
        self.supporter_id = Some(id);
        self
    }

    pub fn credits(mut self, credits: u32) -> Self {
        self.credits_allocated = credits;
        self
    }
}

#[derive(Debug, Deserialize)]
struct AssignmentRecord {
    #[serde(default)]
    id: Option<Thing>,
    queue_id: String,
    #[serde(default)]
    submission_id: Option<String>,
    #[serde(default)]
    supporter_id: Option<String>,
    position: u32,
    #[serde(default)]
    credits_allocated: u32,
    #[serde(default)]
    status: AssignmentStatus,
}

#[derive(Debug, Serialize)]
struct AssignmentCreate {
    queue_id: String,
    submission_id: Option<String>,
    supporter_id: Option<String>,
    position: u32,
    credits_allocated: u32,
    status: AssignmentStatus,
}

/// Just the submission columns an assignment displays.
#[derive(Debug, Deserialize)]
struct SubmissionSummary {
    artist_name: String,
    track_name: String,
    #[serde(default)]
    family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MemberSummary {
    name: String,
}

impl AssignmentRepository {
    /// Insert an assignment row and return it with its references resolved.
    pub async fn create(input: NewAssignment) -> Result<QueueAssignment, DbError> {
        let db = get_db()?;
        let id = AssignmentId::new();

        let create_data = AssignmentCreate {
            queue_id: input.queue_id.to_string(),
            submission_id: input.submission_id.map(|s| s.to_string()),
            supporter_id: input.supporter_id.map(|m| m.to_string()),
            position: input.position,
            credits_allocated: input.credits_allocated,
            status: AssignmentStatus::Assigned,
        };

        let record: Option<AssignmentRecord> = db
            .create(("queue_assignment", id.to_string()))
            .content(create_data)
            .await?;

        let record =
            record.ok_or_else(|| DbError::Query("Failed to create assignment".into()))?;
        resolve(db, id, record).await
    }

    /// Get a single assignment by ID.
    pub async fn get(id: AssignmentId) -> Result<QueueAssignment, DbError> {
        let db = get_db()?;

        let record: Option<AssignmentRecord> =
            db.select(("queue_assignment", id.to_string())).await?;

        let record =
            record.ok_or_else(|| DbError::NotFound(format!("Assignment not found: {}", id)))?;
        resolve(db, id, record).await
    }

    /// All assignments of a queue in position order.
    ///
    /// Rows sharing a position keep insertion order.
    pub async fn list_for_queue(queue_id: QueueId) -> Result<Vec<QueueAssignment>, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT * FROM queue_assignment WHERE queue_id = $queue_id ORDER BY position ASC, created_at ASC")
            .bind(("queue_id", queue_id.to_string()))
            .await?;

        let records: Vec<AssignmentRecord> = result.take(0)?;

        let mut assignments = Vec::with_capacity(records.len());
        for record in records {
            let id = parse_record_id(&record.id, AssignmentId::parse)?;
            assignments.push(resolve(db, id, record).await?);
        }
        Ok(assignments)
    }

    /// Write one row's position.
    pub async fn update_position(id: AssignmentId, position: u32) -> Result<(), DbError> {
        let db = get_db()?;

        let mut result = db
            .query("UPDATE type::thing('queue_assignment', $id) SET position = $position, updated_at = time::now() RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("position", position))
            .await?;

        let records: Vec<AssignmentRecord> = result.take(0)?;

        if records.is_empty() {
            return Err(DbError::NotFound(format!("Assignment not found: {}", id)));
        }
        Ok(())
    }

    /// Set an assignment's progress status.
    pub async fn update_status(id: AssignmentId, status: AssignmentStatus) -> Result<(), DbError> {
        let db = get_db()?;

        let mut result = db
            .query("UPDATE type::thing('queue_assignment', $id) SET status = $status, updated_at = time::now() RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("status", status))
            .await?;

        let records: Vec<AssignmentRecord> = result.take(0)?;

        if records.is_empty() {
            return Err(DbError::NotFound(format!("Assignment not found: {}", id)));
        }
        Ok(())
    }

    /// Number of assignments in a queue.
    pub async fn count_for_queue(queue_id: QueueId) -> Result<usize, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT count() AS count FROM queue_assignment WHERE queue_id = $queue_id GROUP ALL")
            .bind(("queue_id", queue_id.to_string()))
            .await?;

        #[derive(Deserialize)]
        struct CountResult {
            count: usize,
        }

        let counts: Vec<CountResult> = result.take(0)?;
        Ok(counts.first().map(|c| c.count).unwrap_or(0))
    }

    /// Remove every assignment of a queue.
    pub async fn delete_for_queue(queue_id: QueueId) -> Result<(), DbError> {
        let db = get_db()?;

        db.query("DELETE queue_assignment WHERE queue_id = $queue_id")
            .bind(("queue_id", queue_id.to_string()))
            .await?
            .check()?;

        Ok(())
    }
}

/// Turn a raw row into a domain assignment, looking up its submission and
/// supporter. Dangling references resolve to `None`.
async fn resolve(
    db: &Database,
    id: AssignmentId,
    record: AssignmentRecord,
) -> Result<QueueAssignment, DbError> {
    let queue_id = QueueId::parse(&record.queue_id)
        .map_err(|e| DbError::Serialization(format!("bad queue id '{}': {}", record.queue_id, e)))?;

    let submission = match record.submission_id.as_deref().map(SubmissionId::parse) {
        Some(Ok(submission_id)) => {
            let summary: Option<SubmissionSummary> =
                db.select(("submission", submission_id.to_string())).await?;
            if summary.is_none() {
                tracing::warn!(assignment = %id, submission = %submission_id, "Assignment references a missing submission");
            }
            summary.map(|s| SubmissionRef {
                id: submission_id,
                artist_name: s.artist_name,
                track_name: s.track_name,
                family: s.family,
            })
        }
        Some(Err(e)) => {
            tracing::warn!(assignment = %id, "Unreadable submission id: {}", e);
            None
        }
        None => None,
    };

    let supporter = match record.supporter_id.as_deref().map(MemberId::parse) {
        Some(Ok(member_id)) => {
            let summary: Option<MemberSummary> =
                db.select(("member", member_id.to_string())).await?;
            if summary.is_none() {
                tracing::warn!(assignment = %id, member = %member_id, "Assignment references a missing supporter");
            }
            summary.map(|m| SupporterRef {
                id: member_id,
                name: m.name,
            })
        }
        Some(Err(e)) => {
            tracing::warn!(assignment = %id, "Unreadable supporter id: {}", e);
            None
        }
        None => None,
    };

    Ok(QueueAssignment {
        id,
        queue_id,
        position: record.position,
        credits_allocated: record.credits_allocated,
        status: record.status,
        submission,
        supporter,
    })
}
