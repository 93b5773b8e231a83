//! Submission repository.

use chrono::{DateTime, Utc};
use queue_core::{MemberId, Submission, SubmissionId, SubmissionStatus};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::parse_record_id;
use crate::{DbError, get_db};

pub struct SubmissionRepository;

/// Optional filters for listing submissions.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    pub member_id: Option<MemberId>,
}

impl SubmissionFilter {
    pub fn status(status: SubmissionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn member(member_id: MemberId) -> Self {
        Self {
            member_id: Some(member_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionRecord {
    #[serde(default)]
    id: Option<Thing>,
    member_id: String,
    artist_name: String,
    track_name: String,
    track_url: String,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    subgenres: Vec<String>,
    #[serde(default)]
    status: SubmissionStatus,
    submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    fn into_submission(self, id: SubmissionId) -> Result<Submission, DbError> {
        let member_id = MemberId::parse(&self.member_id).map_err(|e| {
            DbError::Serialization(format!("bad member id '{}': {}", self.member_id, e))
        })?;

        Ok(Submission {
            id,
            member_id,
            artist_name: self.artist_name,
            track_name: self.track_name,
            track_url: self.track_url,
            family: self.family,
            subgenres: self.subgenres,
            status: self.status,
            submitted_at: self.submitted_at,
        })
    }

    fn into_submission_with_record_id(self) -> Result<Submission, DbError> {
        let id = parse_record_id(&self.id, SubmissionId::parse)?;
        self.into_submission(id)
    }
}

#[derive(Debug, Serialize)]
struct SubmissionCreate {
    member_id: String,
    artist_name: String,
    track_name: String,
    track_url: String,
    family: Option<String>,
    subgenres: Vec<String>,
    status: SubmissionStatus,
}

impl SubmissionRepository {
    pub async fn create(submission: &Submission) -> Result<Submission, DbError> {
        let db = get_db()?;

        let create_data = SubmissionCreate {
            member_id: submission.member_id.to_string(),
            artist_name: submission.artist_name.clone(),
            track_name: submission.track_name.clone(),
            track_url: submission.track_url.clone(),
            family: submission.family.clone(),
            subgenres: submission.subgenres.clone(),
            status: submission.status,
        };

        let record: Option<SubmissionRecord> = db
            .create(("submission", submission.id.to_string()))
            .content(create_data)
            .await?;

        record
            .ok_or_else(|| DbError::Query("Failed to create submission".into()))?
            .into_submission(submission.id)
    }

    pub async fn get(id: SubmissionId) -> Result<Submission, DbError> {
        let db = get_db()?;

        let record: Option<SubmissionRecord> = db.select(("submission", id.to_string())).await?;

        record
            .ok_or_else(|| DbError::NotFound(format!("Submission not found: {}", id)))?
            .into_submission(id)
    }

    /// List submissions matching `filter`, oldest first.
    pub async fn list(filter: SubmissionFilter) -> Result<Vec<Submission>, DbError> {
        let db = get_db()?;

        let mut conditions = Vec::new();
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.member_id.is_some() {
            conditions.push("member_id = $member_id");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT * FROM submission{} ORDER BY submitted_at ASC",
            where_clause
        );

        let mut query = db.query(sql);
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(member_id) = filter.member_id {
            query = query.bind(("member_id", member_id.to_string()));
        }

        let mut result = query.await?;
        let records: Vec<SubmissionRecord> = result.take(0)?;

        records
            .into_iter()
            .map(SubmissionRecord::into_submission_with_record_id)
            .collect()
    }

    pub async fn update_status(
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<Submission, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("UPDATE type::thing('submission', $id) SET status = $status RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("status", status))
            .await?;

        let records: Vec<SubmissionRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| DbError::NotFound(format!("Submission not found: {}", id)))?
            .into_submission(id)
    }
}
