//! Queue assignments: one supporter backing one submission at one position.

use serde::{Deserialize, Serialize};

use crate::{AssignmentId, MemberId, QueueId, SubmissionId};

/// Bucket name used for a missing genre or supporter.
pub const UNKNOWN: &str = "unknown";

/// Progress of an individual assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Assigned,
    Completed,
    Skipped,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "assigned",
            AssignmentStatus::Completed => "completed",
            AssignmentStatus::Skipped => "skipped",
        }
    }
}

/// The submission side of an assignment, as resolved at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRef {
    pub id: SubmissionId,
    pub artist_name: String,
    pub track_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
}

/// The member who supports the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupporterRef {
    pub id: MemberId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueAssignment {
    pub id: AssignmentId,
    pub queue_id: QueueId,
    /// 1-based rank within the queue.
    pub position: u32,
    #[serde(default)]
    pub credits_allocated: u32,
    #[serde(default)]
    pub status: AssignmentStatus,
    #[serde(default)]
    pub submission: Option<SubmissionRef>,
    #[serde(default)]
    pub supporter: Option<SupporterRef>,
}

impl QueueAssignment {
    pub fn new(queue_id: QueueId, position: u32) -> Self {
        Self {
            id: AssignmentId::new(),
            queue_id,
            position,
            credits_allocated: 0,
            status: AssignmentStatus::Assigned,
            submission: None,
            supporter: None,
        }
    }

    pub fn with_submission(mut self, submission: SubmissionRef) -> Self {
        self.submission = Some(submission);
        self
    }

    pub fn with_supporter(mut self, supporter: SupporterRef) -> Self {
        self.supporter = Some(supporter);
        self
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits_allocated = credits;
        self
    }

    /// Genre used for clustering; missing or blank families share one bucket.
    pub fn genre(&self) -> &str {
        self.submission
            .as_ref()
            .and_then(|s| s.family.as_deref())
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(UNKNOWN)
    }

    pub fn supporter_id(&self) -> Option<MemberId> {
        self.supporter.as_ref().map(|s| s.id)
    }

    pub fn supporter_name(&self) -> &str {
        self.supporter.as_ref().map_or(UNKNOWN, |s| s.name.as_str())
    }

    pub fn artist_name(&self) -> &str {
        self.submission
            .as_ref()
            .map_or(UNKNOWN, |s| s.artist_name.as_str())
    }
}
