//! Daily support queues and their approval lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::QueueId;

/// Approval state of a queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    /// Being assembled; assignments may be reordered freely.
    #[default]
    Draft,
    /// Signed off by an administrator but not yet visible to members.
    Approved,
    /// Visible to members. Assignments are retired from editing.
    Published,
}

impl QueueStatus {
    /// Parse a status from its stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "approved" => Some(Self::Approved),
            "published" => Some(Self::Published),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueStatus::Draft => "draft",
            QueueStatus::Approved => "approved",
            QueueStatus::Published => "published",
        }
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: QueueStatus) -> bool {
        matches!(
            (self, next),
            (QueueStatus::Draft, QueueStatus::Approved)
                | (QueueStatus::Approved, QueueStatus::Published)
                | (QueueStatus::Approved, QueueStatus::Draft)
        )
    }

    /// Whether assignments in a queue with this status may still be edited.
    pub fn is_editable(&self) -> bool {
        !matches!(self, QueueStatus::Published)
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected status change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot move queue from {from} to {to}")]
pub struct TransitionError {
    pub from: QueueStatus,
    pub to: QueueStatus,
}

/// A dated batch of support assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    /// The day this queue is for.
    pub date: NaiveDate,
    pub status: QueueStatus,
    /// Number of assignment slots planned for the day.
    pub total_slots: u32,
    /// Number of slots that currently hold an assignment.
    #[serde(default)]
    pub filled_slots: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Queue {
    /// Create an empty draft queue for the given day.
    pub fn new(date: NaiveDate, total_slots: u32) -> Self {
        let now = Utc::now();
        Self {
            id: QueueId::new(),
            date,
            status: QueueStatus::Draft,
            total_slots,
            filled_slots: 0,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Move to `next`, validating against the lifecycle.
    pub fn transition(&mut self, next: QueueStatus) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remaining open slots, never negative.
    pub fn open_slots(&self) -> u32 {
        self.total_slots.saturating_sub(self.filled_slots)
    }

    /// Fill ratio as a percentage, if the queue has any slots.
    pub fn fill_rate(&self) -> Option<f64> {
        if self.total_slots == 0 {
            None
        } else {
            Some(self.filled_slots as f64 / self.total_slots as f64 * 100.0)
        }
    }
}

/// Input rejected before anything reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("A queue needs at least one slot")]
    NoSlots,
    #[error("A queue can have at most {max} slots")]
    TooManySlots { max: u32 },
}

/// Upper bound on slots per queue.
pub const MAX_SLOTS: u32 = 500;

/// Unvalidated form input for a new queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQueue {
    pub date: String,
    pub total_slots: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewQueue {
    /// Validate the input and build a draft queue from it.
    pub fn validate(self) -> Result<Queue, ValidationError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;
        if self.total_slots == 0 {
            return Err(ValidationError::NoSlots);
        }
        if self.total_slots > MAX_SLOTS {
            return Err(ValidationError::TooManySlots { max: MAX_SLOTS });
        }

        let mut queue = Queue::new(date, self.total_slots);
        if let Some(notes) = self.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            queue = queue.with_notes(notes);
        }
        Ok(queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
    }

    #[test]
    fn lifecycle_allows_forward_and_unapprove() {
        let mut queue = Queue::new(day(), 10);
        queue.transition(QueueStatus::Approved).expect("draft -> approved");
        queue.transition(QueueStatus::Draft).expect("approved -> draft");
        queue.transition(QueueStatus::Approved).expect("draft -> approved");
        queue.transition(QueueStatus::Published).expect("approved -> published");
        assert!(!queue.status.is_editable());
    }

    #[test]
    fn lifecycle_rejects_skips_and_leaving_published() {
        let mut queue = Queue::new(day(), 10);
        let err = queue.transition(QueueStatus::Published).unwrap_err();
        assert_eq!(err.from, QueueStatus::Draft);
        assert_eq!(queue.status, QueueStatus::Draft);

        queue.status = QueueStatus::Published;
        assert!(queue.transition(QueueStatus::Draft).is_err());
        assert!(queue.transition(QueueStatus::Approved).is_err());
    }

    #[test]
    fn slot_arithmetic() {
        let mut queue = Queue::new(day(), 4);
        queue.filled_slots = 3;
        assert_eq!(queue.open_slots(), 1);
        assert_eq!(queue.fill_rate(), Some(75.0));

        queue.filled_slots = 6;
        assert_eq!(queue.open_slots(), 0);
        assert_eq!(Queue::new(day(), 0).fill_rate(), None);
    }

    #[test]
    fn new_queue_validation() {
        let input = |date: &str, slots| NewQueue {
            date: date.to_string(),
            total_slots: slots,
            notes: Some("  ".to_string()),
        };

        let queue = input("2026-03-14", 12).validate().expect("valid input");
        assert_eq!(queue.date, day());
        assert_eq!(queue.status, QueueStatus::Draft);
        assert_eq!(queue.notes, None);

        assert_eq!(
            input("14/03/2026", 12).validate(),
            Err(ValidationError::InvalidDate("14/03/2026".to_string()))
        );
        assert_eq!(input("2026-02-30", 12).validate().map(|_| ()), Err(ValidationError::InvalidDate("2026-02-30".to_string())));
        assert_eq!(input("2026-03-14", 0).validate(), Err(ValidationError::NoSlots));
        assert_eq!(
            input("2026-03-14", MAX_SLOTS + 1).validate(),
            Err(ValidationError::TooManySlots { max: MAX_SLOTS })
        );
    }

    #[test]
    fn status_string_forms() {
        for status in [QueueStatus::Draft, QueueStatus::Approved, QueueStatus::Published] {
            assert_eq!(QueueStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QueueStatus::parse("archived"), None);
        assert_eq!(
            serde_json::to_string(&QueueStatus::Published).unwrap(),
            "\"published\""
        );
    }
}
