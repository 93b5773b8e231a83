//! Members, submissions and the genre taxonomy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{GenreId, MemberId, SubmissionId};

/// Account standing of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Suspended,
}

/// An artist taking part in the engagement group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    /// Ledger balance of earned minus spent support credits.
    #[serde(default)]
    pub credits: i64,
    #[serde(default)]
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: email.into(),
            credits: 0,
            status: MemberStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn with_credits(mut self, credits: i64) -> Self {
        self.credits = credits;
        self
    }

    /// First word of the display name, used for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Review state of a submitted track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    /// Placed into at least one queue.
    Queued,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Queued => "queued",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "queued" => Some(Self::Queued),
            _ => None,
        }
    }
}

/// A track submitted by a member for support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub member_id: MemberId,
    pub artist_name: String,
    pub track_name: String,
    pub track_url: String,
    /// Top-level genre family, if classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subgenres: Vec<String>,
    #[serde(default)]
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(
        member_id: MemberId,
        artist_name: impl Into<String>,
        track_name: impl Into<String>,
        track_url: impl Into<String>,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            member_id,
            artist_name: artist_name.into(),
            track_name: track_name.into(),
            track_url: track_url.into(),
            family: None,
            subgenres: Vec::new(),
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_subgenres(mut self, subgenres: Vec<String>) -> Self {
        self.subgenres = subgenres;
        self
    }
}

/// Top-level genre classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFamily {
    pub id: GenreId,
    pub name: String,
}

impl GenreFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GenreId::new(),
            name: name.into(),
        }
    }
}

/// A subgenre belonging to exactly one family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgenre {
    pub id: GenreId,
    pub family_id: GenreId,
    pub name: String,
}

impl Subgenre {
    pub fn new(family_id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id: GenreId::new(),
            family_id,
            name: name.into(),
        }
    }
}
