//! Member repository.

use chrono::{DateTime, Utc};
use queue_core::{Member, MemberId, MemberStatus};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::parse_record_id;
use crate::{DbError, get_db};

pub struct MemberRepository;

#[derive(Debug, Deserialize)]
struct MemberRecord {
    #[serde(default)]
    id: Option<Thing>,
    name: String,
    email: String,
    #[serde(default)]
    credits: i64,
    #[serde(default)]
    status: MemberStatus,
    created_at: DateTime<Utc>,
}

impl MemberRecord {
    fn into_member(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            credits: self.credits,
            status: self.status,
            created_at: self.created_at,
        }
    }

    fn into_member_with_record_id(self) -> Result<Member, DbError> {
        let id = parse_record_id(&self.id, MemberId::parse)?;
        Ok(self.into_member(id))
    }
}

#[derive(Debug, Serialize)]
struct MemberCreate {
    name: String,
    email: String,
    credits: i64,
    status: MemberStatus,
}

impl MemberRepository {
    /// Create a member. Email addresses are unique.
    pub async fn create(member: &Member) -> Result<Member, DbError> {
        let db = get_db()?;

        let create_data = MemberCreate {
            name: member.name.clone(),
            email: member.email.clone(),
            credits: member.credits,
            status: member.status,
        };

        let record: Option<MemberRecord> = db
            .create(("member", member.id.to_string()))
            .content(create_data)
            .await?;

        record
            .map(|r| r.into_member(member.id))
            .ok_or_else(|| DbError::Query("Failed to create member".into()))
    }

    pub async fn get(id: MemberId) -> Result<Member, DbError> {
        let db = get_db()?;

        let record: Option<MemberRecord> = db.select(("member", id.to_string())).await?;

        record
            .map(|r| r.into_member(id))
            .ok_or_else(|| DbError::NotFound(format!("Member not found: {}", id)))
    }

    /// All members, alphabetical by name.
    pub async fn list() -> Result<Vec<Member>, DbError> {
        let db = get_db()?;

        let mut result = db.query("SELECT * FROM member ORDER BY name ASC").await?;
        let records: Vec<MemberRecord> = result.take(0)?;

        records
            .into_iter()
            .map(MemberRecord::into_member_with_record_id)
            .collect()
    }

    /// Add `delta` (possibly negative) to a member's credit balance.
    pub async fn adjust_credits(id: MemberId, delta: i64) -> Result<Member, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("UPDATE type::thing('member', $id) SET credits += $delta RETURN AFTER")
            .bind(("id", id.to_string()))
            .bind(("delta", delta))
            .await?;

        let records: Vec<MemberRecord> = result.take(0)?;

        records
            .into_iter()
            .next()
            .map(|r| r.into_member(id))
            .ok_or_else(|| DbError::NotFound(format!("Member not found: {}", id)))
    }

    pub async fn count() -> Result<usize, DbError> {
        let db = get_db()?;

        let mut result = db
            .query("SELECT count() AS count FROM member GROUP ALL")
            .await?;

        #[derive(Deserialize)]
        struct CountResult {
            count: usize,
        }

        let counts: Vec<CountResult> = result.take(0)?;
        Ok(counts.first().map(|c| c.count).unwrap_or(0))
    }
}
