//! Club members.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ClubId, MemberId};

/// Membership status. Statuses the engine does not act on collapse to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    Inactive,
    /// Technical accounts; never ranked
    System,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub club_id: ClubId,
    pub name: String,
    pub status: MemberStatus,
    pub birth_date: Option<NaiveDate>,
    pub registration_date: Option<NaiveDate>,
}

impl Member {
    pub fn new(id: MemberId, club_id: ClubId, name: impl Into<String>) -> Self {
        Self {
            id,
            club_id,
            name: name.into(),
            status: MemberStatus::Active,
            birth_date: None,
            registration_date: None,
        }
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_birth_date(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn with_registration_date(mut self, date: NaiveDate) -> Self {
        self.registration_date = Some(date);
        self
    }

    /// Only active members appear in rankings.
    pub fn is_rankable(&self) -> bool {
        self.status == MemberStatus::Active
    }
}
