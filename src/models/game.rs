//! Games and their event log.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ClubId, GameId, MemberId};

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    Completed,
    Canceled,
}

/// A scheduled or played game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub club_id: ClubId,
    pub date: NaiveDate,
    pub status: GameStatus,
}

impl Game {
    pub fn new(id: GameId, club_id: ClubId, date: NaiveDate, status: GameStatus) -> Self {
        Self {
            id,
            club_id,
            date,
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }
}

/// Kind of entry in the game event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventType {
    Goal,
    OwnGoal,
    Save,
}

impl std::fmt::Display for GameEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEventType::Goal => write!(f, "goal"),
            GameEventType::OwnGoal => write!(f, "own_goal"),
            GameEventType::Save => write!(f, "save"),
        }
    }
}

/// One immutable entry of a game's event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    pub game_id: GameId,
    pub member_id: MemberId,
    /// Team label the event was recorded under
    pub team: String,
    pub event_type: GameEventType,
    pub timestamp: DateTime<Utc>,
}

impl GameEvent {
    pub fn new(
        game_id: GameId,
        member_id: MemberId,
        team: impl Into<String>,
        event_type: GameEventType,
    ) -> Self {
        Self {
            game_id,
            member_id,
            team: team.into(),
            event_type,
            timestamp: Utc::now(),
        }
    }
}

/// Attendance answer of a member for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Confirmed,
    Declined,
    Unconfirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameParticipant {
    pub game_id: GameId,
    pub member_id: MemberId,
    pub status: ParticipantStatus,
}

impl GameParticipant {
    pub fn new(game_id: GameId, member_id: MemberId, status: ParticipantStatus) -> Self {
        Self {
            game_id,
            member_id,
            status,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ParticipantStatus::Confirmed
    }
}
