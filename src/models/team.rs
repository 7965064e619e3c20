//! Team catalog and per-game lineups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClubId, FormationId, GameId, MemberId};

/// A club-scoped team name and colour, independent of any game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfiguration {
    pub club_id: ClubId,
    pub name: String,
    pub color: String,
}

/// A lineup for one game. At most one formation per game is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamFormation {
    pub id: FormationId,
    pub game_id: GameId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TeamFormation {
    pub fn new(id: FormationId, game_id: GameId) -> Self {
        Self {
            id,
            game_id,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Assignment of a member to a team label within a formation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub formation_id: FormationId,
    pub member_id: MemberId,
    pub team: String,
}

impl TeamMember {
    pub fn new(formation_id: FormationId, member_id: MemberId, team: impl Into<String>) -> Self {
        Self {
            formation_id,
            member_id,
            team: team.into(),
        }
    }
}
