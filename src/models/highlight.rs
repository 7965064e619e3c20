//! Player-of-the-match highlight records.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, GameId, HighlightId, MemberId, VoteId};

/// Per-game, per-member vote tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameHighlight {
    pub id: HighlightId,
    pub game_id: GameId,
    pub member_id: MemberId,
    pub votes_count: u32,
    pub is_winner: bool,
}

impl GameHighlight {
    /// Fresh highlight with no votes. The id is derived from (game, member).
    pub fn new(game_id: GameId, member_id: MemberId) -> Self {
        Self {
            id: EntityId::generate(&["highlight", game_id.as_str(), member_id.as_str()]),
            game_id,
            member_id,
            votes_count: 0,
            is_winner: false,
        }
    }
}

/// A single ballot. The id is derived from (game, voter), so a second
/// ballot by the same voter collides on the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameHighlightVote {
    pub id: VoteId,
    pub game_id: GameId,
    pub voter_id: MemberId,
    pub voted_for_id: MemberId,
    pub created_at: DateTime<Utc>,
}

impl GameHighlightVote {
    pub fn new(game_id: GameId, voter_id: MemberId, voted_for_id: MemberId) -> Self {
        Self {
            id: Self::key(&game_id, &voter_id),
            game_id,
            voter_id,
            voted_for_id,
            created_at: Utc::now(),
        }
    }

    pub fn key(game_id: &GameId, voter_id: &MemberId) -> VoteId {
        EntityId::generate(&["vote", game_id.as_str(), voter_id.as_str()])
    }
}

/// Per-game finalization flag. Absence of a row means voting is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingControl {
    pub game_id: GameId,
    pub is_finalized: bool,
    pub finalized_at: Option<DateTime<Utc>>,
    pub finalized_by: Option<MemberId>,
    pub winner_id: Option<MemberId>,
}

impl VotingControl {
    pub fn open(game_id: GameId) -> Self {
        Self {
            game_id,
            is_finalized: false,
            finalized_at: None,
            finalized_by: None,
            winner_id: None,
        }
    }
}

/// Pick the winning highlight: most votes, then the earliest birth date,
/// with unknown birth dates after known ones, then the lowest member id.
/// Highlights without votes never win.
pub fn select_winner<'a>(
    highlights: &'a [GameHighlight],
    birth_dates: &HashMap<MemberId, NaiveDate>,
) -> Option<&'a GameHighlight> {
    highlights
        .iter()
        .filter(|h| h.votes_count > 0)
        .min_by(|a, b| {
            b.votes_count
                .cmp(&a.votes_count)
                .then_with(|| {
                    match (birth_dates.get(&a.member_id), birth_dates.get(&b.member_id)) {
                        (Some(x), Some(y)) => x.cmp(y),
                        (Some(_), None) => Ordering::Less,
                        (None, Some(_)) => Ordering::Greater,
                        (None, None) => Ordering::Equal,
                    }
                })
                .then_with(|| a.member_id.cmp(&b.member_id))
        })
}

/// Voting state as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VotingState {
    Open,
    Finalized,
}

/// One row of the voting summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightEntry {
    pub member_id: MemberId,
    pub member_name: String,
    pub votes_count: u32,
    pub is_winner: bool,
}

/// Current highlights, ballots and finalization status of a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingSummary {
    pub game_id: GameId,
    pub state: VotingState,
    pub highlights: Vec<HighlightEntry>,
    pub total_votes: u32,
    /// Members who already cast their ballot
    pub voters: Vec<MemberId>,
    pub winner_id: Option<MemberId>,
    pub finalized_at: Option<DateTime<Utc>>,
    pub finalized_by: Option<MemberId>,
}
