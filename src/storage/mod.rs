//! Relational store boundary.
//!
//! The engine talks to the club database only through [`ClubStore`]. Every
//! read is a batch read keyed by club, period or a set of ids; there is no
//! per-game or per-member query. Write methods are atomic units: each one
//! checks its constraint and applies its change as a single transaction.
//!
//! [`JsonlStore`] is the bundled implementation, one JSON Lines file per table.

mod jsonl;
mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ClubId, FormationId, Game, GameEvent, GameHighlight, GameHighlightVote, GameId,
    GameParticipant, Member, MemberId, Period, TeamConfiguration, TeamFormation,
    TeamMember, VotingControl,
};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt row at {path}:{line}: {source}")]
    Corrupt {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("Duplicate key {key} in {table}")]
    UniqueViolation { table: &'static str, key: String },

    #[error("Write rejected: {0}")]
    Conflict(String),

    #[error("Voting for game {0} is finalized")]
    VotingClosed(GameId),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.data_dir.join("tables")
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.tables_dir().join(table.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Read and write operations the engine needs from the club database.
#[async_trait]
pub trait ClubStore: Send + Sync {
    async fn get_game(&self, game_id: &GameId) -> Result<Option<Game>, StorageError>;

    /// All games of a club whose date falls inside `period`, any status.
    async fn games_for_club(
        &self,
        club_id: &ClubId,
        period: Period,
    ) -> Result<Vec<Game>, StorageError>;

    async fn events_for_games(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, StorageError>;

    async fn participants_for_games(
        &self,
        game_ids: &[GameId],
    ) -> Result<Vec<GameParticipant>, StorageError>;

    async fn formations_for_games(
        &self,
        game_ids: &[GameId],
    ) -> Result<Vec<TeamFormation>, StorageError>;

    async fn team_members_for_formations(
        &self,
        formation_ids: &[FormationId],
    ) -> Result<Vec<TeamMember>, StorageError>;

    /// Each member's assignment from their most recently created formation.
    async fn latest_team_assignments(
        &self,
        member_ids: &[MemberId],
    ) -> Result<Vec<TeamMember>, StorageError>;

    async fn team_configurations(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<TeamConfiguration>, StorageError>;

    async fn members_for_club(&self, club_id: &ClubId) -> Result<Vec<Member>, StorageError>;

    async fn get_members(&self, member_ids: &[MemberId]) -> Result<Vec<Member>, StorageError>;

    async fn highlights_for_game(
        &self,
        game_id: &GameId,
    ) -> Result<Vec<GameHighlight>, StorageError>;

    async fn votes_for_game(&self, game_id: &GameId)
        -> Result<Vec<GameHighlightVote>, StorageError>;

    async fn voting_control(&self, game_id: &GameId)
        -> Result<Option<VotingControl>, StorageError>;

    /// Insert highlights whose id is not present yet. Returns the number inserted.
    async fn insert_highlights(&self, highlights: Vec<GameHighlight>)
        -> Result<usize, StorageError>;

    /// Insert a ballot and bump the target highlight's `votes_count`.
    /// Fails with `VotingClosed` if the game is finalized and with
    /// `UniqueViolation` if the voter already voted in this game.
    async fn insert_vote(&self, vote: GameHighlightVote) -> Result<GameHighlight, StorageError>;

    /// Elect the winner from the current tallies (see [`select_winner`]),
    /// flag it as the only winner and mark voting finalized, all in one
    /// transaction. Fails with `Conflict` if the game is already finalized.
    ///
    /// [`select_winner`]: crate::models::select_winner
    async fn finalize_voting(
        &self,
        game_id: &GameId,
        finalized_by: Option<&MemberId>,
    ) -> Result<VotingControl, StorageError>;

    /// Clear the finalized flag and every winner flag, keeping ballots.
    /// Fails with `Conflict` if the game is not finalized.
    async fn reopen_voting(&self, game_id: &GameId) -> Result<VotingControl, StorageError>;

    /// Remove every ballot, highlight and control row of a game.
    /// Returns `(votes_removed, highlights_removed)`.
    async fn delete_voting(&self, game_id: &GameId) -> Result<(usize, usize), StorageError>;
}
