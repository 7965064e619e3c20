//! Statistics calculation engine.
//!
//! Computes derived tables from a club's game event log:
//! - Team standings
//! - Player scoring table
//! - Participation ranking
//!
//! Every table is recomputed from the log on each call. The calculators are
//! pure functions over a [`GameLog`]; [`Analytics`] does the batch fetches.

mod game_log;
mod game_score;
mod participation;
mod player_stats;
mod team_stats;

pub use game_log::GameLog;
pub use game_score::{GameScore, TeamScore};
pub use participation::{compute_participation_ranking, participation_score};
pub use player_stats::compute_player_stats;
pub use team_stats::compute_team_stats;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{
    ClubId, Game, GameId, MemberId, ParticipationRankingStats, Period, PlayerStats, TeamStats,
};
use crate::storage::ClubStore;

/// Calculate win rate as a fraction of games played.
pub fn calculate_win_rate(wins: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64
    }
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole` as a percentage with one decimal, 0 for an empty whole.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round_to(part as f64 / whole as f64 * 100.0, 1)
    }
}

/// Store-backed entry point for the three tables.
#[derive(Clone)]
pub struct Analytics {
    store: Arc<dyn ClubStore>,
}

impl Analytics {
    pub fn new(store: Arc<dyn ClubStore>) -> Self {
        Self { store }
    }

    async fn completed_games(&self, club_id: &ClubId, period: Period) -> Result<Vec<Game>> {
        let games = self.store.games_for_club(club_id, period).await?;
        Ok(games.into_iter().filter(Game::is_completed).collect())
    }

    /// Team standings for a club and period.
    pub async fn team_stats(&self, club_id: &ClubId, period: Period) -> Result<Vec<TeamStats>> {
        let games = self.completed_games(club_id, period).await?;
        let ids: Vec<GameId> = games.iter().map(|g| g.id.clone()).collect();

        let events = self.store.events_for_games(&ids).await?;
        let catalog = self.store.team_configurations(club_id).await?;

        let log = GameLog::new(games, events, vec![], vec![], vec![]);
        let table = compute_team_stats(&log, &catalog);
        debug!("Team stats for {} ({}): {} teams", club_id, period, table.len());
        Ok(table)
    }

    /// Player scoring table for a club and period.
    pub async fn player_stats(
        &self,
        club_id: &ClubId,
        period: Period,
    ) -> Result<Vec<PlayerStats>> {
        let games = self.completed_games(club_id, period).await?;
        let ids: Vec<GameId> = games.iter().map(|g| g.id.clone()).collect();

        let events = self.store.events_for_games(&ids).await?;
        let participants = self.store.participants_for_games(&ids).await?;
        let formations = self.store.formations_for_games(&ids).await?;
        let formation_ids: Vec<_> = formations.iter().map(|f| f.id.clone()).collect();
        let team_members = self
            .store
            .team_members_for_formations(&formation_ids)
            .await?;
        let members = self.store.members_for_club(club_id).await?;

        let log = GameLog::new(games, events, participants, formations, team_members);

        let needs_fallback = log.members_without_lineup();
        let fallback: HashMap<MemberId, String> = if needs_fallback.is_empty() {
            HashMap::new()
        } else {
            warn!(
                "{} players in {} ({}) fall back to their latest team assignment",
                needs_fallback.len(),
                club_id,
                period
            );
            self.store
                .latest_team_assignments(&needs_fallback)
                .await?
                .into_iter()
                .map(|tm| (tm.member_id, tm.team))
                .collect()
        };

        let table = compute_player_stats(&log, &members, &fallback);
        debug!("Player stats for {} ({}): {} rows", club_id, period, table.len());
        Ok(table)
    }

    /// Participation ranking evaluated at the period's reference date.
    pub async fn participation_ranking(
        &self,
        club_id: &ClubId,
        period: Period,
    ) -> Result<Vec<ParticipationRankingStats>> {
        self.participation_ranking_at(club_id, period, Utc::now().date_naive())
            .await
    }

    /// Same as [`Analytics::participation_ranking`] with an explicit "today".
    pub async fn participation_ranking_at(
        &self,
        club_id: &ClubId,
        period: Period,
        today: NaiveDate,
    ) -> Result<Vec<ParticipationRankingStats>> {
        let games = self.completed_games(club_id, period).await?;
        let ids: Vec<GameId> = games.iter().map(|g| g.id.clone()).collect();

        let participants = self.store.participants_for_games(&ids).await?;
        let members = self.store.members_for_club(club_id).await?;

        let log = GameLog::new(games, vec![], participants, vec![], vec![]);
        let table = compute_participation_ranking(&log, &members, period.reference_date(today));
        debug!(
            "Participation ranking for {} ({}): {} rows",
            club_id,
            period,
            table.len()
        );
        Ok(table)
    }
}
