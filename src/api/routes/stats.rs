use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{ApiError, PeriodParams};
use crate::models::{ClubId, ParticipationRankingStats, PlayerStats, TeamStats};

#[derive(Debug, Serialize)]
pub struct TeamStatsResponse {
    pub club_id: ClubId,
    pub period: String,
    pub teams: Vec<TeamStats>,
}

#[derive(Debug, Serialize)]
pub struct PlayerStatsResponse {
    pub club_id: ClubId,
    pub period: String,
    pub players: Vec<PlayerStats>,
}

#[derive(Debug, Serialize)]
pub struct ParticipationResponse {
    pub club_id: ClubId,
    pub period: String,
    pub ranking: Vec<ParticipationRankingStats>,
}

pub async fn team_stats(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<TeamStatsResponse>, ApiError> {
    let period = params.period()?;
    let club_id = ClubId::from(club_id);
    let teams = state.analytics.team_stats(&club_id, period).await?;

    Ok(Json(TeamStatsResponse {
        club_id,
        period: period.to_string(),
        teams,
    }))
}

pub async fn player_stats(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    let period = params.period()?;
    let club_id = ClubId::from(club_id);
    let players = state.analytics.player_stats(&club_id, period).await?;

    Ok(Json(PlayerStatsResponse {
        club_id,
        period: period.to_string(),
        players,
    }))
}

pub async fn participation(
    State(state): State<AppState>,
    Path(club_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<ParticipationResponse>, ApiError> {
    let period = params.period()?;
    let club_id = ClubId::from(club_id);
    let ranking = state
        .analytics
        .participation_ranking(&club_id, period)
        .await?;

    Ok(Json(ParticipationResponse {
        club_id,
        period: period.to_string(),
        ranking,
    }))
}
