use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{GameHighlight, GameId, MemberId, VotingControl, VotingSummary};

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub voter_id: String,
    pub voted_for_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FinalizeRequest {
    pub finalized_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OpenResponse {
    pub game_id: GameId,
    pub initialized: usize,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub game_id: GameId,
    pub votes_removed: usize,
    pub highlights_removed: usize,
}

pub async fn summary(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<VotingSummary>, ApiError> {
    let summary = state.voting.voting_summary(&GameId::from(game_id)).await?;
    Ok(Json(summary))
}

pub async fn open(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<OpenResponse>, ApiError> {
    let game_id = GameId::from(game_id);
    let initialized = state.voting.open_voting(&game_id).await?;
    Ok(Json(OpenResponse {
        game_id,
        initialized,
    }))
}

pub async fn vote(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(body): Json<VoteRequest>,
) -> Result<(StatusCode, Json<GameHighlight>), ApiError> {
    let highlight = state
        .voting
        .vote_for_member(
            &GameId::from(game_id),
            &MemberId::from(body.voter_id),
            &MemberId::from(body.voted_for_id),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(highlight)))
}

/// The body is optional; without it the finalizer is not recorded.
pub async fn finalize(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    body: Option<Json<FinalizeRequest>>,
) -> Result<Json<VotingControl>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let finalized_by = body.finalized_by.map(MemberId::from);
    let control = state
        .voting
        .finalize_voting(&GameId::from(game_id), finalized_by.as_ref())
        .await?;
    Ok(Json(control))
}

pub async fn reopen(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<VotingControl>, ApiError> {
    let control = state.voting.reopen_voting(&GameId::from(game_id)).await?;
    Ok(Json(control))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let game_id = GameId::from(game_id);
    let (votes_removed, highlights_removed) = state.voting.delete_voting(&game_id).await?;
    Ok(Json(DeleteResponse {
        game_id,
        votes_removed,
        highlights_removed,
    }))
}
