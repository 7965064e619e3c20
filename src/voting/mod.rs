//! Player-of-the-match voting.
//!
//! A game's voting is `Open` until finalized, and a finalized game can be
//! reopened. Deleting drops every ballot and highlight and leaves the game
//! open with nothing initialized.
//!
//! Constraints that must hold under concurrent callers (one ballot per
//! voter, no ballot after finalization, a winner elected from the tallies
//! at the moment of finalization) are enforced by the store's atomic
//! writes; the checks here only produce friendlier errors first.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::models::{
    Game, GameHighlight, GameHighlightVote, GameId, HighlightEntry, MemberId, VotingControl,
    VotingState, VotingSummary,
};
use crate::storage::{ClubStore, StorageError};

fn store_rejection(err: StorageError) -> EngineError {
    match err {
        StorageError::UniqueViolation { .. } | StorageError::Conflict(_) => {
            EngineError::Conflict(err.to_string())
        }
        StorageError::VotingClosed(_) => EngineError::State(err.to_string()),
        other => EngineError::Upstream(other),
    }
}

#[derive(Clone)]
pub struct HighlightVoting {
    store: Arc<dyn ClubStore>,
}

impl HighlightVoting {
    pub fn new(store: Arc<dyn ClubStore>) -> Self {
        Self { store }
    }

    async fn require_game(&self, game_id: &GameId) -> Result<Game> {
        self.store
            .get_game(game_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("game {}", game_id)))
    }

    async fn is_finalized(&self, game_id: &GameId) -> Result<bool> {
        Ok(self
            .store
            .voting_control(game_id)
            .await?
            .map(|c| c.is_finalized)
            .unwrap_or(false))
    }

    async fn confirmed_participants(&self, game_id: &GameId) -> Result<Vec<MemberId>> {
        let mut ids: Vec<MemberId> = Vec::new();
        for p in self
            .store
            .participants_for_games(std::slice::from_ref(game_id))
            .await?
        {
            if p.is_confirmed() && !ids.contains(&p.member_id) {
                ids.push(p.member_id);
            }
        }
        Ok(ids)
    }

    /// Ensure one highlight row per confirmed participant. Safe to repeat.
    pub async fn initialize_highlights(
        &self,
        game_id: &GameId,
        confirmed: &[MemberId],
    ) -> Result<usize> {
        let rows = confirmed
            .iter()
            .map(|m| GameHighlight::new(game_id.clone(), m.clone()))
            .collect();
        let inserted = self.store.insert_highlights(rows).await?;
        if inserted > 0 {
            info!("Initialized {} highlights for game {}", inserted, game_id);
        }
        Ok(inserted)
    }

    /// Initialize highlights from the game's confirmed participants.
    pub async fn open_voting(&self, game_id: &GameId) -> Result<usize> {
        self.require_game(game_id).await?;
        let confirmed = self.confirmed_participants(game_id).await?;
        self.initialize_highlights(game_id, &confirmed).await
    }

    /// Cast `voter_id`'s single ballot for `voted_for_id`.
    pub async fn vote_for_member(
        &self,
        game_id: &GameId,
        voter_id: &MemberId,
        voted_for_id: &MemberId,
    ) -> Result<GameHighlight> {
        self.require_game(game_id).await?;

        if self.is_finalized(game_id).await? {
            return Err(EngineError::State(format!(
                "voting for game {} is finalized",
                game_id
            )));
        }
        if voter_id == voted_for_id {
            warn!("Rejected self-vote by {} in game {}", voter_id, game_id);
            return Err(EngineError::Validation(
                "members cannot vote for themselves".to_string(),
            ));
        }

        let known = self
            .store
            .get_members(std::slice::from_ref(voter_id))
            .await?;
        if known.is_empty() {
            return Err(EngineError::NotFound(format!("member {}", voter_id)));
        }

        // Only confirmed participants may vote or receive votes.
        let confirmed = self.confirmed_participants(game_id).await?;
        for (role, member) in [("voter", voter_id), ("nominee", voted_for_id)] {
            if !confirmed.contains(member) {
                warn!(
                    "Rejected vote in game {}: {} {} is not a confirmed participant",
                    game_id, role, member
                );
                return Err(EngineError::Validation(format!(
                    "member {} is not a confirmed participant of game {}",
                    member, game_id
                )));
            }
        }

        self.initialize_highlights(game_id, &confirmed).await?;

        let vote = GameHighlightVote::new(game_id.clone(), voter_id.clone(), voted_for_id.clone());
        let highlight = self.store.insert_vote(vote).await.map_err(store_rejection)?;
        info!(
            "{} voted for {} in game {} ({} votes)",
            voter_id, voted_for_id, game_id, highlight.votes_count
        );
        Ok(highlight)
    }

    /// Close voting and elect the winner, if anyone received a vote.
    pub async fn finalize_voting(
        &self,
        game_id: &GameId,
        finalized_by: Option<&MemberId>,
    ) -> Result<VotingControl> {
        self.require_game(game_id).await?;

        if self.is_finalized(game_id).await? {
            return Err(EngineError::State(format!(
                "voting for game {} is already finalized",
                game_id
            )));
        }

        let control = self
            .store
            .finalize_voting(game_id, finalized_by)
            .await
            .map_err(store_rejection)?;

        match &control.winner_id {
            Some(winner) => info!("Finalized voting for game {}: winner {}", game_id, winner),
            None => info!("Finalized voting for game {} without votes", game_id),
        }
        Ok(control)
    }

    /// Unlock a finalized game. Ballots already cast are kept.
    pub async fn reopen_voting(&self, game_id: &GameId) -> Result<VotingControl> {
        self.require_game(game_id).await?;

        if !self.is_finalized(game_id).await? {
            return Err(EngineError::State(format!(
                "voting for game {} is not finalized",
                game_id
            )));
        }

        let control = self
            .store
            .reopen_voting(game_id)
            .await
            .map_err(store_rejection)?;
        info!("Reopened voting for game {}", game_id);
        Ok(control)
    }

    /// Drop every ballot and highlight of a game.
    pub async fn delete_voting(&self, game_id: &GameId) -> Result<(usize, usize)> {
        self.require_game(game_id).await?;

        let (votes, highlights) = self.store.delete_voting(game_id).await?;
        info!(
            "Deleted voting for game {}: {} votes, {} highlights",
            game_id, votes, highlights
        );
        Ok((votes, highlights))
    }

    /// Highlights, ballots and finalization status of a game. Opens voting
    /// (initializes highlights) if the game is not finalized.
    pub async fn voting_summary(&self, game_id: &GameId) -> Result<VotingSummary> {
        self.require_game(game_id).await?;

        let control = self.store.voting_control(game_id).await?;
        let finalized = control.as_ref().map(|c| c.is_finalized).unwrap_or(false);
        if !finalized {
            let confirmed = self.confirmed_participants(game_id).await?;
            self.initialize_highlights(game_id, &confirmed).await?;
        }

        let highlights = self.store.highlights_for_game(game_id).await?;
        let votes = self.store.votes_for_game(game_id).await?;

        let member_ids: Vec<MemberId> = highlights.iter().map(|h| h.member_id.clone()).collect();
        let names: HashMap<MemberId, String> = self
            .store
            .get_members(&member_ids)
            .await?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        let mut entries: Vec<HighlightEntry> = highlights
            .into_iter()
            .map(|h| HighlightEntry {
                member_name: names.get(&h.member_id).cloned().unwrap_or_default(),
                member_id: h.member_id,
                votes_count: h.votes_count,
                is_winner: h.is_winner,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.votes_count
                .cmp(&a.votes_count)
                .then_with(|| a.member_name.cmp(&b.member_name))
        });

        let control = control.unwrap_or_else(|| VotingControl::open(game_id.clone()));
        Ok(VotingSummary {
            game_id: game_id.clone(),
            state: if control.is_finalized {
                VotingState::Finalized
            } else {
                VotingState::Open
            },
            highlights: entries,
            total_votes: votes.len() as u32,
            voters: votes.into_iter().map(|v| v.voter_id).collect(),
            winner_id: control.winner_id,
            finalized_at: control.finalized_at,
            finalized_by: control.finalized_by,
        })
    }
}
