//! Individual scoring table.
//!
//! points = games + goals - own_goals + 3 * wins + draws + 0.20 * saves

use std::collections::HashMap;

use tracing::debug;

use crate::models::{GameEventType, MatchResult, Member, MemberId, PlayerStats};

use super::{calculate_win_rate, GameLog, GameScore};

pub const POINTS_PER_GAME: f64 = 1.0;
pub const POINTS_PER_GOAL: f64 = 1.0;
pub const POINTS_PER_OWN_GOAL: f64 = -1.0;
pub const POINTS_PER_WIN: f64 = 3.0;
pub const POINTS_PER_DRAW: f64 = 1.0;
pub const POINTS_PER_SAVE: f64 = 0.20;

#[derive(Debug, Default)]
struct Tally {
    games: u32,
    goals: u32,
    own_goals: u32,
    saves: u32,
    wins: u32,
    draws: u32,
    losses: u32,
}

impl Tally {
    fn points(&self) -> f64 {
        self.games as f64 * POINTS_PER_GAME
            + self.goals as f64 * POINTS_PER_GOAL
            + self.own_goals as f64 * POINTS_PER_OWN_GOAL
            + self.wins as f64 * POINTS_PER_WIN
            + self.draws as f64 * POINTS_PER_DRAW
            + self.saves as f64 * POINTS_PER_SAVE
    }
}

/// Scoring table over games with at least one event, counting confirmed
/// participants who are active members.
///
/// A player's team in a game comes from that game's lineup; without one it
/// falls back to `fallback_teams` (the member's latest known assignment).
/// With neither, the game counts but no result is attributed.
pub fn compute_player_stats(
    log: &GameLog,
    members: &[Member],
    fallback_teams: &HashMap<MemberId, String>,
) -> Vec<PlayerStats> {
    let roster: HashMap<&MemberId, &Member> = members
        .iter()
        .filter(|m| m.is_rankable())
        .map(|m| (&m.id, m))
        .collect();

    let mut order: Vec<&MemberId> = Vec::new();
    let mut tallies: HashMap<&MemberId, Tally> = HashMap::new();

    for game in log.games_with_events() {
        let events = log.events(&game.id);
        let score = GameScore::from_events(events);

        for member_id in log.confirmed(&game.id) {
            let Some(member) = roster.get(member_id) else {
                continue;
            };
            let tally = tallies.entry(&member.id).or_insert_with(|| {
                order.push(&member.id);
                Tally::default()
            });
            tally.games += 1;

            for e in events.iter().filter(|e| &e.member_id == member_id) {
                match e.event_type {
                    GameEventType::Goal => tally.goals += 1,
                    GameEventType::OwnGoal => tally.own_goals += 1,
                    GameEventType::Save => tally.saves += 1,
                }
            }

            let team = log
                .lineup_team(&game.id, member_id)
                .or_else(|| fallback_teams.get(member_id).map(String::as_str));
            match team.map(|t| score.result_for(t)) {
                Some(MatchResult::Win) => tally.wins += 1,
                Some(MatchResult::Draw) => tally.draws += 1,
                Some(MatchResult::Loss) => tally.losses += 1,
                None => debug!("No team for {} in game {}", member_id, game.id),
            }
        }
    }

    let mut rows: Vec<PlayerStats> = order
        .into_iter()
        .map(|id| {
            let t = &tallies[id];
            let goal_average = if t.games > 0 {
                t.goals as f64 / t.games as f64
            } else {
                0.0
            };
            PlayerStats {
                position: 0,
                member_id: id.clone(),
                name: roster[id].name.clone(),
                games: t.games,
                goals: t.goals,
                own_goals: t.own_goals,
                saves: t.saves,
                wins: t.wins,
                draws: t.draws,
                losses: t.losses,
                points: t.points(),
                goal_average,
                win_rate: calculate_win_rate(t.wins, t.games),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .partial_cmp(&a.points)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }
    rows
}
