//! Derived statistics rows.

use serde::{Deserialize, Serialize};

use super::MemberId;

/// Outcome of one game from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    /// Compare a team's goals with the best opposing total.
    pub fn from_goals(own: i64, best_opponent: i64) -> Self {
        match own.cmp(&best_opponent) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Equal => MatchResult::Draw,
            std::cmp::Ordering::Less => MatchResult::Loss,
        }
    }

    /// League points awarded to the team.
    pub fn points(&self) -> u32 {
        match self {
            MatchResult::Win => 3,
            MatchResult::Draw => 1,
            MatchResult::Loss => 0,
        }
    }
}

/// Standings row for one team label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team: String,
    pub color: Option<String>,
    pub games: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_scored: i64,
    pub goals_conceded: i64,
    pub points: u32,
    /// Percentage of games won (0.0 to 100.0)
    pub win_rate: f64,
}

impl TeamStats {
    pub fn new(team: String) -> Self {
        Self {
            team,
            color: None,
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_scored: 0,
            goals_conceded: 0,
            points: 0,
            win_rate: 0.0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_scored - self.goals_conceded
    }
}

/// Individual scoring row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub position: u32,
    pub member_id: MemberId,
    pub name: String,
    pub games: u32,
    pub goals: u32,
    pub own_goals: u32,
    pub saves: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: f64,
    pub goal_average: f64,
    /// Fraction of games won (0.0 to 1.0)
    pub win_rate: f64,
}

/// Composite attendance, tenure and age ranking row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationRankingStats {
    pub position: u32,
    pub member_id: MemberId,
    pub name: String,
    pub games: u32,
    pub total_games_in_period: u32,
    pub games_since_registration: u32,
    pub participation_rate: f64,
    pub effective_participation_rate: f64,
    pub membership_years: f64,
    pub age: u32,
    pub score: f64,
}
