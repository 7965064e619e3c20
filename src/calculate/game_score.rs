//! Per-game goal tally.
//!
//! A `goal` counts one for its own team. An `own_goal` credits
//! `1 / (teams - 1)` to every other team in the game. Credit is summed as a
//! real number over the whole game and each team total is rounded once.

use crate::models::{GameEvent, GameEventType, MatchResult};

#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub team: String,
    pub goals: i64,
}

/// Rounded goal totals of every team that appears in a game's events,
/// in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameScore {
    teams: Vec<TeamScore>,
}

impl GameScore {
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a GameEvent>,
    {
        let events: Vec<&GameEvent> = events.into_iter().collect();

        let mut labels: Vec<&str> = Vec::new();
        for e in &events {
            if !labels.contains(&e.team.as_str()) {
                labels.push(&e.team);
            }
        }

        let mut credit = vec![0.0_f64; labels.len()];
        let others = labels.len().saturating_sub(1);

        for e in &events {
            let Some(idx) = labels.iter().position(|l| *l == e.team) else {
                continue;
            };
            match e.event_type {
                GameEventType::Goal => credit[idx] += 1.0,
                GameEventType::OwnGoal if others > 0 => {
                    let share = 1.0 / others as f64;
                    for (i, c) in credit.iter_mut().enumerate() {
                        if i != idx {
                            *c += share;
                        }
                    }
                }
                GameEventType::OwnGoal | GameEventType::Save => {}
            }
        }

        let teams = labels
            .into_iter()
            .zip(credit)
            .map(|(team, goals)| TeamScore {
                team: team.to_string(),
                goals: goals.round() as i64,
            })
            .collect();

        Self { teams }
    }

    pub fn teams(&self) -> &[TeamScore] {
        &self.teams
    }

    /// Rounded goals of a team, 0 if it does not appear in the log.
    pub fn goals_for(&self, team: &str) -> i64 {
        self.teams
            .iter()
            .find(|t| t.team == team)
            .map(|t| t.goals)
            .unwrap_or(0)
    }

    fn opponents<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a TeamScore> + 'a {
        self.teams.iter().filter(move |t| t.team != team)
    }

    /// Highest total among the other teams, 0 without opponents.
    pub fn best_opponent(&self, team: &str) -> i64 {
        self.opponents(team).map(|t| t.goals).max().unwrap_or(0)
    }

    /// Sum of the other teams' totals.
    pub fn conceded(&self, team: &str) -> i64 {
        self.opponents(team).map(|t| t.goals).sum()
    }

    pub fn result_for(&self, team: &str) -> MatchResult {
        MatchResult::from_goals(self.goals_for(team), self.best_opponent(team))
    }
}
