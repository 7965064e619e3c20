//! Team standings table.

use crate::models::{MatchResult, TeamConfiguration, TeamStats};

use super::{percentage, GameLog, GameScore};

/// Standings for every team label that appears in the log's games with
/// events, sorted by points. Teams level on points keep the order in which
/// they first appeared.
pub fn compute_team_stats(log: &GameLog, catalog: &[TeamConfiguration]) -> Vec<TeamStats> {
    let mut table: Vec<TeamStats> = Vec::new();

    for game in log.games_with_events() {
        let score = GameScore::from_events(log.events(&game.id));

        for team in score.teams() {
            let idx = match table.iter().position(|t| t.team == team.team) {
                Some(idx) => idx,
                None => {
                    table.push(TeamStats::new(team.team.clone()));
                    table.len() - 1
                }
            };
            let row = &mut table[idx];

            row.games += 1;
            row.goals_scored += team.goals;
            row.goals_conceded += score.conceded(&team.team);

            let result = score.result_for(&team.team);
            match result {
                MatchResult::Win => row.wins += 1,
                MatchResult::Draw => row.draws += 1,
                MatchResult::Loss => row.losses += 1,
            }
            row.points += result.points();
        }
    }

    for row in &mut table {
        row.win_rate = percentage(row.wins, row.games);
        row.color = catalog
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(&row.team))
            .map(|c| c.color.clone());
    }

    table.sort_by(|a, b| b.points.cmp(&a.points));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Game, GameEvent, GameEventType, GameStatus};
    use chrono::{Duration, NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    struct LogBuilder {
        games: Vec<Game>,
        events: Vec<GameEvent>,
    }

    impl LogBuilder {
        fn new() -> Self {
            Self {
                games: Vec::new(),
                events: Vec::new(),
            }
        }

        fn game(mut self, id: &str, day: u32, events: &[(&str, GameEventType)]) -> Self {
            self.games.push(Game::new(
                id.into(),
                "club".into(),
                NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                GameStatus::Completed,
            ));
            let start = Utc::now();
            for (i, (team, kind)) in events.iter().enumerate() {
                let mut e = GameEvent::new(id.into(), "m".into(), *team, *kind);
                e.timestamp = start + Duration::seconds(i as i64);
                self.events.push(e);
            }
            self
        }

        fn build(self) -> GameLog {
            GameLog::new(self.games, self.events, vec![], vec![], vec![])
        }
    }

    use GameEventType::{Goal, OwnGoal, Save};

    #[test]
    fn test_own_goal_credit_two_teams() {
        let log = LogBuilder::new()
            .game("g1", 1, &[("A", Goal), ("A", Goal), ("B", OwnGoal)])
            .build();
        let table = compute_team_stats(&log, &[]);

        assert_eq!(table.len(), 2);
        let a = &table[0];
        let b = &table[1];
        assert_eq!(a.team, "A");
        assert_eq!(a.goals_scored, 3);
        assert_eq!(a.points, 3);
        assert_eq!(a.wins, 1);
        assert_eq!(b.team, "B");
        assert_eq!(b.goals_scored, 0);
        assert_eq!(b.goals_conceded, 3);
        assert_eq!(b.points, 0);
        assert_eq!(b.losses, 1);
    }

    #[test]
    fn test_three_team_game_rounds_per_game() {
        let log = LogBuilder::new()
            .game(
                "g2",
                2,
                &[("A", OwnGoal), ("B", Goal), ("C", Save), ("A", OwnGoal)],
            )
            .build();
        let table = compute_team_stats(&log, &[]);

        let goals = |name: &str| table.iter().find(|t| t.team == name).unwrap().goals_scored;
        // B: 1 + 0.5 + 0.5 = 2, C: 0.5 + 0.5 = 1
        assert_eq!(goals("A"), 0);
        assert_eq!(goals("B"), 2);
        assert_eq!(goals("C"), 1);
        assert_eq!(table[0].team, "B");
        assert_eq!(table[0].goals_conceded, 1);
    }

    #[test]
    fn test_accumulates_across_games() {
        let log = LogBuilder::new()
            .game("g1", 1, &[("Red", Goal), ("Blue", Save)])
            .game("g2", 8, &[("Red", Goal), ("Blue", Goal)])
            .game("g3", 15, &[("Blue", Goal), ("Blue", Goal), ("Red", Goal)])
            .build();
        let table = compute_team_stats(&log, &[]);

        let red = table.iter().find(|t| t.team == "Red").unwrap();
        assert_eq!(
            (red.games, red.wins, red.draws, red.losses, red.points),
            (3, 1, 1, 1, 4)
        );
        assert_eq!((red.goals_scored, red.goals_conceded), (3, 3));
        assert!((red.win_rate - 33.3).abs() < 1e-9);

        let blue = table.iter().find(|t| t.team == "Blue").unwrap();
        assert_eq!(blue.points, 4);
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let log = LogBuilder::new()
            .game("g1", 1, &[("Yellow", Goal), ("Green", Goal)])
            .build();
        let table = compute_team_stats(&log, &[]);

        let names: Vec<&str> = table.iter().map(|t| t.team.as_str()).collect();
        assert_eq!(names, vec!["Yellow", "Green"]);
        assert!(table.iter().all(|t| t.draws == 1 && t.points == 1));
    }

    #[test]
    fn test_games_without_events_are_ignored() {
        let mut log_games = LogBuilder::new().game("g1", 1, &[("A", Goal), ("B", Save)]);
        log_games.games.push(Game::new(
            "empty".into(),
            "club".into(),
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            GameStatus::Completed,
        ));
        let table = compute_team_stats(&log_games.build(), &[]);

        assert!(table.iter().all(|t| t.games == 1));
    }

    #[test]
    fn test_team_colour_from_catalog() {
        let log = LogBuilder::new()
            .game("g1", 1, &[("red", Goal), ("White", Save)])
            .build();
        let catalog = vec![TeamConfiguration {
            club_id: "club".into(),
            name: "Red".to_string(),
            color: "#ff0000".to_string(),
        }];
        let table = compute_team_stats(&log, &catalog);

        assert_eq!(table[0].color.as_deref(), Some("#ff0000"));
        assert_eq!(table[1].color, None);
    }

    #[test]
    fn test_recomputation_is_identical() {
        let log = LogBuilder::new()
            .game("g1", 1, &[("A", Goal), ("B", OwnGoal), ("C", Goal)])
            .game("g2", 2, &[("C", Goal), ("A", Save)])
            .build();

        let first = serde_json::to_string(&compute_team_stats(&log, &[])).unwrap();
        let second = serde_json::to_string(&compute_team_stats(&log, &[])).unwrap();
        assert_eq!(first, second);
    }
}
