//! Participation ranking: attendance blended with tenure and age.

use chrono::NaiveDate;

use crate::models::{Member, ParticipationRankingStats};

use super::{percentage, round_to, GameLog};

const DAYS_PER_YEAR: f64 = 365.25;

/// Whole and fractional years between two dates, never negative.
fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    let days = (to - from).num_days().max(0);
    days as f64 / DAYS_PER_YEAR
}

/// Composite score. Each component is scaled and rounded before summing,
/// and the sum is kept to two decimals.
pub fn participation_score(participation_rate: f64, membership_years: f64, age: u32) -> f64 {
    let participation_value = (participation_rate * 1000.0).round();
    let membership_value = (membership_years * 100.0).round();
    round_to(
        (participation_value + membership_value + age as f64) / 1000.0,
        2,
    )
}

/// Rank every active member of the club by composite score. `log` must
/// hold the club's games for the period; `reference_date` is the date
/// tenure and age are measured at. Equal scores keep member order.
pub fn compute_participation_ranking(
    log: &GameLog,
    members: &[Member],
    reference_date: NaiveDate,
) -> Vec<ParticipationRankingStats> {
    let games = log.games();
    let total_games_in_period = games.len() as u32;

    let mut rows: Vec<ParticipationRankingStats> = members
        .iter()
        .filter(|m| m.is_rankable())
        .map(|member| {
            let played = games
                .iter()
                .filter(|g| log.confirmed(&g.id).contains(&member.id))
                .count() as u32;

            let games_since_registration = match member.registration_date {
                Some(registered) => games.iter().filter(|g| g.date >= registered).count() as u32,
                None => total_games_in_period,
            };

            let participation_rate = percentage(played, total_games_in_period);
            let effective_participation_rate = percentage(played, games_since_registration);

            let membership_years = member
                .registration_date
                .map(|d| years_between(d, reference_date))
                .unwrap_or(0.0);
            let age = member
                .birth_date
                .map(|d| years_between(d, reference_date).floor() as u32)
                .unwrap_or(0);

            ParticipationRankingStats {
                position: 0,
                member_id: member.id.clone(),
                name: member.name.clone(),
                games: played,
                total_games_in_period,
                games_since_registration,
                participation_rate,
                effective_participation_rate,
                membership_years,
                age,
                score: participation_score(participation_rate, membership_years, age),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i as u32 + 1;
    }
    rows
}
