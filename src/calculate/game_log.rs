//! Pre-indexed view over one club's event log for a period.

use std::collections::HashMap;

use crate::models::{
    Game, GameEvent, GameId, GameParticipant, MemberId, TeamFormation, TeamMember,
};

/// Completed games of a period with their events, confirmed participants
/// and active lineups, indexed by game id.
#[derive(Debug, Default)]
pub struct GameLog {
    games: Vec<Game>,
    events: HashMap<GameId, Vec<GameEvent>>,
    confirmed: HashMap<GameId, Vec<MemberId>>,
    lineups: HashMap<GameId, HashMap<MemberId, String>>,
}

impl GameLog {
    /// Build the index. Games that are not completed are dropped; games are
    /// ordered by date then id, and each game's events by timestamp.
    pub fn new(
        games: Vec<Game>,
        events: Vec<GameEvent>,
        participants: Vec<GameParticipant>,
        formations: Vec<TeamFormation>,
        team_members: Vec<TeamMember>,
    ) -> Self {
        let mut games: Vec<Game> = games.into_iter().filter(|g| g.is_completed()).collect();
        games.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        let mut by_game: HashMap<GameId, Vec<GameEvent>> = HashMap::new();
        for event in events {
            by_game.entry(event.game_id.clone()).or_default().push(event);
        }
        for list in by_game.values_mut() {
            list.sort_by_key(|e| e.timestamp);
        }

        let mut confirmed: HashMap<GameId, Vec<MemberId>> = HashMap::new();
        for p in participants.into_iter().filter(|p| p.is_confirmed()) {
            let list = confirmed.entry(p.game_id).or_default();
            if !list.contains(&p.member_id) {
                list.push(p.member_id);
            }
        }

        // Newest active formation wins if the store holds more than one.
        let mut active: HashMap<GameId, TeamFormation> = HashMap::new();
        for f in formations.into_iter().filter(|f| f.is_active) {
            match active.get(&f.game_id) {
                Some(prev) if prev.created_at > f.created_at => {}
                _ => {
                    active.insert(f.game_id.clone(), f);
                }
            }
        }
        let game_of_formation: HashMap<_, _> = active
            .values()
            .map(|f| (f.id.clone(), f.game_id.clone()))
            .collect();

        let mut lineups: HashMap<GameId, HashMap<MemberId, String>> = HashMap::new();
        for tm in team_members {
            if let Some(game_id) = game_of_formation.get(&tm.formation_id) {
                lineups
                    .entry(game_id.clone())
                    .or_default()
                    .insert(tm.member_id, tm.team);
            }
        }

        Self {
            games,
            events: by_game,
            confirmed,
            lineups,
        }
    }

    /// Completed games in date order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Completed games that have at least one logged event.
    pub fn games_with_events(&self) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(|g| !self.events(&g.id).is_empty())
    }

    pub fn events(&self, game_id: &GameId) -> &[GameEvent] {
        self.events.get(game_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn confirmed(&self, game_id: &GameId) -> &[MemberId] {
        self.confirmed.get(game_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_lineup(&self, game_id: &GameId) -> bool {
        self.lineups.contains_key(game_id)
    }

    /// Team a member played for in this game, per the active formation.
    pub fn lineup_team(&self, game_id: &GameId, member_id: &MemberId) -> Option<&str> {
        self.lineups
            .get(game_id)
            .and_then(|lineup| lineup.get(member_id))
            .map(String::as_str)
    }

    /// Confirmed participants missing from the lineup of a game that has
    /// events, whether the game has no formation or just omits them.
    pub fn members_without_lineup(&self) -> Vec<MemberId> {
        let mut members: Vec<MemberId> = Vec::new();
        for game in self.games_with_events() {
            for member in self.confirmed(&game.id) {
                if self.lineup_team(&game.id, member).is_none() && !members.contains(member) {
                    members.push(member.clone());
                }
            }
        }
        members
    }
}
