//! File-backed [`ClubStore`].
//!
//! Reads take a shared lock and writes an exclusive one, so every write
//! method runs its read-check-write sequence without interleaving.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{ClubStore, JsonlReader, JsonlWriter, StorageConfig, StorageError, Table};
use crate::models::{
    select_winner, ClubId, FormationId, Game, GameEvent, GameHighlight, GameHighlightVote,
    GameId, GameParticipant, HighlightId, Member, MemberId, Period, TeamConfiguration,
    TeamFormation, TeamMember, VotingControl,
};

pub struct JsonlStore {
    config: StorageConfig,
    lock: RwLock<()>,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            lock: RwLock::new(()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn reader<T: DeserializeOwned>(&self, table: Table) -> JsonlReader<T> {
        JsonlReader::for_table(&self.config, table)
    }

    fn writer<T: Serialize>(&self, table: Table) -> JsonlWriter<T> {
        JsonlWriter::for_table(&self.config, table)
    }

    /// Append rows produced by other workflows (game panel, member admin).
    pub async fn append_rows<T: Serialize + Sync>(
        &self,
        table: Table,
        rows: &[T],
    ) -> Result<usize, StorageError> {
        let _guard = self.lock.write().await;
        self.writer(table).append_batch(rows)
    }

    async fn read_where<T, F>(&self, table: Table, predicate: F) -> Result<Vec<T>, StorageError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let _guard = self.lock.read().await;
        self.reader(table).read_where(predicate)
    }
}

fn id_set<'a, I>(ids: I) -> HashSet<&'a str>
where
    I: IntoIterator<Item = &'a crate::models::EntityId>,
{
    ids.into_iter().map(|id| id.as_str()).collect()
}

#[async_trait]
impl ClubStore for JsonlStore {
    async fn get_game(&self, game_id: &GameId) -> Result<Option<Game>, StorageError> {
        let games: Vec<Game> = self.read_where(Table::Games, |g: &Game| &g.id == game_id).await?;
        Ok(games.into_iter().next())
    }

    async fn games_for_club(
        &self,
        club_id: &ClubId,
        period: Period,
    ) -> Result<Vec<Game>, StorageError> {
        let games = self
            .read_where(Table::Games, |g: &Game| {
                &g.club_id == club_id && period.contains(g.date)
            })
            .await?;
        debug!("Loaded {} games for club {} ({})", games.len(), club_id, period);
        Ok(games)
    }

    async fn events_for_games(&self, game_ids: &[GameId]) -> Result<Vec<GameEvent>, StorageError> {
        let wanted = id_set(game_ids);
        self.read_where(Table::GameEvents, |e: &GameEvent| {
            wanted.contains(e.game_id.as_str())
        })
        .await
    }

    async fn participants_for_games(
        &self,
        game_ids: &[GameId],
    ) -> Result<Vec<GameParticipant>, StorageError> {
        let wanted = id_set(game_ids);
        self.read_where(Table::GameParticipants, |p: &GameParticipant| {
            wanted.contains(p.game_id.as_str())
        })
        .await
    }

    async fn formations_for_games(
        &self,
        game_ids: &[GameId],
    ) -> Result<Vec<TeamFormation>, StorageError> {
        let wanted = id_set(game_ids);
        self.read_where(Table::TeamFormations, |f: &TeamFormation| {
            wanted.contains(f.game_id.as_str())
        })
        .await
    }

    async fn team_members_for_formations(
        &self,
        formation_ids: &[FormationId],
    ) -> Result<Vec<TeamMember>, StorageError> {
        let wanted = id_set(formation_ids);
        self.read_where(Table::TeamMembers, |tm: &TeamMember| {
            wanted.contains(tm.formation_id.as_str())
        })
        .await
    }

    async fn latest_team_assignments(
        &self,
        member_ids: &[MemberId],
    ) -> Result<Vec<TeamMember>, StorageError> {
        let wanted = id_set(member_ids);
        let _guard = self.lock.read().await;

        let created: HashMap<FormationId, DateTime<Utc>> = self
            .reader::<TeamFormation>(Table::TeamFormations)
            .read_where(|f| f.is_active)?
            .into_iter()
            .map(|f| (f.id, f.created_at))
            .collect();

        let mut latest: HashMap<MemberId, (DateTime<Utc>, TeamMember)> = HashMap::new();
        let assignments = self
            .reader::<TeamMember>(Table::TeamMembers)
            .read_where(|tm| wanted.contains(tm.member_id.as_str()))?;

        for tm in assignments {
            let Some(&at) = created.get(&tm.formation_id) else {
                continue;
            };
            match latest.get(&tm.member_id) {
                Some((prev, _)) if *prev > at => {}
                _ => {
                    latest.insert(tm.member_id.clone(), (at, tm));
                }
            }
        }

        Ok(latest.into_values().map(|(_, tm)| tm).collect())
    }

    async fn team_configurations(
        &self,
        club_id: &ClubId,
    ) -> Result<Vec<TeamConfiguration>, StorageError> {
        self.read_where(Table::TeamConfigurations, |t: &TeamConfiguration| {
            &t.club_id == club_id
        })
        .await
    }

    async fn members_for_club(&self, club_id: &ClubId) -> Result<Vec<Member>, StorageError> {
        self.read_where(Table::Members, |m: &Member| &m.club_id == club_id)
            .await
    }

    async fn get_members(&self, member_ids: &[MemberId]) -> Result<Vec<Member>, StorageError> {
        let wanted = id_set(member_ids);
        self.read_where(Table::Members, |m: &Member| wanted.contains(m.id.as_str()))
            .await
    }

    async fn highlights_for_game(
        &self,
        game_id: &GameId,
    ) -> Result<Vec<GameHighlight>, StorageError> {
        self.read_where(Table::GameHighlights, |h: &GameHighlight| {
            &h.game_id == game_id
        })
        .await
    }

    async fn votes_for_game(
        &self,
        game_id: &GameId,
    ) -> Result<Vec<GameHighlightVote>, StorageError> {
        self.read_where(Table::GameHighlightVotes, |v: &GameHighlightVote| {
            &v.game_id == game_id
        })
        .await
    }

    async fn voting_control(
        &self,
        game_id: &GameId,
    ) -> Result<Option<VotingControl>, StorageError> {
        let rows: Vec<VotingControl> = self
            .read_where(Table::VotingControls, |c: &VotingControl| {
                &c.game_id == game_id
            })
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_highlights(
        &self,
        highlights: Vec<GameHighlight>,
    ) -> Result<usize, StorageError> {
        let _guard = self.lock.write().await;

        let existing: HashSet<HighlightId> = self
            .reader::<GameHighlight>(Table::GameHighlights)
            .read_all()?
            .into_iter()
            .map(|h| h.id)
            .collect();

        let mut seen = HashSet::new();
        let fresh: Vec<GameHighlight> = highlights
            .into_iter()
            .filter(|h| !existing.contains(&h.id) && seen.insert(h.id.clone()))
            .collect();

        self.writer(Table::GameHighlights).append_batch(&fresh)
    }

    async fn insert_vote(&self, vote: GameHighlightVote) -> Result<GameHighlight, StorageError> {
        let _guard = self.lock.write().await;

        let finalized = self
            .reader::<VotingControl>(Table::VotingControls)
            .read_where(|c| c.game_id == vote.game_id && c.is_finalized)?;
        if !finalized.is_empty() {
            return Err(StorageError::VotingClosed(vote.game_id.clone()));
        }

        let duplicate = self
            .reader::<GameHighlightVote>(Table::GameHighlightVotes)
            .read_where(|v| v.game_id == vote.game_id && v.voter_id == vote.voter_id)?;
        if !duplicate.is_empty() {
            return Err(StorageError::UniqueViolation {
                table: Table::GameHighlightVotes.name(),
                key: format!("{}/{}", vote.game_id, vote.voter_id),
            });
        }

        let before = self
            .reader::<GameHighlight>(Table::GameHighlights)
            .read_all()?;
        let mut highlights = before.clone();
        let target = match highlights
            .iter_mut()
            .find(|h| h.game_id == vote.game_id && h.member_id == vote.voted_for_id)
        {
            Some(h) => {
                h.votes_count += 1;
                h.clone()
            }
            None => {
                let mut h = GameHighlight::new(vote.game_id.clone(), vote.voted_for_id.clone());
                h.votes_count = 1;
                highlights.push(h.clone());
                h
            }
        };

        // Tally first; a ballot row must never exist without its count.
        self.writer(Table::GameHighlights).write_all(&highlights)?;
        if let Err(e) = self.writer(Table::GameHighlightVotes).append(&vote) {
            warn!(
                "Failed to record vote in game {}, restoring tallies: {}",
                vote.game_id, e
            );
            self.writer(Table::GameHighlights).write_all(&before)?;
            return Err(e);
        }

        info!(
            "Recorded vote in game {} for {} (now {} votes)",
            vote.game_id, target.member_id, target.votes_count
        );
        Ok(target)
    }

    async fn finalize_voting(
        &self,
        game_id: &GameId,
        finalized_by: Option<&MemberId>,
    ) -> Result<VotingControl, StorageError> {
        let _guard = self.lock.write().await;

        let mut controls = self
            .reader::<VotingControl>(Table::VotingControls)
            .read_all()?;
        if controls
            .iter()
            .any(|c| &c.game_id == game_id && c.is_finalized)
        {
            return Err(StorageError::Conflict(format!(
                "voting for game {} is already finalized",
                game_id
            )));
        }

        let mut highlights = self
            .reader::<GameHighlight>(Table::GameHighlights)
            .read_all()?;
        let candidates: Vec<GameHighlight> = highlights
            .iter()
            .filter(|h| &h.game_id == game_id)
            .cloned()
            .collect();
        let wanted = id_set(candidates.iter().map(|h| &h.member_id));
        let birth_dates: HashMap<MemberId, NaiveDate> = self
            .reader::<Member>(Table::Members)
            .read_where(|m| wanted.contains(m.id.as_str()))?
            .into_iter()
            .filter_map(|m| m.birth_date.map(|d| (m.id, d)))
            .collect();
        let winner: Option<HighlightId> =
            select_winner(&candidates, &birth_dates).map(|h| h.id.clone());

        let mut winner_id = None;
        for h in highlights.iter_mut().filter(|h| &h.game_id == game_id) {
            h.is_winner = winner.as_ref() == Some(&h.id);
            if h.is_winner {
                winner_id = Some(h.member_id.clone());
            }
        }

        let control = VotingControl {
            game_id: game_id.clone(),
            is_finalized: true,
            finalized_at: Some(Utc::now()),
            finalized_by: finalized_by.cloned(),
            winner_id,
        };
        controls.retain(|c| &c.game_id != game_id);
        controls.push(control.clone());

        self.writer(Table::GameHighlights).write_all(&highlights)?;
        self.writer(Table::VotingControls).write_all(&controls)?;

        Ok(control)
    }

    async fn reopen_voting(&self, game_id: &GameId) -> Result<VotingControl, StorageError> {
        let _guard = self.lock.write().await;

        let mut controls = self
            .reader::<VotingControl>(Table::VotingControls)
            .read_all()?;
        let Some(control) = controls
            .iter_mut()
            .find(|c| &c.game_id == game_id && c.is_finalized)
        else {
            return Err(StorageError::Conflict(format!(
                "voting for game {} is not finalized",
                game_id
            )));
        };
        *control = VotingControl::open(game_id.clone());
        let reopened = control.clone();

        let mut highlights = self
            .reader::<GameHighlight>(Table::GameHighlights)
            .read_all()?;
        for h in highlights.iter_mut().filter(|h| &h.game_id == game_id) {
            h.is_winner = false;
        }

        self.writer(Table::GameHighlights).write_all(&highlights)?;
        self.writer(Table::VotingControls).write_all(&controls)?;

        Ok(reopened)
    }

    async fn delete_voting(&self, game_id: &GameId) -> Result<(usize, usize), StorageError> {
        let _guard = self.lock.write().await;

        let votes = self
            .reader::<GameHighlightVote>(Table::GameHighlightVotes)
            .read_all()?;
        let before = votes.len();
        let votes: Vec<_> = votes.into_iter().filter(|v| &v.game_id != game_id).collect();
        let votes_removed = before - votes.len();

        let highlights = self
            .reader::<GameHighlight>(Table::GameHighlights)
            .read_all()?;
        let before = highlights.len();
        let highlights: Vec<_> = highlights
            .into_iter()
            .filter(|h| &h.game_id != game_id)
            .collect();
        let highlights_removed = before - highlights.len();

        let controls: Vec<VotingControl> = self
            .reader::<VotingControl>(Table::VotingControls)
            .read_where(|c| &c.game_id != game_id)?;

        self.writer(Table::GameHighlightVotes).write_all(&votes)?;
        self.writer(Table::GameHighlights).write_all(&highlights)?;
        self.writer(Table::VotingControls).write_all(&controls)?;

        Ok((votes_removed, highlights_removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameStatus, ParticipantStatus};
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> JsonlStore {
        JsonlStore::new(StorageConfig::new(temp_dir.path().to_path_buf()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_games_for_club_filters_club_and_period() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .append_rows(
                Table::Games,
                &[
                    Game::new("g1".into(), "c1".into(), date(2025, 3, 2), GameStatus::Completed),
                    Game::new("g2".into(), "c1".into(), date(2025, 4, 2), GameStatus::Completed),
                    Game::new("g3".into(), "c2".into(), date(2025, 3, 9), GameStatus::Completed),
                ],
            )
            .await
            .unwrap();

        let march = Period::Month {
            year: 2025,
            month: 3,
        };
        let games = store.games_for_club(&"c1".into(), march).await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id.as_str(), "g1");

        let all = store.games_for_club(&"c1".into(), Period::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_batch_reads_by_game_ids() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .append_rows(
                Table::GameParticipants,
                &[
                    GameParticipant::new("g1".into(), "m1".into(), ParticipantStatus::Confirmed),
                    GameParticipant::new("g2".into(), "m1".into(), ParticipantStatus::Declined),
                    GameParticipant::new("g3".into(), "m2".into(), ParticipantStatus::Confirmed),
                ],
            )
            .await
            .unwrap();

        let rows = store
            .participants_for_games(&["g1".into(), "g3".into()])
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_latest_team_assignment_uses_newest_active_formation() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let mut old = TeamFormation::new("f-old".into(), "g1".into());
        old.created_at = Utc::now() - Duration::days(10);
        let new = TeamFormation::new("f-new".into(), "g2".into());
        let mut inactive = TeamFormation::new("f-inactive".into(), "g3".into());
        inactive.is_active = false;
        inactive.created_at = Utc::now() + Duration::days(1);

        store
            .append_rows(Table::TeamFormations, &[new, old, inactive])
            .await
            .unwrap();
        store
            .append_rows(
                Table::TeamMembers,
                &[
                    TeamMember::new("f-new".into(), "m1".into(), "Blue"),
                    TeamMember::new("f-old".into(), "m1".into(), "Red"),
                    TeamMember::new("f-inactive".into(), "m1".into(), "Green"),
                ],
            )
            .await
            .unwrap();

        let latest = store
            .latest_team_assignments(&["m1".into()])
            .await
            .unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].team, "Blue");
    }

    #[tokio::test]
    async fn test_insert_highlights_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let rows = vec![
            GameHighlight::new("g1".into(), "m1".into()),
            GameHighlight::new("g1".into(), "m2".into()),
        ];
        assert_eq!(store.insert_highlights(rows.clone()).await.unwrap(), 2);
        assert_eq!(store.insert_highlights(rows).await.unwrap(), 0);
        assert_eq!(
            store.highlights_for_game(&"g1".into()).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn test_insert_vote_enforces_one_per_voter() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .insert_highlights(vec![GameHighlight::new("g1".into(), "m1".into())])
            .await
            .unwrap();

        let h = store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "m1".into()))
            .await
            .unwrap();
        assert_eq!(h.votes_count, 1);

        let err = store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "m2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UniqueViolation { .. }));
        assert_eq!(store.votes_for_game(&"g1".into()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_votes_by_same_voter_store_one_row() {
        let tmp = TempDir::new().unwrap();
        let store = std::sync::Arc::new(store(&tmp));

        let mut handles = Vec::new();
        for target in ["m1", "m2", "m3", "m4"] {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), target.into()))
                    .await
            }));
        }

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.votes_for_game(&"g1".into()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_finalize_twice_conflicts() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "m1".into()))
            .await
            .unwrap();

        let control = store.finalize_voting(&"g1".into(), None).await.unwrap();
        assert!(control.is_finalized);
        assert_eq!(control.winner_id, Some(MemberId::from("m1")));

        let err = store
            .finalize_voting(&"g1".into(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_finalize_elects_from_current_tallies() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let game: GameId = "g1".into();

        store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "ana".into()))
            .await
            .unwrap();
        // A stale view would elect ana; bo overtakes before the write lands.
        let snapshot = store.highlights_for_game(&game).await.unwrap();
        assert_eq!(
            select_winner(&snapshot, &HashMap::new()).unwrap().member_id,
            MemberId::from("ana")
        );
        for voter in ["v2", "v3"] {
            store
                .insert_vote(GameHighlightVote::new("g1".into(), voter.into(), "bo".into()))
                .await
                .unwrap();
        }

        let control = store.finalize_voting(&game, None).await.unwrap();
        assert_eq!(control.winner_id, Some(MemberId::from("bo")));

        let winners: Vec<_> = store
            .highlights_for_game(&game)
            .await
            .unwrap()
            .into_iter()
            .filter(|h| h.is_winner)
            .collect();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].member_id, MemberId::from("bo"));
        assert_eq!(winners[0].votes_count, 2);
    }

    #[tokio::test]
    async fn test_finalize_tie_uses_birth_dates() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .append_rows(
                Table::Members,
                &[
                    Member::new("young".into(), "club".into(), "Young")
                        .with_birth_date(date(2002, 1, 1)),
                    Member::new("old".into(), "club".into(), "Old")
                        .with_birth_date(date(1979, 1, 1)),
                ],
            )
            .await
            .unwrap();
        store
            .insert_vote(GameHighlightVote::new("g1".into(), "old".into(), "young".into()))
            .await
            .unwrap();
        store
            .insert_vote(GameHighlightVote::new("g1".into(), "young".into(), "old".into()))
            .await
            .unwrap();

        let control = store.finalize_voting(&"g1".into(), None).await.unwrap();
        assert_eq!(control.winner_id, Some(MemberId::from("old")));
    }

    #[tokio::test]
    async fn test_vote_after_finalize_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "m1".into()))
            .await
            .unwrap();
        store.finalize_voting(&"g1".into(), None).await.unwrap();

        let err = store
            .insert_vote(GameHighlightVote::new("g1".into(), "v2".into(), "m1".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::VotingClosed(_)));
        assert_eq!(store.votes_for_game(&GameId::from("g1")).await.unwrap().len(), 1);
        let tally = store.highlights_for_game(&"g1".into()).await.unwrap();
        assert_eq!(tally[0].votes_count, 1);

        // Other games stay open.
        store
            .insert_vote(GameHighlightVote::new("g2".into(), "v2".into(), "m1".into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_votes_and_finalize_stay_consistent() {
        let tmp = TempDir::new().unwrap();
        let store = std::sync::Arc::new(store(&tmp));
        let game: GameId = "g1".into();

        let mut votes = Vec::new();
        for voter in ["v1", "v2", "v3", "v4", "v5", "v6"] {
            let store = store.clone();
            votes.push(tokio::spawn(async move {
                store
                    .insert_vote(GameHighlightVote::new("g1".into(), voter.into(), "m1".into()))
                    .await
            }));
        }
        let finalize = {
            let store = store.clone();
            let game = game.clone();
            tokio::spawn(async move { store.finalize_voting(&game, None).await })
        };

        let mut accepted = 0;
        for handle in votes {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(e) => assert!(matches!(e, StorageError::VotingClosed(_))),
            }
        }
        let control = finalize.await.unwrap().unwrap();

        let ballots = store.votes_for_game(&game).await.unwrap();
        let tally: u32 = store
            .highlights_for_game(&game)
            .await
            .unwrap()
            .iter()
            .map(|h| h.votes_count)
            .sum();
        assert_eq!(ballots.len(), accepted);
        assert_eq!(tally as usize, accepted);
        assert_eq!(control.winner_id.is_some(), accepted > 0);
    }

    #[tokio::test]
    async fn test_failed_tally_write_records_no_ballot() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .insert_highlights(vec![GameHighlight::new("g1".into(), "m1".into())])
            .await
            .unwrap();

        // Occupy the rewrite's temp path so replacing the tallies fails.
        let blocked = store
            .config()
            .table_path(Table::GameHighlights)
            .with_extension("jsonl.tmp");
        std::fs::create_dir_all(&blocked).unwrap();

        let result = store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "m1".into()))
            .await;
        assert!(result.is_err());
        assert!(store.votes_for_game(&"g1".into()).await.unwrap().is_empty());
        assert_eq!(
            store.highlights_for_game(&MemberId::from("g1")).await.unwrap()[0].votes_count,
            0
        );
    }

    #[tokio::test]
    async fn test_duplicate_check_is_scoped_to_game_and_voter() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        store
            .insert_vote(GameHighlightVote::new("a|b".into(), "c".into(), "m1".into()))
            .await
            .unwrap();
        store
            .insert_vote(GameHighlightVote::new("a".into(), "b|c".into(), "m1".into()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reopen_requires_finalized() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let err = store.reopen_voting(&"g1".into()).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_voting_only_touches_one_game() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store
            .insert_vote(GameHighlightVote::new("g1".into(), "v1".into(), "m1".into()))
            .await
            .unwrap();
        store
            .insert_vote(GameHighlightVote::new("g2".into(), "v1".into(), "m1".into()))
            .await
            .unwrap();

        let (votes, highlights) = store.delete_voting(&"g1".into()).await.unwrap();
        assert_eq!((votes, highlights), (1, 1));
        assert!(store.votes_for_game(&"g1".into()).await.unwrap().is_empty());
        assert_eq!(store.votes_for_game(&GameId::from("g2")).await.unwrap().len(), 1);
    }
}
