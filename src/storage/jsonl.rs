//! JSONL (JSON Lines) table files.
//!
//! Each table is one file; each line is one row.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{StorageConfig, StorageError};

/// Tables of the club database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Games,
    GameEvents,
    GameParticipants,
    TeamConfigurations,
    TeamFormations,
    TeamMembers,
    Members,
    GameHighlights,
    GameHighlightVotes,
    VotingControls,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Games => "games",
            Table::GameEvents => "game_events",
            Table::GameParticipants => "game_participants",
            Table::TeamConfigurations => "team_configurations",
            Table::TeamFormations => "team_formations",
            Table::TeamMembers => "team_members",
            Table::Members => "members",
            Table::GameHighlights => "game_highlights",
            Table::GameHighlightVotes => "game_highlight_votes",
            Table::VotingControls => "voting_controls",
        }
    }

    /// Get the filename for this table.
    pub fn filename(&self) -> String {
        format!("{}.jsonl", self.name())
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a table.
    pub fn for_table(config: &StorageConfig, table: Table) -> Self {
        Self::new(config.table_path(table))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single row to the file.
    pub fn append(&self, row: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(row)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended row to {:?}", self.path);
        Ok(())
    }

    /// Append multiple rows to the file.
    pub fn append_batch(&self, rows: &[T]) -> Result<usize, StorageError> {
        if rows.is_empty() {
            return Ok(0);
        }

        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for row in rows {
            let json = serde_json::to_string(row)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Appended {} rows to {:?}", count, self.path);

        Ok(count)
    }

    /// Write rows, replacing the entire file.
    ///
    /// The new content goes to a sibling temp file first and is renamed over
    /// the table, so readers never observe a half-written file.
    pub fn write_all(&self, rows: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let tmp_path = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for row in rows {
            let json = serde_json::to_string(row)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        drop(writer);
        fs::rename(&tmp_path, &self.path)?;
        debug!("Wrote {} rows to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a table.
    pub fn for_table(config: &StorageConfig, table: Table) -> Self {
        Self::new(config.table_path(table))
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all rows from the file. A missing file is an empty table;
    /// an unparseable line is an error.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let row = serde_json::from_str(&line).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                line: idx + 1,
                source,
            })?;
            rows.push(row);
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }

    /// Read rows matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRow {
        id: String,
        name: String,
        value: u32,
    }

    fn row(id: &str, name: &str, value: u32) -> TestRow {
        TestRow {
            id: id.to_string(),
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_jsonl_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.jsonl");

        let rows = vec![row("1", "First", 100), row("2", "Second", 200)];

        let writer: JsonlWriter<TestRow> = JsonlWriter::new(path.clone());
        assert_eq!(writer.write_all(&rows).unwrap(), 2);

        let reader: JsonlReader<TestRow> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap(), rows);
    }

    #[test]
    fn test_jsonl_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("append.jsonl");

        let writer: JsonlWriter<TestRow> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<TestRow> = JsonlReader::new(path);

        writer.append(&row("1", "First", 100)).unwrap();
        writer.append(&row("2", "Second", 200)).unwrap();

        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_jsonl_read_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<TestRow> =
            JsonlReader::new(temp_dir.path().join("nonexistent.jsonl"));

        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_jsonl_read_where() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filter.jsonl");

        let writer: JsonlWriter<TestRow> = JsonlWriter::new(path.clone());
        writer
            .write_all(&[row("1", "A", 50), row("2", "B", 150), row("3", "C", 250)])
            .unwrap();

        let reader: JsonlReader<TestRow> = JsonlReader::new(path);
        let filtered = reader.read_where(|e| e.value > 100).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "B");
        assert_eq!(filtered[1].name, "C");
    }

    #[test]
    fn test_append_batch_empty() {
        let temp_dir = TempDir::new().unwrap();
        let writer: JsonlWriter<TestRow> =
            JsonlWriter::new(temp_dir.path().join("empty_batch.jsonl"));
        assert_eq!(writer.append_batch(&[]).unwrap(), 0);
    }

    #[test]
    fn test_write_all_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overwrite.jsonl");

        let writer: JsonlWriter<TestRow> = JsonlWriter::new(path.clone());
        let reader: JsonlReader<TestRow> = JsonlReader::new(path.clone());

        writer.write_all(&[row("1", "Old", 1)]).unwrap();
        writer
            .write_all(&[row("2", "New1", 2), row("3", "New2", 3)])
            .unwrap();

        let read = reader.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].name, "New1");
        assert!(!path.with_extension("jsonl.tmp").exists());
    }

    #[test]
    fn test_read_all_fails_on_corrupt_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad_lines.jsonl");

        std::fs::write(
            &path,
            r#"{"id":"1","name":"Good","value":1}
not-valid-json
"#,
        )
        .unwrap();

        let reader: JsonlReader<TestRow> = JsonlReader::new(path);
        match reader.read_all() {
            Err(StorageError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt row error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_all_skips_blank_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.jsonl");

        std::fs::write(
            &path,
            r#"{"id":"1","name":"A","value":1}

{"id":"2","name":"B","value":2}
"#,
        )
        .unwrap();

        let reader: JsonlReader<TestRow> = JsonlReader::new(path);
        assert_eq!(reader.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_table_filenames() {
        assert_eq!(Table::GameEvents.filename(), "game_events.jsonl");
        assert_eq!(
            Table::GameHighlightVotes.filename(),
            "game_highlight_votes.jsonl"
        );
    }
}
