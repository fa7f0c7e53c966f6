//! SQLite-backed high-score store
//!
//! Append-only `(name, score)` rows; the start screen shows the top 3 by
//! descending score. Access is scoped: every operation opens the database,
//! runs one statement and releases it, so nothing is held across frames and
//! concurrent external readers are fine.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

/// Rows shown on the start screen
pub const TOP_SCORES_SHOWN: usize = 3;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub name: String,
    pub score: u32,
}

/// Handle to the on-disk leaderboard
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Open (creating the table if needed). Failure here is surfaced to the
    /// caller; the game degrades to an empty leaderboard.
    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Self> {
        let store = Self { path: path.as_ref().to_path_buf() };
        let conn = store.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS highscores (name TEXT, score INTEGER)",
            [],
        )?;
        Ok(store)
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open(&self.path)
    }

    /// Append one score row
    pub fn insert(&self, name: &str, score: u32) -> rusqlite::Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO highscores (name, score) VALUES (?1, ?2)",
            params![name, score],
        )?;
        Ok(())
    }

    /// Top rows by descending score
    pub fn top(&self, limit: usize) -> rusqlite::Result<Vec<ScoreRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT name, score FROM highscores ORDER BY score DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(ScoreRow { name: row.get(0)?, score: row.get(1)? })
        })?;
        rows.collect()
    }

    /// Total number of persisted rows
    pub fn len(&self) -> rusqlite::Result<usize> {
        let conn = self.connect()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM highscores", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    pub fn is_empty(&self) -> rusqlite::Result<bool> {
        Ok(self.len()? == 0)
    }
}
