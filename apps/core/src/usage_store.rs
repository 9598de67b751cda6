use std::fmt::{Display, Formatter};
use std::path::Path;

use rusqlite::{params, Connection};

#[derive(Debug)]
pub enum UsageStoreError {
    Io(std::io::Error),
    Db(rusqlite::Error),
}

impl Display for UsageStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Db(error) => write!(f, "database error: {error}"),
        }
    }
}

impl std::error::Error for UsageStoreError {}

impl From<std::io::Error> for UsageStoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for UsageStoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub name: String,
    pub kind: String,
    pub use_count: u32,
    pub last_used_epoch_secs: i64,
}

/// Launch frequency/recency store backing ranking bonuses and suggestions.
pub struct UsageStore {
    db: Connection,
}

impl UsageStore {
    pub fn open(path: &Path) -> Result<Self, UsageStoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Connection::open(path)?;
        Self::init_schema(&db)?;
        Ok(Self { db })
    }

    pub fn open_memory() -> Result<Self, UsageStoreError> {
        let db = Connection::open_in_memory()?;
        Self::init_schema(&db)?;
        Ok(Self { db })
    }

    fn init_schema(db: &Connection) -> Result<(), UsageStoreError> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS usage (
                name TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                use_count INTEGER NOT NULL,
                last_used INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn record_launch(
        &self,
        name: &str,
        kind: &str,
        now_epoch_secs: i64,
    ) -> Result<(), UsageStoreError> {
        self.db.execute(
            "INSERT INTO usage (name, kind, use_count, last_used) VALUES (?1, ?2, 1, ?3)
             ON CONFLICT(name) DO UPDATE SET
                 use_count = use_count + 1,
                 last_used = excluded.last_used,
                 kind = excluded.kind",
            params![name, kind, now_epoch_secs],
        )?;
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<Option<UsageRecord>, UsageStoreError> {
        let mut stmt = self
            .db
            .prepare("SELECT name, kind, use_count, last_used FROM usage WHERE name = ?1")?;
        let mut rows = stmt.query(params![name])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_record(row)?)),
            None => Ok(None),
        }
    }

    pub fn most_used(&self, limit: usize) -> Result<Vec<UsageRecord>, UsageStoreError> {
        self.query_ordered(
            "SELECT name, kind, use_count, last_used FROM usage
             ORDER BY use_count DESC, last_used DESC LIMIT ?1",
            limit,
        )
    }

    pub fn most_recent(&self, limit: usize) -> Result<Vec<UsageRecord>, UsageStoreError> {
        self.query_ordered(
            "SELECT name, kind, use_count, last_used FROM usage
             ORDER BY last_used DESC, use_count DESC LIMIT ?1",
            limit,
        )
    }

    pub fn clear(&self) -> Result<(), UsageStoreError> {
        self.db.execute("DELETE FROM usage", [])?;
        Ok(())
    }

    /// Ranking bonus for an entry name: frequency-weighted, capped so text
    /// relevance still dominates.
    pub fn rank_bonus(&self, name: &str) -> i64 {
        match self.lookup(name) {
            Ok(Some(record)) => ((record.use_count as i64) * 120).min(2_400),
            _ => 0,
        }
    }

    fn query_ordered(&self, sql: &str, limit: usize) -> Result<Vec<UsageRecord>, UsageStoreError> {
        let mut stmt = self.db.prepare(sql)?;
        let mut rows = stmt.query(params![limit as i64])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(row_to_record(row)?);
        }
        Ok(records)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> Result<UsageRecord, rusqlite::Error> {
    Ok(UsageRecord {
        name: row.get(0)?,
        kind: row.get(1)?,
        use_count: row.get::<_, i64>(2)? as u32,
        last_used_epoch_secs: row.get(3)?,
    })
}
