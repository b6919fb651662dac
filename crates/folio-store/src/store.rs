// store.rs — SQLite-backed history recorder.
//
// Single-writer, single-process access model: one connection, WAL mode,
// every write a single prepared statement. Sequence numbers come from the
// database itself (MAX + 1 inside the insert), replacing any process-local
// counter or randomness.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use folio_toolbox::Operation;

use crate::error::StoreError;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS folios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    repo_uuid TEXT NOT NULL,
    origin_branch TEXT NOT NULL,
    origin_commit TEXT NOT NULL,
    sync_commit TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_folios_repo ON folios(repo_uuid);

CREATE TABLE IF NOT EXISTS prompts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    folio_id INTEGER NOT NULL REFERENCES folios(id),
    seqno INTEGER NOT NULL,
    template TEXT,
    contents TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(folio_id, seqno)
);

CREATE TABLE IF NOT EXISTS actions (
    commit_sha TEXT PRIMARY KEY,
    prompt_id INTEGER NOT NULL REFERENCES prompts(id),
    bot_name TEXT,
    bot_class TEXT NOT NULL,
    walltime REAL NOT NULL,
    request_count INTEGER,
    token_count INTEGER,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS operations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    commit_sha TEXT NOT NULL,
    tool TEXT NOT NULL,
    reason TEXT,
    details TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_operations_commit ON operations(commit_sha);
";

/// A folio row as recorded at creation time.
#[derive(Debug, Clone)]
pub struct FolioRow {
    pub id: i64,
    pub repo_uuid: String,
    pub origin_branch: String,
    pub origin_commit: String,
    pub sync_commit: Option<String>,
    pub created_at: String,
}

/// Listing row: one folio with its prompt count.
#[derive(Debug, Clone)]
pub struct FolioSummary {
    pub id: i64,
    pub origin_branch: String,
    pub origin_commit: String,
    pub prompt_count: i64,
    pub created_at: String,
}

/// Identity of a freshly inserted prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptRecord {
    pub id: i64,
    pub seqno: i64,
}

/// Listing row for prompts inside a folio.
#[derive(Debug, Clone)]
pub struct PromptRow {
    pub seqno: i64,
    pub template: Option<String>,
    pub contents: String,
    pub created_at: String,
}

/// Summary of one bot invocation, keyed by the resulting commit.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub commit_sha: String,
    pub prompt_id: i64,
    pub bot_name: Option<String>,
    pub bot_class: String,
    pub walltime_seconds: f64,
    pub request_count: Option<u64>,
    pub token_count: Option<u64>,
}

/// One recorded mutation-surface call, as read back from the store.
#[derive(Debug, Clone)]
pub struct OperationRow {
    pub tool: String,
    pub reason: Option<String>,
    pub details: serde_json::Value,
    pub recorded_at: String,
}

/// Append-only recorder of draft history.
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    /// An in-memory store, used by tests and dry runs.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Record a new folio and return its id.
    pub fn add_folio(
        &self,
        repo_uuid: Uuid,
        origin_branch: &str,
        origin_commit: &str,
        sync_commit: Option<&str>,
    ) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO folios (repo_uuid, origin_branch, origin_commit, sync_commit, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                repo_uuid.to_string(),
                origin_branch,
                origin_commit,
                sync_commit,
                Utc::now().to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(folio_id = id, origin_branch, "recorded folio");
        Ok(id)
    }

    /// Fetch a folio row, scoped to a repository.
    pub fn folio(&self, repo_uuid: Uuid, folio_id: i64) -> Result<Option<FolioRow>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, repo_uuid, origin_branch, origin_commit, sync_commit, created_at
                 FROM folios WHERE id = ?1 AND repo_uuid = ?2",
                params![folio_id, repo_uuid.to_string()],
                |row| {
                    Ok(FolioRow {
                        id: row.get(0)?,
                        repo_uuid: row.get(1)?,
                        origin_branch: row.get(2)?,
                        origin_commit: row.get(3)?,
                        sync_commit: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Record a prompt, assigning the next sequence number in its folio.
    pub fn add_prompt(
        &self,
        folio_id: i64,
        template: Option<&str>,
        contents: &str,
    ) -> Result<PromptRecord, StoreError> {
        self.conn.execute(
            "INSERT INTO prompts (folio_id, seqno, template, contents, created_at)
             VALUES (
                 ?1,
                 (SELECT COALESCE(MAX(seqno), 0) + 1 FROM prompts WHERE folio_id = ?1),
                 ?2, ?3, ?4
             )",
            params![folio_id, template, contents, Utc::now().to_rfc3339()],
        )?;
        let id = self.conn.last_insert_rowid();
        let seqno = self.conn.query_row(
            "SELECT seqno FROM prompts WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(PromptRecord { id, seqno })
    }

    /// Record the summary of one bot invocation.
    pub fn add_action(&self, action: &ActionRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO actions
                 (commit_sha, prompt_id, bot_name, bot_class, walltime,
                  request_count, token_count, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                action.commit_sha,
                action.prompt_id,
                action.bot_name,
                action.bot_class,
                action.walltime_seconds,
                action.request_count,
                action.token_count,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Record the buffered operations behind a draft commit.
    pub fn add_operations(
        &self,
        commit_sha: &str,
        operations: &[Operation],
    ) -> Result<(), StoreError> {
        let mut statement = self.conn.prepare(
            "INSERT INTO operations (commit_sha, tool, reason, details, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for operation in operations {
            statement.execute(params![
                commit_sha,
                operation.event.tool_name(),
                operation.reason,
                serde_json::to_string(&operation.event)?,
                operation.recorded_at.to_rfc3339(),
            ])?;
        }
        Ok(())
    }

    /// All folios recorded for a repository, newest first.
    pub fn list_folios(&self, repo_uuid: Uuid) -> Result<Vec<FolioSummary>, StoreError> {
        let mut statement = self.conn.prepare(
            "SELECT f.id, f.origin_branch, f.origin_commit,
                    (SELECT COUNT(*) FROM prompts p WHERE p.folio_id = f.id),
                    f.created_at
             FROM folios f WHERE f.repo_uuid = ?1
             ORDER BY f.id DESC",
        )?;
        let rows = statement.query_map(params![repo_uuid.to_string()], |row| {
            Ok(FolioSummary {
                id: row.get(0)?,
                origin_branch: row.get(1)?,
                origin_commit: row.get(2)?,
                prompt_count: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Prompts inside one folio, in sequence order.
    pub fn list_prompts(
        &self,
        repo_uuid: Uuid,
        folio_id: i64,
    ) -> Result<Vec<PromptRow>, StoreError> {
        if self.folio(repo_uuid, folio_id)?.is_none() {
            return Err(StoreError::UnknownFolio { folio_id });
        }
        let mut statement = self.conn.prepare(
            "SELECT seqno, template, contents, created_at
             FROM prompts WHERE folio_id = ?1 ORDER BY seqno",
        )?;
        let rows = statement.query_map(params![folio_id], |row| {
            Ok(PromptRow {
                seqno: row.get(0)?,
                template: row.get(1)?,
                contents: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Text of the most recent prompt in a folio, if any.
    pub fn latest_prompt(
        &self,
        repo_uuid: Uuid,
        folio_id: i64,
    ) -> Result<Option<String>, StoreError> {
        let contents = self
            .conn
            .query_row(
                "SELECT p.contents FROM prompts p
                 JOIN folios f ON f.id = p.folio_id
                 WHERE p.folio_id = ?1 AND f.repo_uuid = ?2
                 ORDER BY p.seqno DESC LIMIT 1",
                params![folio_id, repo_uuid.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(contents)
    }

    /// Operations recorded for a draft commit, in call order.
    pub fn list_operations(&self, commit_sha: &str) -> Result<Vec<OperationRow>, StoreError> {
        let mut statement = self.conn.prepare(
            "SELECT tool, reason, details, recorded_at
             FROM operations WHERE commit_sha = ?1 ORDER BY id",
        )?;
        let rows = statement.query_map(params![commit_sha], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut operations = Vec::new();
        for row in rows {
            let (tool, reason, details, recorded_at) = row?;
            operations.push(OperationRow {
                tool,
                reason,
                details: serde_json::from_str(&details)?,
                recorded_at,
            });
        }
        Ok(operations)
    }
}
