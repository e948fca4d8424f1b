//! SQLite-backed vector index
//!
//! Vectors are stored as JSON arrays and compared with the `sqlite-vec`
//! extension's `vec_distance_cosine`. The extension is registered
//! process-wide before the first connection opens, and every open probes
//! `vec_version()` so a broken installation fails at startup rather than
//! mid-ingest.

use crate::chunk::ChunkMetadata;
use crate::extract::DocType;
use crate::output::IngestSummary;
use crate::store::schema::initialize_schema;
use crate::store::{
    IndexEntry, RunRecord, RunStatus, SearchHit, StoreError, StoreResult, VectorStore,
};
use chrono::Utc;
use rusqlite::{ffi, params, Connection};
use std::mem::transmute;
use std::os::raw::c_char;
use std::path::Path;
use std::sync::{Mutex, Once};
use url::Url;

/// File name of the index database inside the persist directory
const DB_FILE: &str = "index.db";

/// SQLite vector store
pub struct SqliteVectorStore {
    conn: Connection,
}

impl SqliteVectorStore {
    /// Opens (or creates) the index at the given persist directory
    ///
    /// The directory is created if absent. Fails when the database cannot
    /// be opened or the vector extension is unavailable; callers treat
    /// this as a fatal configuration error and must not start crawling.
    pub fn open(persist_directory: &Path) -> StoreResult<Self> {
        register_vector_extension()?;

        std::fs::create_dir_all(persist_directory)?;
        let conn = Connection::open(persist_directory.join(DB_FILE))?;

        Self::initialize(conn)
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        register_vector_extension()?;
        let conn = Connection::open_in_memory()?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        // Probe the extension up front: an index we cannot query is a
        // configuration error, not something to discover mid-ingest.
        conn.query_row("SELECT vec_version()", [], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Extension(format!("sqlite-vec unavailable: {}", e)))?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    // ===== Run Bookkeeping =====

    /// Records the start of an ingest run
    pub fn begin_run(&mut self, config_hash: &str) -> StoreResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Marks a run completed and records its final counters
    pub fn finish_run(&mut self, run_id: i64, summary: &IngestSummary) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2, pages_visited = ?3, \
             documents_collected = ?4, chunks_stored = ?5 WHERE id = ?6",
            params![
                RunStatus::Completed.to_db_string(),
                now,
                summary.pages_visited as i64,
                summary.documents_collected as i64,
                summary.chunks_stored as i64,
                run_id
            ],
        )?;
        Ok(())
    }

    /// Returns the most recent runs, newest first
    pub fn recent_runs(&self, limit: usize) -> StoreResult<Vec<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, finished_at, config_hash, status, \
             pages_visited, documents_collected, chunks_stored \
             FROM runs ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(RunRecord {
                id: row.get(0)?,
                started_at: row.get(1)?,
                finished_at: row.get(2)?,
                config_hash: row.get(3)?,
                status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
                    .unwrap_or(RunStatus::Running),
                pages_visited: row.get::<_, i64>(5)? as u64,
                documents_collected: row.get::<_, i64>(6)? as u64,
                chunks_stored: row.get::<_, i64>(7)? as u64,
            })
        })?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?);
        }
        Ok(runs)
    }
}

impl VectorStore for SqliteVectorStore {
    fn add(&mut self, entries: &[IndexEntry]) -> StoreResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for entry in entries {
            let embedding = serde_json::to_string(&entry.vector)?;
            let metadata = &entry.chunk.metadata;
            tx.execute(
                "INSERT INTO chunks (url, title, doc_type, ordinal, content, embedding) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    metadata.url.as_str(),
                    metadata.title,
                    metadata.doc_type.as_str(),
                    metadata.ordinal as i64,
                    entry.chunk.text,
                    embedding
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn query(&self, vector: &[f32], k: usize) -> StoreResult<Vec<SearchHit>> {
        let needle = serde_json::to_string(vector)?;

        let mut stmt = self.conn.prepare(
            "SELECT url, title, doc_type, ordinal, content, \
             vec_distance_cosine(vec_f32(embedding), vec_f32(?1)) AS distance \
             FROM chunks ORDER BY distance ASC LIMIT ?2",
        )?;

        let rows = stmt.query_map(params![needle, k as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, f64>(5)? as f32,
            ))
        })?;

        let mut hits = Vec::new();
        for row in rows {
            let (url, title, doc_type, ordinal, content, distance) = row?;
            let url = Url::parse(&url)
                .map_err(|e| StoreError::Corrupt(format!("stored url '{}': {}", url, e)))?;
            let doc_type = DocType::parse(&doc_type)
                .ok_or_else(|| StoreError::Corrupt(format!("stored doc_type '{}'", doc_type)))?;

            hits.push(SearchHit {
                text: content,
                metadata: ChunkMetadata {
                    url,
                    title,
                    doc_type,
                    ordinal: ordinal as usize,
                },
                distance,
            });
        }
        Ok(hits)
    }

    fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn clear(&mut self) -> StoreResult<u64> {
        let removed = self.conn.execute("DELETE FROM chunks", [])?;
        Ok(removed as u64)
    }
}

/// Registers the sqlite-vec extension for every future connection
///
/// `sqlite3_auto_extension` is process-global, so registration happens
/// exactly once; the stored result is replayed to later callers.
fn register_vector_extension() -> StoreResult<()> {
    static INIT: Once = Once::new();
    static INIT_RESULT: Mutex<Option<Result<(), String>>> = Mutex::new(None);

    INIT.call_once(|| {
        let result = unsafe {
            type SqliteExtensionInit = unsafe extern "C" fn(
                *mut ffi::sqlite3,
                *mut *const c_char,
                *const ffi::sqlite3_api_routines,
            ) -> i32;

            let init: unsafe extern "C" fn() = sqlite_vec::sqlite3_vec_init;
            let init_fn: SqliteExtensionInit =
                transmute::<unsafe extern "C" fn(), SqliteExtensionInit>(init);
            let rc = ffi::sqlite3_auto_extension(Some(init_fn));
            if rc != 0 {
                Err(format!("failed to register sqlite-vec extension (code {})", rc))
            } else {
                Ok(())
            }
        };
        *INIT_RESULT.lock().expect("init result mutex poisoned") = Some(result);
    });

    INIT_RESULT
        .lock()
        .expect("init result mutex poisoned")
        .clone()
        .expect("init was called but result not set")
        .map_err(StoreError::Extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;

    fn entry(text: &str, ordinal: usize, vector: Vec<f32>) -> IndexEntry {
        IndexEntry {
            vector,
            chunk: Chunk {
                text: text.to_string(),
                metadata: ChunkMetadata {
                    url: Url::parse("https://example.org/manual/page").unwrap(),
                    title: "Policy".to_string(),
                    doc_type: DocType::Html,
                    ordinal,
                },
            },
        }
    }

    #[test]
    fn test_add_and_count() {
        let mut store = SqliteVectorStore::open_in_memory().unwrap();
        assert_eq!(store.count().unwrap(), 0);

        store
            .add(&[
                entry("first chunk", 0, vec![1.0, 0.0]),
                entry("second chunk", 1, vec![0.0, 1.0]),
            ])
            .unwrap();

        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_query_orders_by_distance() {
        let mut store = SqliteVectorStore::open_in_memory().unwrap();
        store
            .add(&[
                entry("about leave", 0, vec![1.0, 0.0, 0.0]),
                entry("about telework", 1, vec![0.0, 1.0, 0.0]),
                entry("about parking", 2, vec![0.0, 0.0, 1.0]),
            ])
            .unwrap();

        let hits = store.query(&[0.9, 0.1, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].text, "about leave");
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_query_preserves_metadata() {
        let mut store = SqliteVectorStore::open_in_memory().unwrap();
        store.add(&[entry("content here", 7, vec![1.0, 0.0])]).unwrap();

        let hits = store.query(&[1.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].metadata.ordinal, 7);
        assert_eq!(hits[0].metadata.title, "Policy");
        assert_eq!(hits[0].metadata.doc_type, DocType::Html);
    }

    #[test]
    fn test_clear_removes_entries() {
        let mut store = SqliteVectorStore::open_in_memory().unwrap();
        store
            .add(&[
                entry("a", 0, vec![1.0]),
                entry("b", 1, vec![0.5]),
            ])
            .unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_run_bookkeeping() {
        let mut store = SqliteVectorStore::open_in_memory().unwrap();
        let run_id = store.begin_run("abc123").unwrap();

        let summary = IngestSummary {
            pages_visited: 12,
            pages_failed: 1,
            documents_collected: 10,
            chunks_stored: 40,
            chunks_dropped: 3,
            chunks_failed: 0,
        };
        store.finish_run(run_id, &summary).unwrap();

        let runs = store.recent_runs(5).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].config_hash, "abc123");
        assert_eq!(runs[0].status, RunStatus::Completed);
        assert_eq!(runs[0].pages_visited, 12);
        assert_eq!(runs[0].chunks_stored, 40);
        assert!(runs[0].finished_at.is_some());
    }

    #[test]
    fn test_open_creates_persist_directory() {
        let scratch = tempfile::tempdir().unwrap();
        let nested = scratch.path().join("data").join("index");

        let store = SqliteVectorStore::open(&nested).unwrap();
        assert!(nested.join("index.db").exists());
        assert_eq!(store.count().unwrap(), 0);
    }
}
