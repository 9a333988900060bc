//! Disk-based history of ranked queries.
//!
//! Each ranked result is appended to a JSON-lines file, one record per
//! route. The planner only writes here; nothing in ranking reads it back.

use std::fs::OpenOptions;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{ScoredRoute, TransportMode};

/// Errors from the history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize history record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("history store lock poisoned")]
    Poisoned,
}

/// Accepts scored routes for storage.
pub trait RouteSink: Send + Sync {
    fn record(
        &self,
        origin: &str,
        destination: &str,
        routes: &[ScoredRoute],
    ) -> Result<(), HistoryError>;
}

/// One stored route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub origin: String,
    pub destination: String,
    pub mode: TransportMode,
    pub time_min: u32,
    pub price: f64,
    pub transfers: u32,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Append-only JSON-lines history file.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    /// Serialises appends from concurrent requests.
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the history file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load up to `limit` records, newest first.
    ///
    /// Records of one query keep their rank order. The file is append-only,
    /// so only the trailing queries that can fill `limit` are kept while
    /// reading. A missing file is an empty history. Lines that fail to
    /// parse are skipped.
    pub fn load_recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // One entry per query, oldest first
        let mut queries: VecDeque<Vec<HistoryRecord>> = VecDeque::new();
        let mut kept = 0;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = match serde_json::from_str::<HistoryRecord>(&line) {
                Ok(record) => record,
                Err(e) => {
                    warn!(line = line_no + 1, error = %e, "Skipping bad history line");
                    continue;
                }
            };

            match queries.back_mut() {
                Some(query) if query.first().is_some_and(|first| same_query(first, &record)) => {
                    query.push(record)
                }
                _ => queries.push_back(vec![record]),
            }
            kept += 1;

            while let Some(oldest) = queries.front()
                && kept - oldest.len() >= limit
            {
                kept -= oldest.len();
                queries.pop_front();
            }
        }

        Ok(queries.into_iter().rev().flatten().take(limit).collect())
    }

    fn append(&self, records: &[HistoryRecord]) -> Result<(), HistoryError> {
        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        let _guard = self.write_lock.lock().map_err(|_| HistoryError::Poisoned)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&buf)?;
        Ok(())
    }
}

/// Whether two records were written by the same `record` call.
fn same_query(a: &HistoryRecord, b: &HistoryRecord) -> bool {
    a.created_at == b.created_at && a.origin == b.origin && a.destination == b.destination
}

impl RouteSink for HistoryStore {
    fn record(
        &self,
        origin: &str,
        destination: &str,
        routes: &[ScoredRoute],
    ) -> Result<(), HistoryError> {
        let created_at = Utc::now();
        let records: Vec<HistoryRecord> = routes
            .iter()
            .map(|s| HistoryRecord {
                origin: origin.to_string(),
                destination: destination.to_string(),
                mode: s.route.mode,
                time_min: s.route.time_min,
                price: s.route.price,
                transfers: s.route.transfers,
                score: s.score,
                created_at,
            })
            .collect();

        self.append(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Route, RouteSource};
    use tempfile::tempdir;

    fn scored(mode: TransportMode, time_min: u32, score: f64) -> ScoredRoute {
        ScoredRoute {
            route: Route {
                mode,
                time_min,
                price: 12.5,
                distance_km: 100.0,
                transfers: 1,
                description: String::new(),
                path: None,
                source: RouteSource::RailEstimate,
            },
            score,
        }
    }

    #[test]
    fn record_and_load() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.jsonl"));

        let routes = vec![
            scored(TransportMode::Train, 216, 0.2),
            scored(TransportMode::Bus, 351, 0.35),
        ];
        store.record("Kyiv", "Lviv", &routes).unwrap();

        let loaded = store.load_recent(10).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].mode, TransportMode::Train);
        assert_eq!(loaded[0].origin, "Kyiv");
        assert_eq!(loaded[0].destination, "Lviv");
        assert_eq!(loaded[1].mode, TransportMode::Bus);
        assert_eq!(loaded[1].score, 0.35);
    }

    #[test]
    fn newest_first_and_limited() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.jsonl"));

        store
            .record("Kyiv", "Lviv", &[scored(TransportMode::Train, 216, 0.2)])
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .record("Lviv", "Odesa", &[scored(TransportMode::Plane, 150, 0.4)])
            .unwrap();

        let loaded = store.load_recent(1).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].origin, "Lviv");
    }

    #[test]
    fn limit_keeps_best_ranked_routes_of_latest_query() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history.jsonl"));

        store
            .record("Kyiv", "Lviv", &[scored(TransportMode::Train, 216, 0.2)])
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .record(
                "Lviv",
                "Odesa",
                &[
                    scored(TransportMode::Plane, 150, 0.1),
                    scored(TransportMode::Train, 480, 0.3),
                    scored(TransportMode::Bus, 600, 0.5),
                ],
            )
            .unwrap();

        let loaded = store.load_recent(2).unwrap();
        assert_eq!(
            loaded.iter().map(|r| r.mode).collect::<Vec<_>>(),
            vec![TransportMode::Plane, TransportMode::Train]
        );

        let all = store.load_recent(10).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].origin, "Lviv");
        assert_eq!(all[3].origin, "Kyiv");

        assert!(store.load_recent(0).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_empty_history() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("none.jsonl"));
        assert!(store.load_recent(10).unwrap().is_empty());
    }

    #[test]
    fn bad_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.jsonl");
        let store = HistoryStore::new(&path);

        store
            .record("Kyiv", "Lviv", &[scored(TransportMode::Train, 216, 0.2)])
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not json").unwrap();

        assert_eq!(store.load_recent(10).unwrap().len(), 1);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("history.jsonl");
        let store = HistoryStore::new(&path);

        store.record("Kyiv", "Lviv", &[]).unwrap();
        assert!(path.exists());
    }
}
