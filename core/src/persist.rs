use anyhow::{anyhow, Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::AnalysisResult;

/// An analysis as kept for later lookup. Written once, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnalysis {
    pub id: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub job_description: String,
    pub result: AnalysisResult,
}

impl StoredAnalysis {
    /// Fresh random id, stamped now.
    pub fn new(job_description: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: now_rfc3339(),
            job_description: job_description.into(),
            result,
        }
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id.clone(),
            timestamp: self.timestamp.clone(),
            resume_count: self.result.ranked_resumes.len(),
            top_score: self.result.ranked_resumes.iter().map(|r| r.score).max().unwrap_or(0),
        }
    }
}

/// One row of the history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: String,
    pub resume_count: usize,
    pub top_score: u32,
}

/// Keyed storage for finished analyses.
pub trait ResultStore: Send + Sync {
    /// Fails if a record with the same id already exists.
    fn put(&self, record: StoredAnalysis) -> Result<()>;
    fn get(&self, id: &str) -> Result<Option<StoredAnalysis>>;
    /// Newest first.
    fn list(&self) -> Result<Vec<HistoryEntry>>;
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_else(|_| "".into())
}

fn sort_newest_first(entries: &mut [HistoryEntry]) {
    // parse rather than compare strings: fractional seconds vary in width
    let parsed = |ts: &str| OffsetDateTime::parse(ts, &Rfc3339).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    entries.sort_by(|a, b| parsed(&b.timestamp).cmp(&parsed(&a.timestamp)));
}

/// Process-local store; contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, StoredAnalysis>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl ResultStore for MemoryStore {
    fn put(&self, record: StoredAnalysis) -> Result<()> {
        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(anyhow!("analysis {} already stored", record.id));
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<StoredAnalysis>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn list(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self.records.read().values().map(StoredAnalysis::history_entry).collect();
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}

/// On-disk store backed by sled, one bincode-encoded record per key.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::open(path).with_context(|| format!("failed to open store at {}", path.display()))?;
        Ok(Self { db })
    }
}

impl ResultStore for SledStore {
    fn put(&self, record: StoredAnalysis) -> Result<()> {
        let bytes = bincode::serialize(&record)?;
        self.db
            .compare_and_swap(record.id.as_bytes(), None as Option<&[u8]>, Some(bytes))?
            .map_err(|_| anyhow!("analysis {} already stored", record.id))?;
        self.db.flush()?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<StoredAnalysis>> {
        match self.db.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = Vec::new();
        for item in self.db.iter() {
            let (_key, bytes) = item?;
            let record: StoredAnalysis = bincode::deserialize(&bytes)?;
            entries.push(record.history_entry());
        }
        sort_newest_first(&mut entries);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResumeReport, Summary};

    fn record(id: &str, timestamp: &str, scores: &[u32]) -> StoredAnalysis {
        let ranked_resumes = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ResumeReport {
                filename: format!("{i}.txt"),
                score,
                match_percentage: score,
                matching_keywords: vec![],
                missing_keywords: vec![],
                resume_keywords: vec![],
                feedback: vec![],
            })
            .collect();
        StoredAnalysis {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            job_description: "jd".to_string(),
            result: AnalysisResult {
                job_keywords: vec![],
                ranked_resumes,
                summary: Summary { total_resumes: scores.len(), average_score: 0, top_score: 0, top_candidate: "None".into() },
            },
        }
    }

    fn exercise(store: &dyn ResultStore) {
        store.put(record("old", "2024-01-01T00:00:00Z", &[10, 70])).unwrap();
        store.put(record("new", "2024-01-01T00:00:00.5Z", &[55])).unwrap();
        assert!(store.put(record("old", "2024-02-01T00:00:00Z", &[1])).is_err());

        let got = store.get("old").unwrap().unwrap();
        assert_eq!(got.result.ranked_resumes.len(), 2);
        assert!(store.get("missing").unwrap().is_none());

        let history = store.list().unwrap();
        let ids: Vec<&str> = history.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(history[1].top_score, 70);
        assert_eq!(history[1].resume_count, 2);
    }

    #[test]
    fn memory_store_roundtrip() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn sled_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SledStore::open(dir.path().join("results")).unwrap();
        exercise(&store);
    }

    #[test]
    fn new_records_get_unique_ids_and_timestamps() {
        let a = record("x", "", &[]);
        let first = StoredAnalysis::new("jd", a.result.clone());
        let second = StoredAnalysis::new("jd", a.result);
        assert_ne!(first.id, second.id);
        assert!(OffsetDateTime::parse(&first.timestamp, &Rfc3339).is_ok());
        assert_eq!(first.history_entry().top_score, 0);
    }
}
