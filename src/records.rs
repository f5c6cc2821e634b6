use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemType {
    Existing,
    AiGenerated,
}

/// One completed study round: the exercise texts, the raw feedback reply
/// and the score parsed out of it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TranslationRecord {
    pub id: String,
    pub problem_type: ProblemType,
    pub original_text: String,
    pub user_translation: String,
    pub ai_translation: String,
    pub feedback: String,
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

impl TranslationRecord {
    pub fn formatted_date(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// JSON-file-backed study history. A missing file reads as an empty
/// history; every mutation rewrites the whole file.
pub struct RecordStore {
    file_path: PathBuf,
}

impl RecordStore {
    pub fn new(data_dir: &Path) -> Self {
        RecordStore {
            file_path: data_dir.join("records.json"),
        }
    }

    /// All records, newest first.
    pub fn load(&self) -> Result<Vec<TranslationRecord>, Box<dyn Error>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.file_path)
            .map_err(|e| format!("Failed to open record file at {:?}: {}", self.file_path, e))?;
        let reader = BufReader::new(file);
        let mut records: Vec<TranslationRecord> = serde_json::from_reader(reader)
            .map_err(|e| format!("Failed to deserialize records from {:?}: {}", self.file_path, e))?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    pub fn append(&self, record: TranslationRecord) -> Result<(), Box<dyn Error>> {
        let mut records = self.load()?;
        records.insert(0, record);
        self.write_all(&records)
    }

    pub fn delete(&self, record_id: &str) -> Result<(), Box<dyn Error>> {
        let mut records = self.load()?;
        records.retain(|r| r.id != record_id);
        self.write_all(&records)
    }

    pub fn delete_many(&self, record_ids: &[String]) -> Result<(), Box<dyn Error>> {
        let mut records = self.load()?;
        records.retain(|r| !record_ids.contains(&r.id));
        self.write_all(&records)
    }

    fn write_all(&self, records: &[TranslationRecord]) -> Result<(), Box<dyn Error>> {
        let file = File::create(&self.file_path)
            .map_err(|e| format!("Failed to create record file at {:?}: {}", self.file_path, e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, records)
            .map_err(|e| format!("Failed to serialize records to {:?}: {}", self.file_path, e))?;
        Ok(())
    }
}

/// Millisecond-stamped record id, unique enough for a single-user local
/// history.
pub fn new_record_id(now: DateTime<Utc>) -> String {
    format!("rec-{}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(id: &str, secs: i64) -> TranslationRecord {
        TranslationRecord {
            id: id.to_string(),
            problem_type: ProblemType::AiGenerated,
            original_text: "원문".to_string(),
            user_translation: "내 번역".to_string(),
            ai_translation: "AI 번역".to_string(),
            feedback: "1. 종합 평가\n‧ 좋음 (9/10)".to_string(),
            score: 90,
            topic: "경제".to_string(),
            difficulty: "중급".to_string(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn missing_file_reads_as_empty_history() {
        let store = RecordStore::new(Path::new("/nonexistent-dir-for-test"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_and_load_newest_first() {
        let dir = std::env::temp_dir().join("transtutor-records-test-append");
        std::fs::create_dir_all(&dir).unwrap();
        let store = RecordStore::new(&dir);
        let _ = std::fs::remove_file(dir.join("records.json"));

        store.append(sample("rec-1", 100)).unwrap();
        store.append(sample("rec-2", 200)).unwrap();
        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "rec-2");
        assert_eq!(records[1].id, "rec-1");
    }

    #[test]
    fn delete_many_removes_only_selected() {
        let dir = std::env::temp_dir().join("transtutor-records-test-delete");
        std::fs::create_dir_all(&dir).unwrap();
        let store = RecordStore::new(&dir);
        let _ = std::fs::remove_file(dir.join("records.json"));

        store.append(sample("rec-1", 100)).unwrap();
        store.append(sample("rec-2", 200)).unwrap();
        store.append(sample("rec-3", 300)).unwrap();
        store
            .delete_many(&["rec-1".to_string(), "rec-3".to_string()])
            .unwrap();
        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "rec-2");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = sample("rec-9", 400);
        let json = serde_json::to_string(&record).unwrap();
        let back: TranslationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "rec-9");
        assert_eq!(back.problem_type, ProblemType::AiGenerated);
        assert_eq!(back.score, 90);
    }
}
