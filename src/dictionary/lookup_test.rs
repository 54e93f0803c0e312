// Tests for LookupEngine
// Test cases:
// - Exact matches short-circuit the substring query
// - Substring query runs only when the exact query is empty, with its own limit
// - Candidates are deduplicated in first-seen order
// - No match and store failure both fall back to the original token
// - One failing token does not affect the others
// - Reverse direction reads the Chinese column, case-insensitively
// - translate() keeps token order, even when later tokens finish first

use super::*;
use crate::dictionary::{LookupField, TranslationPage};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Exact(LookupField, String, usize),
    Substring(LookupField, String, usize),
}

/// In-memory backend that records every query it receives
#[derive(Default)]
struct RecordingStore {
    rows: Vec<TranslationEntry>,
    failing_tokens: Vec<String>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingStore {
    fn with_rows(pairs: &[(&str, &str)]) -> Self {
        let rows = pairs
            .iter()
            .enumerate()
            .map(|(i, (chinese, cantonese))| TranslationEntry {
                id: i as i64 + 1,
                chinese: chinese.to_string(),
                cantonese: cantonese.to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            })
            .collect();
        Self {
            rows,
            ..Default::default()
        }
    }

    fn failing_on(mut self, token: &str) -> Self {
        self.failing_tokens.push(token.to_string());
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn check_failure(&self, value: &str) -> Result<(), TranslationError> {
        if self.failing_tokens.iter().any(|t| t == value) {
            return Err(TranslationError::Load("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStoreBackend for RecordingStore {
    async fn find_exact(
        &self,
        field: LookupField,
        value: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Exact(field, value.to_string(), limit));
        self.check_failure(value)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| match field {
                LookupField::Chinese => row.chinese == value,
                LookupField::Cantonese => row.cantonese.eq_ignore_ascii_case(value),
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_substring(
        &self,
        field: LookupField,
        pattern: &str,
        limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Substring(field, pattern.to_string(), limit));
        self.check_failure(pattern)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| row.field(field).contains(pattern))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        _chinese: String,
        _cantonese: String,
    ) -> Result<TranslationEntry, TranslationError> {
        Err(TranslationError::Persistence("read-only test store".to_string()))
    }

    async fn list(
        &self,
        _search: &str,
        _page: u64,
        _page_size: u64,
    ) -> Result<TranslationPage, TranslationError> {
        Err(TranslationError::Load("read-only test store".to_string()))
    }
}

fn engine(store: Arc<RecordingStore>) -> LookupEngine {
    LookupEngine::new(store, LookupLimits { exact: 5, partial: 3 })
}

#[tokio::test]
async fn test_exact_match_skips_substring_query() {
    let store = Arc::new(RecordingStore::with_rows(&[("我", "ngo5"), ("我們", "ngo5 mun4")]));
    let engine = engine(store.clone());

    let set = engine.lookup("我", Direction::ChineseToCantonese).await;

    assert_eq!(set.candidates(), &["ngo5"]);
    assert_eq!(
        store.calls(),
        vec![Call::Exact(LookupField::Chinese, "我".to_string(), 5)]
    );
}

#[tokio::test]
async fn test_substring_query_runs_after_empty_exact() {
    let store = Arc::new(RecordingStore::with_rows(&[
        ("你好", "nei5 hou2"),
        ("好人", "hou2 jan4"),
        ("好嘢", "hou2 je5"),
        ("好彩", "hou2 coi2"),
    ]));
    let engine = engine(store.clone());

    let set = engine.lookup("好", Direction::ChineseToCantonese).await;

    // Partial limit caps the result at three rows, identity order
    assert_eq!(set.candidates(), &["nei5 hou2", "hou2 jan4", "hou2 je5"]);
    assert_eq!(
        store.calls(),
        vec![
            Call::Exact(LookupField::Chinese, "好".to_string(), 5),
            Call::Substring(LookupField::Chinese, "好".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn test_candidates_are_deduplicated() {
    let store = Arc::new(RecordingStore::with_rows(&[
        ("愛", "oi3"),
        ("愛", "ngoi3"),
        ("愛", "oi3"),
    ]));
    let engine = engine(store);

    let candidates = engine
        .candidates("愛", Direction::ChineseToCantonese)
        .await
        .unwrap();

    assert_eq!(candidates, vec!["oi3", "ngoi3"]);
}

#[tokio::test]
async fn test_exact_limit_applies() {
    let store = Arc::new(RecordingStore::with_rows(&[
        ("一", "jat1"),
        ("一", "jat1 a"),
        ("一", "jat1 b"),
    ]));
    let engine = LookupEngine::new(store, LookupLimits { exact: 2, partial: 1 });

    let set = engine.lookup("一", Direction::ChineseToCantonese).await;
    assert_eq!(set.candidates(), &["jat1", "jat1 a"]);
}

#[tokio::test]
async fn test_no_match_falls_back_to_token() {
    let store = Arc::new(RecordingStore::with_rows(&[("我", "ngo5")]));
    let engine = engine(store.clone());

    let set = engine.lookup("龍", Direction::ChineseToCantonese).await;

    assert_eq!(set.original(), "龍");
    assert_eq!(set.candidates(), &["龍"]);
    assert_eq!(set.selected_index(), 0);
    assert_eq!(store.calls().len(), 2);
}

#[tokio::test]
async fn test_store_failure_falls_back_to_token() {
    let store = Arc::new(RecordingStore::with_rows(&[("你", "nei5")]).failing_on("你"));
    let engine = engine(store);

    assert!(engine
        .candidates("你", Direction::ChineseToCantonese)
        .await
        .is_err());

    let set = engine.lookup("你", Direction::ChineseToCantonese).await;
    assert!(set.is_fallback());
}

#[tokio::test]
async fn test_failing_token_does_not_abort_others() {
    let store = Arc::new(
        RecordingStore::with_rows(&[("我", "ngo5"), ("愛", "oi3"), ("你", "nei5")])
            .failing_on("愛"),
    );
    let engine = engine(store);

    let selection = engine.translate("我 愛 你", Direction::ChineseToCantonese).await;

    assert_eq!(selection.len(), 3);
    assert_eq!(selection.compose_selection(), "ngo5 愛 nei5");
}

#[tokio::test]
async fn test_reverse_direction_is_case_insensitive() {
    let store = Arc::new(RecordingStore::with_rows(&[("我", "ngo5"), ("我哋", "ngo5 dei6")]));
    let engine = engine(store.clone());

    let set = engine.lookup("NGO5", Direction::CantoneseToChinese).await;

    assert_eq!(set.candidates(), &["我"]);
    assert_eq!(
        store.calls(),
        vec![Call::Exact(LookupField::Cantonese, "NGO5".to_string(), 5)]
    );
}

#[tokio::test]
async fn test_translate_scenario_preserves_order() {
    let store = Arc::new(RecordingStore::with_rows(&[
        ("我", "ngo5"),
        ("愛", "oi3"),
        ("愛", "ngoi3"),
        ("你", "nei5"),
    ]));
    let engine = engine(store);

    let selection = engine.translate("我 愛 你", Direction::ChineseToCantonese).await;

    let sets = selection.candidate_sets();
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0].original(), "我");
    assert_eq!(sets[1].original(), "愛");
    assert_eq!(sets[1].candidates(), &["oi3", "ngoi3"]);
    assert_eq!(sets[2].original(), "你");
    assert_eq!(selection.compose_selection(), "ngo5 oi3 nei5");
    assert_eq!(selection.direction(), Direction::ChineseToCantonese);
}

/// Backend whose exact lookups take `delay_ms` per token before answering
struct DelayedStore {
    rows: Vec<(&'static str, &'static str)>,
    delays: Vec<(&'static str, u64)>,
    finished: Mutex<Vec<String>>,
}

#[async_trait]
impl EntryStoreBackend for DelayedStore {
    async fn find_exact(
        &self,
        _field: LookupField,
        value: &str,
        _limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        let delay = self
            .delays
            .iter()
            .find(|(token, _)| *token == value)
            .map_or(0, |(_, ms)| *ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.finished.lock().unwrap().push(value.to_string());
        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, (chinese, _))| *chinese == value)
            .map(|(i, (chinese, cantonese))| TranslationEntry {
                id: i as i64 + 1,
                chinese: chinese.to_string(),
                cantonese: cantonese.to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            })
            .collect())
    }

    async fn find_substring(
        &self,
        _field: LookupField,
        _pattern: &str,
        _limit: usize,
    ) -> Result<Vec<TranslationEntry>, TranslationError> {
        Ok(Vec::new())
    }

    async fn create(
        &self,
        _chinese: String,
        _cantonese: String,
    ) -> Result<TranslationEntry, TranslationError> {
        Err(TranslationError::Persistence("read-only test store".to_string()))
    }

    async fn list(
        &self,
        _search: &str,
        _page: u64,
        _page_size: u64,
    ) -> Result<TranslationPage, TranslationError> {
        Err(TranslationError::Load("read-only test store".to_string()))
    }
}

#[tokio::test]
async fn test_translate_keeps_order_when_later_tokens_finish_first() {
    let store = Arc::new(DelayedStore {
        rows: vec![("我", "ngo5"), ("愛", "oi3"), ("你", "nei5")],
        delays: vec![("我", 120), ("愛", 60), ("你", 0)],
        finished: Mutex::new(Vec::new()),
    });
    let engine = LookupEngine::new(store.clone(), LookupLimits::default());

    let selection = engine.translate("我 愛 你", Direction::ChineseToCantonese).await;

    // Lookups ran concurrently and completed in reverse order
    assert_eq!(*store.finished.lock().unwrap(), vec!["你", "愛", "我"]);
    let originals: Vec<&str> = selection
        .candidate_sets()
        .iter()
        .map(|set| set.original())
        .collect();
    assert_eq!(originals, vec!["我", "愛", "你"]);
    assert_eq!(selection.compose_selection(), "ngo5 oi3 nei5");
}

#[tokio::test]
async fn test_translate_empty_text() {
    let store = Arc::new(RecordingStore::default());
    let engine = engine(store.clone());

    let selection = engine.translate("  。，  ", Direction::ChineseToCantonese).await;

    assert!(selection.is_empty());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn test_custom_tokenizer() {
    let store = Arc::new(RecordingStore::with_rows(&[("我", "ngo5"), ("你", "nei5")]));
    let engine = engine(store).with_tokenizer(Tokenizer::with_separators(&['/']));

    let selection = engine.translate("我/你", Direction::ChineseToCantonese).await;
    assert_eq!(selection.compose_selection(), "ngo5 nei5");
}
