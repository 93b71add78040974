use super::CaptionStore;
use crate::models::CaptionRecord;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory caption store for tests: keeps inserted records, can simulate an
/// unreachable server for insert or ping.
#[derive(Clone)]
pub struct MockCaptionStore {
    records: Arc<Mutex<Vec<CaptionRecord>>>,
    fail_with: Arc<Mutex<Option<String>>>,
    ping_ok: Arc<Mutex<bool>>,
}

impl MockCaptionStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_with: Arc::new(Mutex::new(None)),
            ping_ok: Arc::new(Mutex::new(true)),
        }
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.fail_with.lock().unwrap() = Some(message);
        self
    }

    pub fn with_ping_failure(self) -> Self {
        *self.ping_ok.lock().unwrap() = false;
        self
    }

    pub fn get_records(&self) -> Vec<CaptionRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MockCaptionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionStore for MockCaptionStore {
    async fn insert(&self, record: &CaptionRecord) -> Result<()> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(Error::Store(message));
        }

        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        if *self.ping_ok.lock().unwrap() {
            Ok(())
        } else {
            Err(Error::Store("server unreachable".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_keeps_records_in_order() {
        let store = MockCaptionStore::new();

        let first = CaptionRecord::new("https://a".to_string(), "one", "x".to_string());
        let second = CaptionRecord::new("https://b".to_string(), "two", "y".to_string());
        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        let records = store.get_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].image_url, "https://a");
        assert_eq!(records[1].image_url, "https://b");
    }

    #[tokio::test]
    async fn test_mock_store_insert_failure_stores_nothing() {
        let store = MockCaptionStore::new().with_failure("down".to_string());

        let record = CaptionRecord::new("https://a".to_string(), "one", "x".to_string());
        let err = store.insert(&record).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert!(store.get_records().is_empty());
    }

    #[tokio::test]
    async fn test_mock_store_ping() {
        assert!(MockCaptionStore::new().ping().await.is_ok());
        assert!(MockCaptionStore::new()
            .with_ping_failure()
            .ping()
            .await
            .is_err());
    }
}
