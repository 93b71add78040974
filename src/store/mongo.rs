use super::CaptionStore;
use crate::models::CaptionRecord;
use crate::{Error, Result};
use async_trait::async_trait;
use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;

/// MongoDB-backed caption store.
///
/// The driver connects lazily, so construction succeeding does not imply the
/// server is reachable; callers probe with [`CaptionStore::ping`].
pub struct MongoCaptionStore {
    database: Database,
    collection: Collection<CaptionRecord>,
}

impl MongoCaptionStore {
    pub async fn connect(
        uri: &str,
        database_name: &str,
        collection_name: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| Error::Store(format!("Invalid MongoDB URI: {}", e)))?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| Error::Store(format!("Failed to build MongoDB client: {}", e)))?;
        let database = client.database(database_name);
        let collection = database.collection::<CaptionRecord>(collection_name);

        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl CaptionStore for MongoCaptionStore {
    async fn insert(&self, record: &CaptionRecord) -> Result<()> {
        self.collection
            .insert_one(record)
            .await
            .map_err(|e| Error::Store(format!("Failed to insert caption record: {}", e)))?;

        tracing::debug!("Inserted caption record for {}", record.image_url);
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| Error::Store(format!("MongoDB ping failed: {}", e)))?;
        Ok(())
    }
}
