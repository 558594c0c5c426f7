use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::PredictionRecord;

/// Errors that can occur when writing to the document store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store returned error: {0}")]
    Api(String),
}

/// Document-store client for prediction records.
///
/// Writes are single-document inserts into the configured collection; the
/// store enforces no schema and records are never updated or deleted. Each
/// insert is an independent request, so a store outage degrades logging
/// without touching the prediction path.
pub struct RecordStore {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    collection: String,
    client: Client,
}

impl RecordStore {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collection: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            collection,
            client,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collection
        )
    }

    /// Append one prediction record
    pub async fn insert_record(&self, record: &PredictionRecord) -> Result<(), StoreError> {
        let url = self.documents_url();

        let mut payload = serde_json::to_value(record).unwrap();
        if let Some(obj) = payload.as_object_mut() {
            obj.insert(
                "$id".to_string(),
                Value::String(uuid::Uuid::new_v4().to_string()),
            );
        }

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Api(format!(
                "Failed to insert record: {}",
                response.status()
            )));
        }

        tracing::debug!(
            "Recorded {} prediction: {}",
            record.model_family.as_str(),
            record.prediction
        );

        Ok(())
    }

    /// Fetch recent records for a collection listing (debugging/analysis)
    pub async fn list_records(&self, limit: usize) -> Result<Vec<Value>, StoreError> {
        let queries_json = format!(r#"["limit({})"]"#, limit);
        let encoded = urlencoding::encode(&queries_json);
        let url = format!("{}?query={}", self.documents_url(), encoded);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StoreError::Api(format!(
                "Failed to list records: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(documents)
    }

    /// Health check for the store connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_store_creation() {
        let store = RecordStore::new(
            "https://store.test/v1".to_string(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            "predictions".to_string(),
        );

        assert_eq!(store.base_url, "https://store.test/v1");
        assert_eq!(
            store.documents_url(),
            "https://store.test/v1/databases/test_db/collections/predictions/documents"
        );
    }
}
