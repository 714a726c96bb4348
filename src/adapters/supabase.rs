use crate::domain::model::{BriefKind, BriefRecord};
use crate::domain::ports::BriefSink;
use crate::utils::error::{Result, SleftError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Inserts brief and snapshot rows through the hosted database's REST API.
#[derive(Debug, Clone)]
pub struct SupabaseSink {
    client: Client,
    base_url: String,
    api_key: String,
    briefs_table: String,
    snapshots_table: String,
}

impl SupabaseSink {
    pub fn new(
        base_url: &str,
        api_key: &str,
        briefs_table: &str,
        snapshots_table: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            briefs_table: briefs_table.to_string(),
            snapshots_table: snapshots_table.to_string(),
        })
    }

    fn table_for(&self, kind: BriefKind) -> &str {
        match kind {
            BriefKind::Brief => &self.briefs_table,
            BriefKind::Snapshot => &self.snapshots_table,
        }
    }
}

#[async_trait]
impl BriefSink for SupabaseSink {
    async fn record(&self, kind: BriefKind, record: &BriefRecord) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, self.table_for(kind));

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SleftError::ExternalServiceError {
                service: "database".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!("Stored {} for {}", kind.as_str(), record.specialty);
        Ok(())
    }
}

/// Sink used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl BriefSink for NoopSink {
    async fn record(&self, kind: BriefKind, _record: &BriefRecord) -> Result<()> {
        tracing::debug!("No database configured; {} not stored", kind.as_str());
        Ok(())
    }
}
