use crate::domain::model::{BriefKind, BriefRecord, NewsItem, PlaceResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination for exported files, addressed by relative path.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Places-search provider: one call per (query, location).
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn search_places(&self, query: &str, location: &str) -> Result<Vec<PlaceResult>>;
}

#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search_news(&self, query: &str, limit: usize) -> Result<Vec<NewsItem>>;
}

/// Best-effort persistence target for generated briefs and snapshots.
#[async_trait]
pub trait BriefSink: Send + Sync {
    async fn record(&self, kind: BriefKind, record: &BriefRecord) -> Result<()>;
}

/// Source of the fit-score jitter. Implementations must return a value in
/// `[-max, max]`.
pub trait JitterSource: Send + Sync {
    fn jitter(&self, max: i32) -> i32;
}
