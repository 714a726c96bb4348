use crate::core::adjacency::search_phrase;
use crate::core::aggregator::ReferralAggregator;
use crate::domain::model::{BriefKind, BriefRecord, BriefRequest, BriefResponse, NewsItem};
use crate::domain::ports::{BriefSink, NewsSearch};
use crate::utils::error::Result;
use crate::utils::validation::{require_field, validate_email};
use std::sync::Arc;

pub const DEFAULT_PRACTICE_NAME: &str = "Your Practice";
pub const MAX_EVENTS: usize = 5;

/// Validated fields shared by briefs and snapshots.
struct ValidRequest<'a> {
    specialty: &'a str,
    location: &'a str,
    email: Option<&'a str>,
    practice_name: &'a str,
}

/// Produces strategy briefs and snapshots: referral sources, summary and,
/// for briefs, local news.
#[derive(Clone)]
pub struct BriefService {
    aggregator: ReferralAggregator,
    news: Arc<dyn NewsSearch>,
    sink: Arc<dyn BriefSink>,
}

impl BriefService {
    pub fn new(
        aggregator: ReferralAggregator,
        news: Arc<dyn NewsSearch>,
        sink: Arc<dyn BriefSink>,
    ) -> Self {
        Self {
            aggregator,
            news,
            sink,
        }
    }

    pub async fn generate_brief(&self, request: &BriefRequest) -> Result<BriefResponse> {
        let valid = validate_request(request, false)?;
        let mut response = self.build(&valid).await?;
        response.events = Some(self.local_events(valid.specialty, valid.location).await);

        self.persist(BriefKind::Brief, &response, valid.email).await;
        Ok(response)
    }

    /// Like a brief without the news section; an email address is required.
    pub async fn generate_snapshot(&self, request: &BriefRequest) -> Result<BriefResponse> {
        let valid = validate_request(request, true)?;
        let response = self.build(&valid).await?;

        self.persist(BriefKind::Snapshot, &response, valid.email).await;
        Ok(response)
    }

    async fn build(&self, valid: &ValidRequest<'_>) -> Result<BriefResponse> {
        let aggregation = self
            .aggregator
            .aggregate(valid.specialty, valid.location)
            .await?;

        Ok(BriefResponse {
            specialty: valid.specialty.to_string(),
            location: valid.location.to_string(),
            practice_name: valid.practice_name.to_string(),
            sources: aggregation.sources,
            summary: aggregation.summary,
            events: None,
            generated_at: chrono::Utc::now(),
        })
    }

    async fn local_events(&self, specialty: &str, location: &str) -> Vec<NewsItem> {
        let query = format!("{} {}", search_phrase(specialty), location);
        match self.news.search_news(&query, MAX_EVENTS).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("News search for '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn persist(&self, kind: BriefKind, response: &BriefResponse, email: Option<&str>) {
        let record = BriefRecord::from_response(response, email.map(str::to_string));
        if let Err(e) = self.sink.record(kind, &record).await {
            tracing::warn!("Failed to store {}: {}", kind.as_str(), e);
        }
    }
}

fn validate_request(request: &BriefRequest, email_required: bool) -> Result<ValidRequest<'_>> {
    require_field("specialty", &request.specialty)?;
    // looked up as sent; table keys match exactly
    let specialty = request.specialty.as_deref().unwrap_or_default();
    let location = require_field("location", &request.location)?;

    let email = if email_required {
        Some(require_field("email", &request.email)?)
    } else {
        request
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    };
    if let Some(email) = email {
        validate_email("email", email)?;
    }

    let practice_name = request
        .practice_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PRACTICE_NAME);

    Ok(ValidRequest {
        specialty,
        location,
        email,
        practice_name,
    })
}
