use serde::{Deserialize, Serialize};

/// Rating assumed when the search provider omits one.
pub const DEFAULT_RATING: f64 = 4.0;

/// Reported search radius. The search itself performs no radius filtering.
pub const RADIUS_MILES: u32 = 10;

/// A raw business hit from the places-search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A local news or events item included in a brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A business matched to an adjacent specialty, scored for referral fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSource {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub category: Option<String>,
    pub adjacent_specialty: String,
    pub fit_score: u32,
}

impl ReferralSource {
    pub fn from_place(place: PlaceResult, adjacent_specialty: &str, fit_score: u32) -> Self {
        Self {
            name: place.title,
            address: place.address,
            phone: place.phone_number,
            website: place.website,
            rating: place.rating.unwrap_or(DEFAULT_RATING),
            review_count: place.rating_count.unwrap_or(0),
            category: place.category,
            adjacent_specialty: adjacent_specialty.to_string(),
            fit_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyCount {
    pub specialty: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefSummary {
    pub total_sources: usize,
    pub avg_fit_score: u32,
    pub top_specialty: Option<String>,
    pub radius_miles: u32,
    pub specialty_breakdown: Vec<SpecialtyCount>,
}

/// Ranked sources plus their summary, as produced by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub sources: Vec<ReferralSource>,
    pub summary: BriefSummary,
}

/// Inbound body for brief generation. Fields are optional at the wire level so
/// missing values surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub practice_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefResponse {
    pub specialty: String,
    pub location: String,
    pub practice_name: String,
    pub sources: Vec<ReferralSource>,
    pub summary: BriefSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<NewsItem>>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BriefKind {
    Brief,
    Snapshot,
}

impl BriefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BriefKind::Brief => "brief",
            BriefKind::Snapshot => "snapshot",
        }
    }
}

/// Row written to the hosted database for a generated brief or snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct BriefRecord {
    pub email: Option<String>,
    pub specialty: String,
    pub location: String,
    pub practice_name: String,
    pub total_sources: usize,
    pub avg_fit_score: u32,
    pub top_specialty: Option<String>,
    pub payload: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl BriefRecord {
    pub fn from_response(response: &BriefResponse, email: Option<String>) -> Self {
        Self {
            email,
            specialty: response.specialty.clone(),
            location: response.location.clone(),
            practice_name: response.practice_name.clone(),
            total_sources: response.summary.total_sources,
            avg_fit_score: response.summary.avg_fit_score,
            top_specialty: response.summary.top_specialty.clone(),
            payload: serde_json::to_value(response).unwrap_or(serde_json::Value::Null),
            created_at: response.generated_at,
        }
    }
}
