use crate::domain::model::{NewsItem, PlaceResult};
use crate::domain::ports::{NewsSearch, PlacesSearch};
use crate::utils::error::{Result, SleftError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SERPER_ENDPOINT: &str = "https://google.serper.dev";

/// Longest slice of an error body carried into an error message.
const ERROR_BODY_LIMIT: usize = 200;

/// Places and news search over the Serper HTTP API.
#[derive(Debug, Clone)]
pub struct SerperClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct PlacesQuery<'a> {
    q: &'a str,
    location: &'a str,
}

#[derive(Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    places: Vec<PlaceResult>,
}

#[derive(Serialize)]
struct NewsQuery<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    news: Vec<NewsItem>,
}

impl SerperClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn post<B: Serialize + ?Sized>(&self, service: &str, path: &str, body: &B) -> Result<String> {
        let url = format!("{}/{}", self.endpoint, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message: String = text.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(SleftError::ExternalServiceError {
                service: service.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl PlacesSearch for SerperClient {
    async fn search_places(&self, query: &str, location: &str) -> Result<Vec<PlaceResult>> {
        let body = self
            .post("places search", "places", &PlacesQuery { q: query, location })
            .await?;
        let parsed: PlacesResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .places
            .into_iter()
            .filter(|place| !place.title.trim().is_empty())
            .collect())
    }
}

#[async_trait]
impl NewsSearch for SerperClient {
    async fn search_news(&self, query: &str, limit: usize) -> Result<Vec<NewsItem>> {
        let body = self
            .post("news search", "news", &NewsQuery { q: query, num: limit })
            .await?;
        let parsed: NewsResponse = serde_json::from_str(&body)?;

        Ok(parsed.news.into_iter().take(limit).collect())
    }
}
