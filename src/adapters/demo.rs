use crate::domain::model::{NewsItem, PlaceResult};
use crate::domain::ports::{NewsSearch, PlacesSearch};
use crate::utils::error::Result;
use async_trait::async_trait;

const DEMO_SUFFIXES: [&str; 3] = ["Associates", "Partners", "Wellness Center"];

/// Synthetic search results used when no search API key is configured.
/// Output is deterministic for a given query and location.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoSearch;

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn city_of(location: &str) -> &str {
    location.split(',').next().map(str::trim).unwrap_or(location)
}

#[async_trait]
impl PlacesSearch for DemoSearch {
    async fn search_places(&self, query: &str, location: &str) -> Result<Vec<PlaceResult>> {
        let city = city_of(location);
        let label = title_case(query);

        Ok(DEMO_SUFFIXES
            .iter()
            .enumerate()
            .map(|(i, suffix)| PlaceResult {
                title: format!("{} {} {}", city, label, suffix),
                address: format!("{} Main St, {}", 100 + i * 120, location),
                rating: Some(4.2 + 0.2 * i as f64),
                rating_count: Some(18 + 23 * i as u32),
                phone_number: Some(format!("(555) 010-{:04}", 1000 + i)),
                website: None,
                category: Some(label.clone()),
            })
            .collect())
    }
}

#[async_trait]
impl NewsSearch for DemoSearch {
    async fn search_news(&self, _query: &str, _limit: usize) -> Result<Vec<NewsItem>> {
        Ok(Vec::new())
    }
}
