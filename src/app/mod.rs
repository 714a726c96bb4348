// Application layer: wires adapters into the core services from one AppConfig.

use crate::adapters::{DemoSearch, NoopSink, SerperClient, SupabaseSink};
use crate::config::AppConfig;
use crate::core::aggregator::ReferralAggregator;
use crate::core::brief::BriefService;
use crate::core::jitter::{SeededJitter, ThreadRngJitter};
use crate::domain::ports::{BriefSink, JitterSource, NewsSearch, PlacesSearch};
use crate::utils::error::Result;
use std::sync::Arc;

/// Search adapters for the configured key, or demo data without one.
pub fn build_search(config: &AppConfig) -> Result<(Arc<dyn PlacesSearch>, Arc<dyn NewsSearch>)> {
    match config.search_api_key() {
        Some(key) => {
            let client = Arc::new(SerperClient::new(
                &config.search.endpoint,
                key,
                config.search_timeout(),
            )?);
            tracing::info!("🔍 Places search via {}", config.search.endpoint);
            let places: Arc<dyn PlacesSearch> = client.clone();
            let news: Arc<dyn NewsSearch> = client;
            Ok((places, news))
        }
        None => {
            tracing::warn!("No search API key configured; using demo referral data");
            let places: Arc<dyn PlacesSearch> = Arc::new(DemoSearch);
            let news: Arc<dyn NewsSearch> = Arc::new(DemoSearch);
            Ok((places, news))
        }
    }
}

pub fn build_sink(config: &AppConfig) -> Result<Arc<dyn BriefSink>> {
    match config.persistence() {
        Some(p) => {
            tracing::info!("💾 Persisting briefs to {}", p.supabase_url);
            Ok(Arc::new(SupabaseSink::new(
                &p.supabase_url,
                &p.supabase_key,
                &p.briefs_table,
                &p.snapshots_table,
                config.search_timeout(),
            )?))
        }
        None => Ok(Arc::new(NoopSink)),
    }
}

pub fn build_jitter(seed: Option<u64>) -> Arc<dyn JitterSource> {
    match seed {
        Some(seed) => Arc::new(SeededJitter::new(seed)),
        None => Arc::new(ThreadRngJitter),
    }
}

pub fn build_brief_service(config: &AppConfig) -> Result<BriefService> {
    let (places, news) = build_search(config)?;
    let aggregator = ReferralAggregator::new(places).with_jitter(build_jitter(config.search.seed));
    Ok(BriefService::new(aggregator, news, build_sink(config)?))
}
