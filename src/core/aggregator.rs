use crate::core::adjacency::{calculate_fit_score_with, get_adjacent_specialties, search_phrase};
use crate::core::jitter::ThreadRngJitter;
use crate::domain::model::{
    Aggregation, BriefSummary, PlaceResult, ReferralSource, SpecialtyCount, RADIUS_MILES,
};
use crate::domain::ports::{JitterSource, PlacesSearch};
use crate::utils::error::{Result, SleftError};
use std::sync::Arc;

/// Adjacent specialties searched per request, in priority order.
pub const MAX_ADJACENT_SPECIALTIES: usize = 4;
pub const MAX_RESULTS_PER_SPECIALTY: usize = 4;
pub const MAX_TOTAL_SOURCES: usize = 15;

/// Looks up partners for a specialty, searches each one near a location and
/// ranks the combined results by fit score.
#[derive(Clone)]
pub struct ReferralAggregator {
    search: Arc<dyn PlacesSearch>,
    jitter: Arc<dyn JitterSource>,
}

impl ReferralAggregator {
    pub fn new(search: Arc<dyn PlacesSearch>) -> Self {
        Self {
            search,
            jitter: Arc::new(ThreadRngJitter),
        }
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Search failures are logged and count as zero results for that
    /// specialty; only an unknown specialty is an error.
    pub async fn aggregate(&self, specialty: &str, location: &str) -> Result<Aggregation> {
        let adjacent = get_adjacent_specialties(specialty);
        if adjacent.is_empty() {
            return Err(SleftError::UnknownSpecialty {
                specialty: specialty.to_string(),
            });
        }

        let mut collected: Vec<(&'static str, PlaceResult)> = Vec::new();

        // the overall cap is enforced per result; it can stop mid-specialty
        'specialties: for &partner in adjacent.iter().take(MAX_ADJACENT_SPECIALTIES) {
            let query = search_phrase(partner);
            tracing::debug!("Searching '{}' near {}", query, location);

            let places = match self.search.search_places(&query, location).await {
                Ok(places) => places,
                Err(e) => {
                    tracing::warn!("Places search for {} failed: {}", partner, e);
                    continue;
                }
            };
            tracing::debug!("{} results for {}", places.len(), partner);

            for place in places.into_iter().take(MAX_RESULTS_PER_SPECIALTY) {
                if collected.len() >= MAX_TOTAL_SOURCES {
                    break 'specialties;
                }
                collected.push((partner, place));
            }
        }

        let mut sources: Vec<ReferralSource> = collected
            .into_iter()
            .map(|(partner, place)| {
                let score = calculate_fit_score_with(specialty, partner, self.jitter.as_ref());
                ReferralSource::from_place(place, partner, score)
            })
            .collect();

        let summary = summarize(&sources);

        // stable: equal scores keep discovery order
        sources.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));

        tracing::info!(
            "Aggregated {} referral sources for {} in {} (avg fit {})",
            summary.total_sources,
            specialty,
            location,
            summary.avg_fit_score
        );

        Ok(Aggregation { sources, summary })
    }
}

/// Summary statistics over `sources` in the order given. The plurality
/// specialty goes to the first one encountered on a tie.
pub fn summarize(sources: &[ReferralSource]) -> BriefSummary {
    let mut breakdown: Vec<SpecialtyCount> = Vec::new();
    for source in sources {
        match breakdown
            .iter_mut()
            .find(|c| c.specialty == source.adjacent_specialty)
        {
            Some(entry) => entry.count += 1,
            None => breakdown.push(SpecialtyCount {
                specialty: source.adjacent_specialty.clone(),
                count: 1,
            }),
        }
    }

    let mut top: Option<&SpecialtyCount> = None;
    for entry in &breakdown {
        if top.map_or(true, |t| entry.count > t.count) {
            top = Some(entry);
        }
    }

    let avg_fit_score = if sources.is_empty() {
        0
    } else {
        let total: u64 = sources.iter().map(|s| u64::from(s.fit_score)).sum();
        (total as f64 / sources.len() as f64).round() as u32
    };

    BriefSummary {
        total_sources: sources.len(),
        avg_fit_score,
        top_specialty: top.map(|t| t.specialty.clone()),
        radius_miles: RADIUS_MILES,
        specialty_breakdown: breakdown,
    }
}
