pub mod adjacency;
pub mod aggregator;
pub mod brief;
pub mod export;
pub mod jitter;
pub mod sessions;

pub use crate::domain::model::{
    Aggregation, BriefRequest, BriefResponse, BriefSummary, ReferralSource,
};
pub use crate::domain::ports::{BriefSink, JitterSource, NewsSearch, PlacesSearch, Storage};
pub use crate::utils::error::Result;
