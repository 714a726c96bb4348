pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::LocalStorage;
pub use config::AppConfig;
pub use self::core::{aggregator::ReferralAggregator, brief::BriefService, sessions::SessionCache};
pub use server::{build_router, run_server, AppState};
pub use utils::error::{Result, SleftError};
