// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod demo;
pub mod serper;
pub mod storage;
pub mod supabase;

pub use demo::DemoSearch;
pub use serper::SerperClient;
pub use storage::LocalStorage;
pub use supabase::{NoopSink, SupabaseSink};
