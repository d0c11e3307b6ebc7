pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod membership;
pub mod types;

// Application use cases and the ports they depend on
pub mod app;
// Adapters for CSV files, HTTP and the YouTube Data API
pub mod infra;

pub use app::enrich_use_case::EnrichUseCase;
pub use app::import_use_case::{get_members_from_csv, ImportUseCase};
pub use error::{MembershipError, Result};
pub use types::{ExtraInfo, MemberList, MemberRecord};
