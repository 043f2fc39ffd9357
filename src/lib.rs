pub mod config;
pub mod driver;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod wait;

// Re-export common items
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use report::generate_report;
pub use runner::ScenarioRunner;
pub use scenario::catalogue;
