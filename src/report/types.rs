use serde::{Deserialize, Serialize};

use crate::runner::state::{RunReport, RunSummary, ScenarioResult};

/// Persisted run document. This is what `run` writes to disk and what the
/// `report` subcommand reads back, so its shape is the compatibility
/// contract between the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub run_id: String,
    pub scenarios: Vec<ScenarioResult>,
    pub summary: RunSummary,
    pub generated_at: String,
}

impl TestResults {
    pub fn from_report(report: RunReport) -> Self {
        Self {
            run_id: report.run_id,
            scenarios: report.scenarios,
            summary: report.summary,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
