use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Final outcome of one scenario. Failed means the post-condition did not
/// hold; Errored means infrastructure got in the way (missing element, wait
/// expiry, driver fault). The report keeps them apart so flaky environments
/// are not mistaken for regressions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed { reason: String },
    Errored { error: String },
}

impl Outcome {
    pub fn from_error(error: &HarnessError) -> Self {
        if error.is_assertion() {
            Outcome::Failed {
                reason: error.to_string(),
            }
        } else {
            Outcome::Errored {
                error: error.to_string(),
            }
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// In-flight state for one scenario execution.
#[derive(Debug, Clone)]
pub struct ScenarioState {
    pub name: String,
    pub description: String,
    pub outcome: Option<Outcome>,
    started_at: Option<Instant>,
    pub duration_ms: Option<u64>,
}

impl ScenarioState {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            outcome: None,
            started_at: None,
            duration_ms: None,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    pub fn finish(&mut self, outcome: Outcome) {
        if let Some(start) = self.started_at {
            self.duration_ms = Some(start.elapsed().as_millis() as u64);
        }
        self.outcome = Some(outcome);
    }

    /// Serialize for reporting (Instant is not serializable).
    pub fn to_report(&self) -> ScenarioResult {
        ScenarioResult {
            name: self.name.clone(),
            description: self.description.clone(),
            outcome: self.outcome.clone().unwrap_or(Outcome::Errored {
                error: "scenario never finished".to_string(),
            }),
            duration_ms: self.duration_ms,
        }
    }
}

/// Immutable record of one scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub name: String,
    pub description: String,
    pub outcome: Outcome,
    pub duration_ms: Option<u64>,
}

/// State for an entire suite run.
#[derive(Debug, Clone)]
pub struct RunState {
    pub run_id: String,
    pub scenarios: Vec<ScenarioState>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl RunState {
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            scenarios: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Instant::now());
    }

    pub fn add(&mut self, scenario: ScenarioState) -> &mut ScenarioState {
        self.scenarios.push(scenario);
        self.scenarios.last_mut().expect("just pushed")
    }

    pub fn summary(&self) -> RunSummary {
        let (mut passed, mut failed, mut errored) = (0u32, 0u32, 0u32);
        for s in &self.scenarios {
            match s.outcome {
                Some(Outcome::Passed) => passed += 1,
                Some(Outcome::Failed { .. }) => failed += 1,
                Some(Outcome::Errored { .. }) | None => errored += 1,
            }
        }

        let total_duration_ms = self.started_at.map(|start| {
            self.finished_at
                .unwrap_or_else(Instant::now)
                .duration_since(start)
                .as_millis() as u64
        });

        RunSummary {
            run_id: self.run_id.clone(),
            total: self.scenarios.len() as u32,
            passed,
            failed,
            errored,
            total_duration_ms,
        }
    }

    pub fn to_report(&self) -> RunReport {
        RunReport {
            run_id: self.run_id.clone(),
            scenarios: self.scenarios.iter().map(|s| s.to_report()).collect(),
            summary: self.summary(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run_id: String,
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub errored: u32,
    pub total_duration_ms: Option<u64>,
}

impl RunSummary {
    /// Exit status contract: success only when nothing failed or errored.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub scenarios: Vec<ScenarioResult>,
    pub summary: RunSummary,
}
