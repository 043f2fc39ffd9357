use thiserror::Error;

/// Harness error kinds. Everything a scenario can raise is one of these;
/// the runner catches them at the scenario boundary and converts them into
/// a result so the remaining scenarios still run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Browser process could not launch. Environment fault, not transient:
    /// propagated without retry and fatal to the whole run.
    #[error("failed to start browser session: {0}")]
    SessionStart(String),

    /// A locator resolved to zero matches after the implicit wait.
    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },

    /// A bounded wait expired before its predicate held.
    #[error("timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    /// The scenario's post-condition did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Any underlying browser/driver fault.
    #[error("driver fault: {0:#}")]
    Driver(#[from] anyhow::Error),
}

impl HarnessError {
    /// Assertion failures are real regressions; everything else is an
    /// infrastructure error. The report keeps the two apart.
    pub fn is_assertion(&self) -> bool {
        matches!(self, HarnessError::Assertion(_))
    }

    /// Fatal errors abort the remaining scenarios instead of being isolated.
    pub fn is_fatal(&self) -> bool {
        matches!(self, HarnessError::SessionStart(_))
    }
}

/// Shorthand for the post-condition checks in scenario bodies.
pub fn assertion(msg: impl Into<String>) -> HarnessError {
    HarnessError::Assertion(msg.into())
}
