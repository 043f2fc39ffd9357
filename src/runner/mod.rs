pub mod events;
pub mod state;

use uuid::Uuid;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::scenario::Scenario;
use crate::session::SessionProvider;

use events::{EventEmitter, RunEvent};
use state::{Outcome, RunReport, RunState, ScenarioState};

pub use events::ConsoleEventListener;
pub use state::{RunSummary, ScenarioResult};

/// Runs scenarios sequentially, one live browser session at a time. Faults
/// are isolated per scenario: a failing or erroring scenario never prevents
/// the remaining ones from running. Only a session launch failure aborts the
/// run, since nothing further could execute anyway.
pub struct ScenarioRunner {
    provider: Box<dyn SessionProvider>,
    config: HarnessConfig,
    emitter: EventEmitter,
    listener: Option<tokio::task::JoinHandle<()>>,
}

impl ScenarioRunner {
    pub fn new(provider: Box<dyn SessionProvider>, config: HarnessConfig) -> Self {
        let emitter = EventEmitter::new();
        let listener = tokio::spawn(ConsoleEventListener::listen(emitter.subscribe()));
        Self {
            provider,
            config,
            emitter,
            listener: Some(listener),
        }
    }

    #[cfg(test)]
    fn without_console(provider: Box<dyn SessionProvider>, config: HarnessConfig) -> Self {
        Self {
            provider,
            config,
            emitter: EventEmitter::new(),
            listener: None,
        }
    }

    /// Execute every scenario and aggregate one result each.
    pub async fn run_all(mut self, scenarios: &[Scenario]) -> Result<RunReport, HarnessError> {
        let mut run = RunState::new(&Uuid::new_v4().to_string());
        run.start();

        self.emitter.emit(RunEvent::RunStarted {
            run_id: run.run_id.clone(),
            scenario_count: scenarios.len(),
            base_url: self.config.base_url.clone(),
        });

        let total = scenarios.len();
        for (index, scenario) in scenarios.iter().enumerate() {
            self.emitter.emit(RunEvent::ScenarioStarted {
                name: scenario.name.to_string(),
                description: scenario.description.to_string(),
                index,
                total,
            });

            let state = run.add(ScenarioState::new(scenario.name, scenario.description));
            state.start();

            // Fresh session per scenario; launch failure is an environment
            // fault and aborts the whole run.
            let session = self.provider.acquire().await?;

            let outcome = match scenario.run(&session, &self.config).await {
                Ok(()) => Outcome::Passed,
                Err(e) => {
                    log::debug!("{}: {}", scenario.name, e);
                    Outcome::from_error(&e)
                }
            };

            // Guaranteed cleanup on every exit path, idempotent.
            session.release().await;

            state.finish(outcome.clone());
            self.emitter.emit(RunEvent::ScenarioFinished {
                name: scenario.name.to_string(),
                outcome,
                duration_ms: state.duration_ms.unwrap_or(0),
            });
        }

        run.finish();
        self.emitter.emit(RunEvent::RunFinished {
            summary: run.summary(),
        });

        // Closing the channel ends the listener's recv loop once it has
        // drained, so the final summary is printed before we return.
        drop(self.emitter);
        if let Some(listener) = self.listener.take() {
            let _ = listener.await;
        }

        Ok(run.to_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::fake::FakeDriver;
    use crate::driver::Locator;
    use crate::error::assertion;
    use crate::scenario;
    use crate::session::Session;
    use async_trait::async_trait;
    use futures::future::BoxFuture;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const BASE: &str = "http://localhost:3000";

    /// Hands out sessions over scripted drivers and remembers every driver
    /// it created so tests can check release behavior.
    struct FakeProvider {
        make: Box<dyn Fn() -> FakeDriver + Send + Sync>,
        created: Mutex<Vec<Arc<FakeDriver>>>,
    }

    impl FakeProvider {
        fn new(make: impl Fn() -> FakeDriver + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                make: Box::new(make),
                created: Mutex::new(Vec::new()),
            })
        }

        fn drivers(&self) -> Vec<Arc<FakeDriver>> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SessionProvider for Arc<FakeProvider> {
        async fn acquire(&self) -> Result<Session, HarnessError> {
            let driver = Arc::new((self.make)());
            self.created.lock().unwrap().push(driver.clone());
            Ok(Session::new(Box::new(driver)))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SessionProvider for FailingProvider {
        async fn acquire(&self) -> Result<Session, HarnessError> {
            Err(HarnessError::SessionStart("no chromium".to_string()))
        }
    }

    fn test_config() -> HarnessConfig {
        let mut config = HarnessConfig::default().with_base_url(BASE);
        config.wait_timeout = Duration::from_millis(20);
        config.poll_interval = Duration::from_millis(5);
        config.grace_delay = Duration::from_millis(5);
        config
    }

    fn passing<'a>(
        s: &'a Session,
        c: &'a HarnessConfig,
    ) -> BoxFuture<'a, Result<(), HarnessError>> {
        let _ = (s, c);
        Box::pin(async { Ok(()) })
    }

    fn asserting<'a>(
        _: &'a Session,
        _: &'a HarnessConfig,
    ) -> BoxFuture<'a, Result<(), HarnessError>> {
        Box::pin(async { Err(assertion("post-condition did not hold")) })
    }

    fn erroring<'a>(
        _: &'a Session,
        _: &'a HarnessConfig,
    ) -> BoxFuture<'a, Result<(), HarnessError>> {
        Box::pin(async {
            Err(HarnessError::ElementNotFound {
                locator: Locator::link_text("Sign Up").to_string(),
            })
        })
    }

    #[tokio::test]
    async fn every_scenario_yields_one_result_and_faults_are_isolated() {
        let provider = FakeProvider::new(|| FakeDriver::new(BASE));
        let runner =
            ScenarioRunner::without_console(Box::new(provider.clone()), test_config());

        let scenarios = vec![
            scenario::Scenario::new("first", "", passing),
            scenario::Scenario::new("second", "", asserting),
            scenario::Scenario::new("third", "", erroring),
            scenario::Scenario::new("fourth", "", passing),
        ];

        let report = runner.run_all(&scenarios).await.unwrap();
        assert_eq!(report.scenarios.len(), 4);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.errored, 1);
        assert!(!report.summary.all_passed());

        // One session per scenario, each released exactly once.
        let drivers = provider.drivers();
        assert_eq!(drivers.len(), 4);
        for driver in drivers {
            assert_eq!(driver.quit_count(), 1);
        }
    }

    #[tokio::test]
    async fn session_launch_failure_aborts_the_run() {
        let runner = ScenarioRunner::without_console(Box::new(FailingProvider), test_config());
        let scenarios = vec![scenario::Scenario::new("first", "", passing)];

        let err = runner.run_all(&scenarios).await.unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn run_all_joins_the_console_listener_without_a_fixed_delay() {
        let provider = FakeProvider::new(|| FakeDriver::new(BASE));
        let runner = ScenarioRunner::new(Box::new(provider.clone()), test_config());
        let scenarios = vec![scenario::Scenario::new("first", "", passing)];

        let start = std::time::Instant::now();
        let report = runner.run_all(&scenarios).await.unwrap();
        assert_eq!(report.summary.passed, 1);
        // The listener exits as soon as the channel closes and drains.
        assert!(start.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn forced_signup_failure_does_not_block_later_scenarios() {
        // A bare SUT page: the signup scenario errors on a missing form, yet
        // every catalogue entry still reports.
        let provider = FakeProvider::new(|| FakeDriver::new(BASE));
        let runner =
            ScenarioRunner::without_console(Box::new(provider.clone()), test_config());

        let catalogue = scenario::catalogue();
        let report = runner.run_all(&catalogue).await.unwrap();

        assert_eq!(report.scenarios.len(), catalogue.len());
        let signup = report
            .scenarios
            .iter()
            .find(|s| s.name == "signup-valid-credentials")
            .unwrap();
        assert!(!signup.outcome.is_pass());

        // Scenarios after the signup failure still produced results.
        assert!(report.scenarios.iter().any(|s| s.name == "about-page"));
        for driver in provider.drivers() {
            assert_eq!(driver.quit_count(), 1);
        }
    }
}
