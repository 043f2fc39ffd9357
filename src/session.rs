use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::driver::{BrowserDriver, Locator, PlaywrightDriver};
use crate::error::HarnessError;

/// Browser session configuration. Defaults mirror the Chrome options the
/// harness has always run the SUT under.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub headless: bool,
    pub disable_sandbox: bool,
    pub disable_shared_memory: bool,
    pub disable_gpu: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Budget for element lookups before `ElementNotFound`.
    pub implicit_wait: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let headless = std::env::var("BLOG_E2E_HEADLESS")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            headless,
            disable_sandbox: true,
            disable_shared_memory: true,
            disable_gpu: true,
            viewport_width: 1920,
            viewport_height: 1080,
            implicit_wait: Duration::from_secs(10),
        }
    }
}

/// Source of browser sessions. The runner depends on this seam so tests can
/// substitute scripted drivers.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn acquire(&self) -> Result<Session, HarnessError>;
}

/// Acquires one browser session per scenario. Sessions are never shared:
/// each scenario must stay independent and order-insensitive.
pub struct SessionManager {
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionProvider for SessionManager {
    async fn acquire(&self) -> Result<Session, HarnessError> {
        let driver = PlaywrightDriver::launch(&self.config).await?;
        Ok(Session::new(Box::new(driver)))
    }
}

/// An exclusive handle to one browser instance for the duration of one
/// scenario. The runner wraps every scenario body in acquire/release, so
/// the session is released on every exit path.
pub struct Session {
    driver: Box<dyn BrowserDriver>,
    released: AtomicBool,
}

impl Session {
    pub fn new(driver: Box<dyn BrowserDriver>) -> Self {
        Self {
            driver,
            released: AtomicBool::new(false),
        }
    }

    pub async fn navigate(&self, url: &str) -> Result<(), HarnessError> {
        self.driver.navigate(url).await
    }

    pub async fn click(&self, locator: &Locator) -> Result<(), HarnessError> {
        self.driver.click(locator).await
    }

    pub async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), HarnessError> {
        self.driver.type_text(locator, text).await
    }

    /// Try-optional-step primitive: click the element if it shows up within
    /// `timeout`, report whether it did. Absence is an outcome, not a
    /// failure — but faults other than a missing element still propagate.
    pub async fn try_click(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<bool, HarnessError> {
        if !self.driver.wait_for(locator, timeout).await? {
            log::debug!("optional element absent, skipping: {}", locator);
            return Ok(false);
        }
        match self.driver.click(locator).await {
            Ok(()) => Ok(true),
            // Raced away between the wait and the click.
            Err(HarnessError::ElementNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<bool, HarnessError> {
        self.driver.wait_for(locator, timeout).await
    }

    pub async fn current_url(&self) -> Result<String, HarnessError> {
        self.driver.current_url().await
    }

    pub async fn page_source(&self) -> Result<String, HarnessError> {
        self.driver.page_source().await
    }

    pub async fn title(&self) -> Result<String, HarnessError> {
        self.driver.title().await
    }

    /// Guaranteed cleanup. Idempotent and never fails: a release error is
    /// logged, not raised, so it cannot mask the scenario's own outcome.
    pub async fn release(&self) {
        if self.released.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.driver.quit().await {
            log::warn!("session release: {}", e);
        }
    }

    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}
