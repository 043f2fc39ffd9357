//! Chromium driver implementation using Playwright.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use playwright::api::{Browser, BrowserContext, Page, Viewport};
use playwright::Playwright;
use tokio::sync::Mutex;

use crate::driver::traits::{BrowserDriver, Locator};
use crate::error::HarnessError;
use crate::session::SessionConfig;

/// Web driver backed by a Playwright-controlled Chromium instance. One
/// instance per scenario; the runner never shares it across scenarios.
pub struct PlaywrightDriver {
    #[allow(dead_code)]
    playwright: Playwright,
    browser: Browser,
    #[allow(dead_code)]
    context: BrowserContext,
    page: Page,
    implicit_wait: Duration,
    closed: Mutex<bool>,
}

impl PlaywrightDriver {
    /// Launch a fresh headless Chromium. Launch failures are environment
    /// faults and surface as `SessionStart`, never retried here.
    pub async fn launch(config: &SessionConfig) -> Result<Self, HarnessError> {
        let playwright = Playwright::initialize()
            .await
            .map_err(|e| HarnessError::SessionStart(format!("playwright init: {}", e)))?;

        let chromium = playwright.chromium();
        let args = chromium_args(config);
        let browser = chromium
            .launcher()
            .headless(config.headless)
            .args(&args)
            .launch()
            .await
            .map_err(|e| HarnessError::SessionStart(format!("chromium launch: {}", e)))?;

        let context = browser
            .context_builder()
            .build()
            .await
            .map_err(|e| HarnessError::SessionStart(format!("browser context: {}", e)))?;

        let page = context
            .new_page()
            .await
            .map_err(|e| HarnessError::SessionStart(format!("new page: {}", e)))?;

        page.set_viewport_size(Viewport {
            width: config.viewport_width as i32,
            height: config.viewport_height as i32,
        })
        .await
        .map_err(|e| HarnessError::SessionStart(format!("viewport: {}", e)))?;

        log::debug!(
            "chromium up (headless: {}, viewport: {}x{})",
            config.headless,
            config.viewport_width,
            config.viewport_height
        );

        Ok(Self {
            playwright,
            browser,
            context,
            page,
            implicit_wait: config.implicit_wait,
            closed: Mutex::new(false),
        })
    }

    /// Wait for the first match within `timeout`, or `None` if it never
    /// appears.
    async fn await_element(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Option<playwright::api::ElementHandle>, HarnessError> {
        let sel = to_playwright_selector(locator);
        let result = self
            .page
            .wait_for_selector_builder(&sel)
            .timeout(timeout.as_millis() as f64)
            .wait_for_selector()
            .await;

        match result {
            Ok(found) => Ok(found),
            // Playwright reports wait expiry as an error; the caller decides
            // whether absence is fatal.
            Err(_) => Ok(None),
        }
    }

    async fn require_element(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<playwright::api::ElementHandle, HarnessError> {
        self.await_element(locator, timeout)
            .await?
            .ok_or_else(|| HarnessError::ElementNotFound {
                locator: locator.to_string(),
            })
    }
}

#[async_trait]
impl BrowserDriver for PlaywrightDriver {
    async fn navigate(&self, url: &str) -> Result<(), HarnessError> {
        log::debug!("navigate: {}", url);
        self.page
            .goto_builder(url)
            .goto()
            .await
            .with_context(|| format!("navigate to {}", url))?;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<(), HarnessError> {
        let element = self
            .require_element(locator, self.implicit_wait)
            .await?;
        element
            .click_builder()
            .click()
            .await
            .with_context(|| format!("click {}", locator))?;
        Ok(())
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), HarnessError> {
        let element = self
            .require_element(locator, self.implicit_wait)
            .await?;
        element
            .fill_builder(text)
            .fill()
            .await
            .with_context(|| format!("type into {}", locator))?;
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<bool, HarnessError> {
        Ok(self.await_element(locator, timeout).await?.is_some())
    }

    async fn current_url(&self) -> Result<String, HarnessError> {
        let url = self.page.url().context("read current url")?;
        Ok(url)
    }

    async fn page_source(&self) -> Result<String, HarnessError> {
        let html = self.page.content().await.context("read page source")?;
        Ok(html)
    }

    async fn title(&self) -> Result<String, HarnessError> {
        let title: String = self
            .page
            .evaluate("() => document.title", ())
            .await
            .context("read page title")?;
        Ok(title)
    }

    async fn quit(&self) -> Result<(), HarnessError> {
        let mut closed = self.closed.lock().await;
        if *closed {
            return Ok(());
        }
        *closed = true;

        if let Err(e) = self.browser.close().await {
            // Session release must not fail; a dead browser is already quit.
            log::warn!("browser close: {}", e);
        }
        Ok(())
    }
}

fn chromium_args(config: &SessionConfig) -> Vec<String> {
    let mut args = Vec::new();
    if config.disable_sandbox {
        args.push("--no-sandbox".to_string());
        args.push("--disable-setuid-sandbox".to_string());
    }
    if config.disable_shared_memory {
        args.push("--disable-dev-shm-usage".to_string());
    }
    if config.disable_gpu {
        args.push("--disable-gpu".to_string());
    }
    args
}

/// Map a harness locator to a Playwright selector string.
fn to_playwright_selector(locator: &Locator) -> String {
    match locator {
        Locator::LinkText(text) => format!("a:text(\"{}\")", text),
        Locator::Name(name) => format!("[name=\"{}\"]", name),
        Locator::Css(css) => css.clone(),
        Locator::ButtonText(text) => {
            format!("xpath=//button[contains(text(), \"{}\")]", text)
        }
    }
}
