use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::HarnessError;

/// Element locator for the SUT's pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Anchor with exact visible text, e.g. the "Sign Up" navigation link.
    LinkText(String),
    /// Form control by its `name` attribute.
    Name(String),
    /// Raw CSS selector, used for the submit control.
    Css(String),
    /// Button whose text contains the given substring (xpath text-contains).
    ButtonText(String),
}

impl Locator {
    pub fn link_text(text: &str) -> Self {
        Locator::LinkText(text.to_string())
    }

    pub fn name(attr: &str) -> Self {
        Locator::Name(attr.to_string())
    }

    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_string())
    }

    pub fn button_text(text: &str) -> Self {
        Locator::ButtonText(text.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::LinkText(t) => write!(f, "link text \"{}\"", t),
            Locator::Name(n) => write!(f, "name \"{}\"", n),
            Locator::Css(c) => write!(f, "css \"{}\"", c),
            Locator::ButtonText(t) => write!(f, "button containing \"{}\"", t),
        }
    }
}

/// Remote browser-control boundary. The harness drives the SUT exclusively
/// through this trait; the production implementation is Chromium via
/// Playwright, tests substitute a scripted fake.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Load an absolute URL.
    async fn navigate(&self, url: &str) -> Result<(), HarnessError>;

    /// Click the first match. `ElementNotFound` if nothing matches within
    /// the implicit wait.
    async fn click(&self, locator: &Locator) -> Result<(), HarnessError>;

    /// Type into the first matching form control. `ElementNotFound` if
    /// nothing matches within the implicit wait.
    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), HarnessError>;

    /// Poll for element presence; `Ok(false)` when the timeout elapses
    /// without a match.
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<bool, HarnessError>;

    async fn current_url(&self) -> Result<String, HarnessError>;

    async fn page_source(&self) -> Result<String, HarnessError>;

    async fn title(&self) -> Result<String, HarnessError>;

    /// Tear the browser down. Must tolerate being called more than once.
    async fn quit(&self) -> Result<(), HarnessError>;
}
