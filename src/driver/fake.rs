//! Scripted in-memory driver for unit tests. No browser involved.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::driver::traits::{BrowserDriver, Locator};
use crate::error::HarnessError;

#[derive(Default)]
struct FakeState {
    url: String,
    title: String,
    source: String,
    present: HashSet<String>,
    /// FIFO of (locator, url-after-click) consumed as clicks land.
    transitions: Vec<(String, String)>,
    /// navigate(from) lands at to, emulating a server-side redirect.
    redirects: Vec<(String, String)>,
    clicks: Vec<Locator>,
    typed: Vec<(Locator, String)>,
    quit_count: usize,
    fail_next_click: Option<String>,
}

pub struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    pub fn new(url: &str) -> Self {
        Self {
            state: Mutex::new(FakeState {
                url: url.to_string(),
                ..FakeState::default()
            }),
        }
    }

    pub fn with_element(self, locator: Locator) -> Self {
        self.state
            .lock()
            .unwrap()
            .present
            .insert(locator.to_string());
        self
    }

    pub fn with_title(self, title: &str) -> Self {
        self.state.lock().unwrap().title = title.to_string();
        self
    }

    pub fn with_source(self, source: &str) -> Self {
        self.state.lock().unwrap().source = source.to_string();
        self
    }

    /// Next click on `locator` moves the page to `url`.
    pub fn with_transition(self, locator: &Locator, url: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .transitions
            .push((locator.to_string(), url.to_string()));
        self
    }

    /// Navigations to `from` land at `to` instead.
    pub fn with_redirect(self, from: &str, to: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .redirects
            .push((from.to_string(), to.to_string()));
        self
    }

    /// Next click on `locator` raises a driver fault.
    pub fn with_failing_click(self, locator: &Locator) -> Self {
        self.state.lock().unwrap().fail_next_click = Some(locator.to_string());
        self
    }

    pub fn quit_count(&self) -> usize {
        self.state.lock().unwrap().quit_count
    }

    pub fn clicks(&self) -> Vec<Locator> {
        self.state.lock().unwrap().clicks.clone()
    }

    pub fn typed(&self) -> Vec<(Locator, String)> {
        self.state.lock().unwrap().typed.clone()
    }
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    async fn navigate(&self, url: &str) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        let landed = state
            .redirects
            .iter()
            .find(|(from, _)| from == url)
            .map(|(_, to)| to.clone())
            .unwrap_or_else(|| url.to_string());
        state.url = landed;
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        let key = locator.to_string();

        if state.fail_next_click.as_deref() == Some(key.as_str()) {
            state.fail_next_click = None;
            return Err(HarnessError::Driver(anyhow::anyhow!(
                "scripted click fault on {}",
                key
            )));
        }
        if !state.present.contains(&key) {
            return Err(HarnessError::ElementNotFound { locator: key });
        }

        state.clicks.push(locator.clone());
        if let Some(pos) = state.transitions.iter().position(|(l, _)| *l == key) {
            let (_, next) = state.transitions.remove(pos);
            state.url = next;
        }
        Ok(())
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), HarnessError> {
        let mut state = self.state.lock().unwrap();
        let key = locator.to_string();
        if !state.present.contains(&key) {
            return Err(HarnessError::ElementNotFound { locator: key });
        }
        state.typed.push((locator.clone(), text.to_string()));
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, _timeout: Duration) -> Result<bool, HarnessError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .present
            .contains(&locator.to_string()))
    }

    async fn current_url(&self) -> Result<String, HarnessError> {
        Ok(self.state.lock().unwrap().url.clone())
    }

    async fn page_source(&self) -> Result<String, HarnessError> {
        Ok(self.state.lock().unwrap().source.clone())
    }

    async fn title(&self) -> Result<String, HarnessError> {
        Ok(self.state.lock().unwrap().title.clone())
    }

    async fn quit(&self) -> Result<(), HarnessError> {
        self.state.lock().unwrap().quit_count += 1;
        Ok(())
    }
}

#[async_trait]
impl<D: BrowserDriver> BrowserDriver for Arc<D> {
    async fn navigate(&self, url: &str) -> Result<(), HarnessError> {
        self.as_ref().navigate(url).await
    }
    async fn click(&self, locator: &Locator) -> Result<(), HarnessError> {
        self.as_ref().click(locator).await
    }
    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), HarnessError> {
        self.as_ref().type_text(locator, text).await
    }
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<bool, HarnessError> {
        self.as_ref().wait_for(locator, timeout).await
    }
    async fn current_url(&self) -> Result<String, HarnessError> {
        self.as_ref().current_url().await
    }
    async fn page_source(&self) -> Result<String, HarnessError> {
        self.as_ref().page_source().await
    }
    async fn title(&self) -> Result<String, HarnessError> {
        self.as_ref().title().await
    }
    async fn quit(&self) -> Result<(), HarnessError> {
        self.as_ref().quit().await
    }
}
