//! The scenario catalogue: ten independently runnable user-flow checks.
//!
//! Each scenario is a linear sequence of driver actions interleaved with
//! bounded waits, ending in a post-condition assertion. Scenarios own their
//! session exclusively and generate fresh credentials, so they stay
//! order-insensitive and re-runnable against an unchanged SUT.

pub mod auth;
pub mod content;

use futures::future::BoxFuture;

use crate::config::HarnessConfig;
use crate::driver::Locator;
use crate::error::HarnessError;
use crate::session::Session;
use crate::wait::WaitStrategy;

type ScenarioFn =
    for<'a> fn(&'a Session, &'a HarnessConfig) -> BoxFuture<'a, Result<(), HarnessError>>;

/// One named, independently verifiable flow. Defined statically, run by the
/// scenario runner, produces exactly one result.
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl Scenario {
    pub(crate) fn new(name: &'static str, description: &'static str, run: ScenarioFn) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    pub async fn run(
        &self,
        session: &Session,
        config: &HarnessConfig,
    ) -> Result<(), HarnessError> {
        (self.run)(session, config).await
    }
}

/// The full suite, in source order. The runner isolates failures, so order
/// only affects reporting.
pub fn catalogue() -> Vec<Scenario> {
    vec![
        Scenario::new(
            "homepage-loads",
            "Homepage loads without errors",
            |s, c| Box::pin(content::homepage_loads(s, c)),
        ),
        Scenario::new(
            "navigate-to-signup",
            "Sign Up link reaches the signup page",
            |s, c| Box::pin(auth::navigate_to_signup(s, c)),
        ),
        Scenario::new(
            "signup-empty-fields",
            "Signup validation blocks an empty submission",
            |s, c| Box::pin(auth::signup_empty_fields(s, c)),
        ),
        Scenario::new(
            "signup-valid-credentials",
            "Signup with a fresh account succeeds",
            |s, c| Box::pin(auth::signup_valid_credentials(s, c)),
        ),
        Scenario::new(
            "navigate-to-login",
            "Login link reaches the login page",
            |s, c| Box::pin(auth::navigate_to_login(s, c)),
        ),
        Scenario::new(
            "login-invalid-credentials",
            "Login with wrong credentials is rejected",
            |s, c| Box::pin(auth::login_invalid_credentials(s, c)),
        ),
        Scenario::new(
            "login-valid-credentials",
            "Login with a freshly created account succeeds",
            |s, c| Box::pin(auth::login_valid_credentials(s, c)),
        ),
        Scenario::new(
            "blogs-page",
            "Blogs listing is reachable",
            |s, c| Box::pin(content::blogs_page(s, c)),
        ),
        Scenario::new(
            "discover-page",
            "Discover page is reachable",
            |s, c| Box::pin(content::discover_page(s, c)),
        ),
        Scenario::new(
            "about-page",
            "About page is reachable",
            |s, c| Box::pin(content::about_page(s, c)),
        ),
    ]
}

/// Submit control shared by the signup and login forms.
pub(crate) fn submit_button() -> Locator {
    Locator::css("button[type='submit']")
}

/// Poll until `holds` is true for the current URL (tolerant: expiry is not an
/// error), then return the URL actually observed so the caller's assertion
/// can name it.
pub(crate) async fn settle_url<F>(
    session: &Session,
    wait: &WaitStrategy,
    holds: F,
) -> Result<String, HarnessError>
where
    F: Fn(&str) -> bool + Copy,
{
    wait.settled(move || async move { Ok(holds(&session.current_url().await?)) })
        .await?;
    session.current_url().await
}
