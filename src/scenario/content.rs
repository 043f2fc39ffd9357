//! Homepage and static content route scenarios.

use crate::config::HarnessConfig;
use crate::error::{assertion, HarnessError};
use crate::scenario::settle_url;
use crate::session::Session;
use crate::wait::WaitStrategy;

/// Scenario 1: the homepage loads. The pass condition is deliberately
/// loose: either the title mentions "Blog" or the body renders "Home".
pub async fn homepage_loads(
    session: &Session,
    config: &HarnessConfig,
) -> Result<(), HarnessError> {
    session.navigate(&config.url("/")).await?;

    let title = session.title().await?;
    if title.contains("Blog") {
        return Ok(());
    }
    let body = session.page_source().await?;
    if body.contains("Home") {
        return Ok(());
    }
    Err(assertion(format!(
        "homepage has neither \"Blog\" in the title nor \"Home\" in the body (title: {:?})",
        title
    )))
}

/// Scenario 8: the blogs listing renders something blog-shaped.
pub async fn blogs_page(session: &Session, config: &HarnessConfig) -> Result<(), HarnessError> {
    let wait = WaitStrategy::from_config(config);
    session.navigate(&config.url("/blogs")).await?;

    wait.settled(move || async move {
        Ok(session.page_source().await?.to_lowercase().contains("blog"))
    })
    .await?;

    let body = session.page_source().await?;
    if body.to_lowercase().contains("blog") {
        Ok(())
    } else {
        Err(assertion("blogs page body never mentioned \"blog\""))
    }
}

/// Scenario 9: `/discover` stays exactly at the discover URL (no redirect).
pub async fn discover_page(session: &Session, config: &HarnessConfig) -> Result<(), HarnessError> {
    exact_route(session, config, "/discover").await
}

/// Scenario 10: `/about` stays exactly at the about URL (no redirect).
pub async fn about_page(session: &Session, config: &HarnessConfig) -> Result<(), HarnessError> {
    exact_route(session, config, "/about").await
}

/// Exact-URL-equality check, stricter than the rest of the suite: any
/// redirect away from the route fails it.
async fn exact_route(
    session: &Session,
    config: &HarnessConfig,
    path: &str,
) -> Result<(), HarnessError> {
    let wait = WaitStrategy::from_config(config);
    let expected = config.url(path);
    session.navigate(&expected).await?;

    let expected_ref = expected.as_str();
    let url = settle_url(session, &wait, move |u| u == expected_ref).await?;
    if url == expected {
        Ok(())
    } else {
        Err(assertion(format!(
            "expected to land on {} but ended at {}",
            expected, url
        )))
    }
}
