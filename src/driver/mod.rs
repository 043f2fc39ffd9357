#[cfg(test)]
pub(crate) mod fake;
pub mod traits;
pub mod web;

pub use traits::{BrowserDriver, Locator};
pub use web::PlaywrightDriver;
