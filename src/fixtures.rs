use std::sync::atomic::{AtomicU64, Ordering};

/// Disambiguates fixtures created within the same second.
static SEQ: AtomicU64 = AtomicU64::new(0);

/// A transient signup/login identity, generated fresh per scenario and
/// discarded after use. The unix-timestamp seed keeps repeated runs against
/// the same SUT state passable indefinitely.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn unique(prefix: &str, display_name: &str) -> Self {
        let ts = chrono::Utc::now().timestamp();
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            name: display_name.to_string(),
            email: format!("{}{}-{}@example.com", prefix, ts, seq),
            password: "password123".to_string(),
        }
    }
}
