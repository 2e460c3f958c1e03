//! Network defaults for the marketplace SDK.

use std::time::Duration;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// How often notifications are polled.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Per-request timeout on native targets.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
