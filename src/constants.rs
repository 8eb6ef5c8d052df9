//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Bounded wait for one full exchange, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log file written next to the working directory (stdout belongs to the UI)
pub const DEFAULT_LOG_FILE: &str = "restless.log";

/// Default `tracing` filter directive
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Placeholder shown in an empty URL field
pub const URL_PLACEHOLDER: &str = "https://jsonplaceholder.typicode.com/posts/1";

/// Application name
pub const APP_NAME: &str = "Restless";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
