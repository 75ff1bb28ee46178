//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default endpoint returning a JSON array of users
pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Message used when a failed fetch carries no usable message
pub const DEFAULT_FALLBACK_ERROR: &str = "Something went wrong while loading data";

/// Default HTTP timeout for the user list request, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default log file name (relative to the working directory)
pub const DEFAULT_LOG_FILE: &str = "list-loader.log";

/// Name of the per-user configuration directory under `$HOME`
pub const CONFIG_DIR_NAME: &str = ".list-loader";

/// Configuration file name inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application name
pub const APP_NAME: &str = "List Loader";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
