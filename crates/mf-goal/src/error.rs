// error.rs — Error types for goal storage and refresh signalling.

use thiserror::Error;

/// Errors that can occur while reading, toggling, or persisting goals.
///
/// The widget-facing operations on [`GoalStore`](crate::GoalStore) swallow
/// all of these; the `try_*` variants surface them so callers and tests can
/// tell the failure modes apart.
#[derive(Debug, Error)]
pub enum GoalError {
    /// The shared container failed to read or write a key.
    #[error("storage error for key '{key}': {source}")]
    Storage {
        key: String,
        source: std::io::Error,
    },

    /// A file I/O operation outside the container failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// A storage key that cannot be mapped onto the container.
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Stored bytes are not a valid goal list.
    #[error("failed to decode goals: {0}")]
    Decode(serde_json::Error),

    /// The goal list could not be serialized.
    #[error("failed to encode goals: {0}")]
    Encode(serde_json::Error),

    /// Nothing has been stored under the key yet.
    #[error("no goal data stored under '{key}'")]
    NoData { key: String },

    /// No goal with the requested id.
    #[error("goal not found: {0}")]
    NotFound(String),

    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A refresh notification could not be delivered (non-fatal).
    #[error("notification error: {0}")]
    Notification(String),
}
