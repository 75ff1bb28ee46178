//! Load state - pure data describing the outcome of the latest fetch cycle

use std::fmt;

use crate::loader::error::ErrorInfo;

/// Identifies one fetch cycle. Tokens from the same loader increase
/// monotonically; only the latest one may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub(crate) u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable state of a loader
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// No cycle started yet
    #[default]
    Idle,
    /// A cycle is in flight
    Loading,
    /// The latest cycle produced a value
    Success { data: T },
    /// The latest cycle failed
    Failure { error: ErrorInfo },
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Success { data } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            LoadState::Failure { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// True once a cycle has produced either a value or an error
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Success { .. } | LoadState::Failure { .. })
    }

    /// Short status label for logs and the status bar
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Success { .. } => "success",
            LoadState::Failure { .. } => "failure",
        }
    }
}

impl<T> From<Result<T, ErrorInfo>> for LoadState<T> {
    fn from(result: Result<T, ErrorInfo>) -> Self {
        match result {
            Ok(data) => LoadState::Success { data },
            Err(error) => LoadState::Failure { error },
        }
    }
}
