//! Failure normalization for fetch cycles

use std::any::Any;
use std::fmt::Display;

use thiserror::Error;

use crate::constants::DEFAULT_FALLBACK_ERROR;

/// Normalized description of a failed fetch cycle.
///
/// The message is never empty: failures without a usable message are
/// replaced by a fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ErrorInfo {
    message: String,
}

impl ErrorInfo {
    /// Build an error from a message, substituting `fallback` when blank.
    pub fn new(message: impl Into<String>, fallback: &str) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ErrorInfo {
                message: non_empty_fallback(fallback),
            }
        } else {
            ErrorInfo { message }
        }
    }

    /// Normalize any displayable failure, using its text verbatim.
    pub fn from_display<E: Display + ?Sized>(error: &E, fallback: &str) -> Self {
        Self::new(error.to_string(), fallback)
    }

    /// Normalize a panic payload caught from a fetch future.
    ///
    /// String payloads (what `panic!("...")` produces) are kept; anything
    /// else has no message to offer.
    pub fn from_panic(payload: Box<dyn Any + Send>, fallback: &str) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => String::new(),
            },
        };
        Self::new(message, fallback)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn non_empty_fallback(fallback: &str) -> String {
    if fallback.trim().is_empty() {
        DEFAULT_FALLBACK_ERROR.to_string()
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_message_is_kept_verbatim() {
        let err = anyhow::anyhow!("boom");
        let info = ErrorInfo::from_display(&err, "fallback");
        assert_eq!(info.message(), "boom");
        assert_eq!(info.to_string(), "boom");
    }

    #[test]
    fn test_blank_message_uses_fallback() {
        assert_eq!(ErrorInfo::new("", "nope").message(), "nope");
        assert_eq!(ErrorInfo::new("   ", "nope").message(), "nope");
    }

    #[test]
    fn test_blank_fallback_uses_builtin_default() {
        let info = ErrorInfo::new("", "");
        assert_eq!(info.message(), DEFAULT_FALLBACK_ERROR);
    }

    #[test]
    fn test_panic_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned panic"));
        assert_eq!(ErrorInfo::from_panic(owned, "fb").message(), "owned panic");

        let borrowed: Box<dyn Any + Send> = Box::new("static panic");
        assert_eq!(ErrorInfo::from_panic(borrowed, "fb").message(), "static panic");

        let opaque: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(ErrorInfo::from_panic(opaque, "fb").message(), "fb");
    }
}
