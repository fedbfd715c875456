//! Error types for rulekit
//!
//! Three failure categories stay distinguishable:
//!
//! - [`Error::Config`]: a builder call combined incompatible options or broke
//!   a `min <= max` invariant. Only builders return it.
//! - [`Error::Value`]: a string could not be parsed into a typed value, such
//!   as an unknown card provider name.
//! - [`Error::ContractViolation`]: a null input reached a validator that has
//!   neither `nullable` nor `not_null` configured.
//! - [`Error::Validation`] / [`Error::Card`]: the input failed one or more rules.

use std::fmt;
use thiserror::Error;

use crate::messages::common;
use crate::validators::report::{CardErrors, ErrorTree};

/// Result type alias using rulekit Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rulekit operations
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Incompatible or out-of-order builder configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A string that does not name a known value
    #[error("value error: {0}")]
    Value(String),

    /// Null input without a nullability policy
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Input failed validation
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Card input failed validation
    #[error("card error: {0}")]
    Card(#[from] CardError),
}

impl Error {
    /// Build a configuration error and log it
    pub(crate) fn config(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "rejected validator configuration");
        Error::Config(message)
    }

    /// Build a parse error for an unrecognised name and log it
    pub(crate) fn value(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(%message, "rejected value");
        Error::Value(message)
    }

    /// Build the contract violation raised for unconfigured null input
    pub(crate) fn null_input() -> Self {
        tracing::debug!("null input reached a validator without a nullability policy");
        Error::ContractViolation(common::NULL_INPUT.to_string())
    }

    /// Whether this error means "the input is invalid" rather than a usage problem
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Card(_))
    }
}

/// Validation failure carrying the collected errors
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Summary message
    pub message: String,
    /// Name of the validator that failed, if it was given one
    pub name: Option<String>,
    /// Flat or structured errors
    pub errors: ErrorTree,
}

impl ValidationError {
    /// Create a validation error from a flat list of messages
    pub fn new(errors: Vec<String>) -> Self {
        Self::from_tree(ErrorTree::Messages(errors))
    }

    /// Create a validation error from a structured error tree
    pub fn from_tree(errors: ErrorTree) -> Self {
        Self {
            message: common::DEFAULT_ERROR.to_string(),
            name: None,
            errors,
        }
    }

    /// Set the validator name and derive the summary message from it
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name {
            self.message = format!("{} {}", name, common::FIELD_INVALID);
            self.name = Some(name.to_string());
        }
        self
    }

    /// Replace the summary message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Flat messages, if this error carries a flat list
    pub fn messages(&self) -> Option<&[String]> {
        self.errors.as_messages()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let ErrorTree::Messages(messages) = &self.errors {
            for message in messages {
                write!(f, "\n  - {}", message)?;
            }
        } else if let Ok(json) = serde_json::to_string(&self.errors) {
            write!(f, "\n{}", json)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Card validation failure
#[derive(Debug, Clone, PartialEq)]
pub struct CardError {
    /// Summary message
    pub message: String,
    /// Per-part card errors
    pub errors: CardErrors,
}

impl CardError {
    /// Create a card error from the collected per-part errors
    pub fn new(errors: CardErrors) -> Self {
        Self {
            message: format!("Credit-Card {}", common::FIELD_INVALID),
            errors,
        }
    }
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref number) = self.errors.number {
            write!(f, "\n\nNumber: {}", number)?;
        }

        if let Some(ref expiration) = self.errors.expiration_date {
            write!(f, "\n\nExpiration: {}", expiration)?;
        }

        for message in &self.errors.messages {
            write!(f, "\n  - {}", message)?;
        }

        Ok(())
    }
}

impl std::error::Error for CardError {}
