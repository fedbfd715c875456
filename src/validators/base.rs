//! Base validator infrastructure
//!
//! This module provides the pieces every validator kind is assembled from:
//! [`Rule`] values, the [`Nullability`] policy and the [`Validate`] trait with
//! the four query operations.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result, ValidationError};
use crate::messages::common;
use crate::validators::report::ErrorTree;

/// Shared predicate function
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A predicate paired with the message reported when it fails
pub struct Rule<T: ?Sized> {
    predicate: Predicate<T>,
    message: String,
}

impl<T: ?Sized> Rule<T> {
    /// Create a new rule
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Message reported on failure
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the failure message
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Evaluate the predicate
    pub fn check(&self, input: &T) -> bool {
        (self.predicate)(input)
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            message: self.message.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered list of rules
///
/// Every rule is evaluated on every query; duplicates are allowed.
pub struct RuleSet<T: ?Sized> {
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized> RuleSet<T> {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    pub fn push(&mut self, rule: Rule<T>) {
        self.rules.push(rule);
    }

    /// Replace the message of the most recently added rule
    pub fn set_last_message(&mut self, message: impl Into<String>) {
        match self.rules.last_mut() {
            Some(rule) => rule.set_message(message),
            None => tracing::debug!("with_message called before any rule was added"),
        }
    }

    /// Messages of every failing rule, in insertion order
    pub fn failures(&self, input: &T) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| !rule.check(input))
            .map(|rule| rule.message.clone())
            .collect()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule was added
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: ?Sized> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter()).finish()
    }
}

/// How a validator treats null input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Nullability {
    /// No policy: null input is a contract violation
    #[default]
    Unset,
    /// Null input is accepted without errors
    Nullable,
    /// Null input is reported with the given message
    NotNull(String),
}

impl Nullability {
    /// Switch to [`Nullability::Nullable`]
    pub fn set_nullable(&mut self) -> Result<()> {
        if let Nullability::NotNull(_) = self {
            return Err(Error::config(common::NULLABLE_AND_NOT_NULL));
        }
        *self = Nullability::Nullable;
        Ok(())
    }

    /// Switch to [`Nullability::NotNull`], with the default message unless one is given
    pub fn set_not_null(&mut self, message: Option<String>) -> Result<()> {
        if let Nullability::Nullable = self {
            return Err(Error::config(common::NULLABLE_AND_NOT_NULL));
        }
        *self = Nullability::NotNull(message.unwrap_or_else(|| common::NOT_NULL.to_string()));
        Ok(())
    }

    /// Whether null input is accepted
    pub fn is_nullable(&self) -> bool {
        matches!(self, Nullability::Nullable)
    }

    /// Whether null input is reported as a validation failure
    pub fn is_not_null(&self) -> bool {
        matches!(self, Nullability::NotNull(_))
    }

    /// The not-null message, if configured
    pub fn not_null_message(&self) -> Option<&str> {
        match self {
            Nullability::NotNull(message) => Some(message),
            _ => None,
        }
    }

    /// Messages produced for a null input
    pub fn null_messages(&self) -> Result<Vec<String>> {
        match self {
            Nullability::Nullable => Ok(Vec::new()),
            Nullability::NotNull(message) => Ok(vec![message.clone()]),
            Nullability::Unset => Err(Error::null_input()),
        }
    }

    /// Resolve null input up front
    ///
    /// Returns `Some(messages)` when `input` is null and the policy decides the
    /// outcome, `None` when the input is not null and rules must run.
    pub fn resolve(&self, input: &Value) -> Result<Option<Vec<String>>> {
        if input.is_null() {
            return self.null_messages().map(Some);
        }
        Ok(None)
    }
}

/// Query operations shared by every validator kind
pub trait Validate {
    /// Name used in the summary message of raised errors
    fn name(&self) -> Option<&str>;

    /// Null input policy
    fn nullability(&self) -> &Nullability;

    /// Flat list of failure messages
    ///
    /// Fails only with [`Error::ContractViolation`].
    fn get_error_messages(&self, input: &Value) -> Result<Vec<String>>;

    /// Structured errors; flat validators return their message list
    fn get_errors(&self, input: &Value) -> Result<ErrorTree> {
        self.get_error_messages(input).map(ErrorTree::Messages)
    }

    /// Raise a validation error if any rule fails
    fn validate(&self, input: &Value) -> Result<()> {
        let messages = self.get_error_messages(input)?;
        tracing::trace!(failures = messages.len(), "validated input");

        if messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(messages).with_name(self.name()).into())
        }
    }

    /// Same as [`Validate::validate`]
    fn assert_is_valid(&self, input: &Value) -> Result<()> {
        self.validate(input)
    }

    /// Whether the input passes
    ///
    /// Only validation failures become `Ok(false)`; configuration errors and
    /// contract violations are returned as errors.
    fn is_valid(&self, input: &Value) -> Result<bool> {
        match self.validate(input) {
            Ok(()) => Ok(true),
            Err(err) if err.is_validation_failure() => Ok(false),
            Err(err) => Err(err),
        }
    }
}

// =============================================================================
// BaseValidator
// =============================================================================

/// Validator of arbitrary values holding only custom rules
#[derive(Debug, Clone, Default)]
pub struct BaseValidator {
    name: Option<String>,
    nullability: Nullability,
    rules: RuleSet<Value>,
}

impl BaseValidator {
    /// Start configuring a base validator
    pub fn builder() -> BaseValidatorBuilder {
        BaseValidatorBuilder::default()
    }
}

impl Validate for BaseValidator {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn nullability(&self) -> &Nullability {
        &self.nullability
    }

    fn get_error_messages(&self, input: &Value) -> Result<Vec<String>> {
        if let Some(messages) = self.nullability.resolve(input)? {
            return Ok(messages);
        }
        Ok(self.rules.failures(input))
    }
}

/// Builder for [`BaseValidator`]
#[derive(Debug, Clone, Default)]
pub struct BaseValidatorBuilder {
    inner: BaseValidator,
}

impl BaseValidatorBuilder {
    /// Name used in raised errors
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    /// Accept null input
    pub fn nullable(mut self) -> Result<Self> {
        self.inner.nullability.set_nullable()?;
        Ok(self)
    }

    /// Reject null input with the default message
    pub fn not_null(mut self) -> Result<Self> {
        self.inner.nullability.set_not_null(None)?;
        Ok(self)
    }

    /// Reject null input with a custom message
    pub fn not_null_with_message(mut self, message: impl Into<String>) -> Result<Self> {
        self.inner.nullability.set_not_null(Some(message.into()))?;
        Ok(self)
    }

    /// Add a custom rule with the default custom-rule message
    pub fn add_rule<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.inner
            .rules
            .push(Rule::new(predicate, common::CUSTOM_RULE));
        self
    }

    /// Replace the message of the last added rule
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.inner.rules.set_last_message(message);
        self
    }

    /// Finish configuration
    pub fn build(self) -> BaseValidator {
        self.inner
    }
}
