//! String validator
//!
//! Character-class, length and format rules for string input. Incompatible
//! options are rejected while building; each check only looks at options
//! already configured on the same builder.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::messages::{common, strings};
use crate::predicates;
use crate::validators::base::{Nullability, Rule, RuleSet, Validate};
use crate::validators::facets::Bounds;

/// Validator for string values
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    name: Option<String>,
    nullability: Nullability,
    rules: RuleSet<str>,
}

impl StringValidator {
    /// Start configuring a string validator
    pub fn builder() -> StringValidatorBuilder {
        StringValidatorBuilder::default()
    }
}

impl Validate for StringValidator {
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

        match input.as_str() {
            Some(s) => Ok(self.rules.failures(s)),
            None => Ok(vec![strings::NOT_A_STRING.to_string()]),
        }
    }
}

/// Options that take part in conflict checks
#[derive(Debug, Clone, Copy, Default)]
struct Options {
    fixed_length: bool,
    only_numbers: bool,
    only_characters: bool,
    no_numbers: bool,
    require_number: bool,
    no_special_characters: bool,
    require_special_character: bool,
}

/// Builder for [`StringValidator`]
#[derive(Debug, Clone, Default)]
pub struct StringValidatorBuilder {
    inner: StringValidator,
    lengths: Bounds<usize>,
    options: Options,
}

impl StringValidatorBuilder {
    fn rule<F>(mut self, predicate: F, message: &str) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.inner.rules.push(Rule::new(predicate, message));
        self
    }

    fn reject_if(&self, configured: bool, method: &str, other: &str) -> Result<()> {
        if configured {
            return Err(Error::config(strings::incompatible(method, other)));
        }
        Ok(())
    }

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

    /// Replace the message of the last added rule
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.inner.rules.set_last_message(message);
        self
    }

    /// Add a custom rule
    pub fn add_rule<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(predicate, common::CUSTOM_RULE)
    }

    // =========================================================================
    // Emptiness and length
    // =========================================================================

    /// Reject the empty string
    pub fn not_empty(self) -> Self {
        self.rule(predicates::is_not_empty, strings::NOT_EMPTY)
    }

    /// Reject empty and whitespace-only strings
    pub fn not_blank(self) -> Self {
        self.rule(predicates::is_not_blank, strings::NOT_BLANK)
    }

    /// Require at least `length` characters
    pub fn min_length(mut self, length: usize) -> Result<Self> {
        self.reject_if(self.options.fixed_length, "min_length", "fixed_length")?;
        self.lengths
            .set_min(length, strings::MIN_LENGTH_GREATER_THAN_MAX)?;

        Ok(self.rule(
            move |s| predicates::char_len(s) >= length,
            strings::MIN_LENGTH,
        ))
    }

    /// Allow at most `length` characters
    pub fn max_length(mut self, length: usize) -> Result<Self> {
        self.reject_if(self.options.fixed_length, "max_length", "fixed_length")?;
        if length < 1 {
            return Err(Error::config(strings::MAX_LENGTH_SMALLER_THAN_ONE));
        }
        self.lengths
            .set_max(length, strings::MAX_LENGTH_SMALLER_THAN_MIN)?;

        Ok(self.rule(
            move |s| predicates::char_len(s) <= length,
            strings::MAX_LENGTH,
        ))
    }

    /// Require exactly `length` characters
    pub fn fixed_length(mut self, length: usize) -> Result<Self> {
        self.reject_if(
            self.lengths.is_set(),
            "fixed_length",
            "min_length() or max_length",
        )?;
        if length < 1 {
            return Err(Error::config(strings::FIXED_LENGTH_SMALLER_THAN_ONE));
        }
        self.options.fixed_length = true;

        Ok(self.rule(
            move |s| predicates::has_length(s, length),
            strings::FIXED_LENGTH,
        ))
    }

    // =========================================================================
    // Character classes
    // =========================================================================

    /// Require an uppercase letter
    pub fn require_uppercase(self) -> Self {
        self.rule(predicates::contains_uppercase, strings::HAS_UPPERCASE)
    }

    /// Require a lowercase letter
    pub fn require_lowercase(self) -> Self {
        self.rule(predicates::contains_lowercase, strings::HAS_LOWERCASE)
    }

    /// Require a digit
    pub fn require_number(mut self) -> Result<Self> {
        self.reject_if(self.options.no_numbers, "require_number", "no_numbers")?;
        self.options.require_number = true;
        Ok(self.rule(predicates::contains_numbers, strings::HAS_NUMBER))
    }

    /// Require a non-alphanumeric character
    pub fn require_special_character(mut self) -> Result<Self> {
        self.reject_if(
            self.options.no_special_characters,
            "require_special_character",
            "no_special_characters",
        )?;
        self.options.require_special_character = true;
        Ok(self.rule(
            predicates::contains_special_character,
            strings::HAS_SPECIAL_CHARACTER,
        ))
    }

    /// Reject whitespace
    pub fn no_whitespaces(self) -> Self {
        self.rule(predicates::not_contains_whitespace, strings::NO_WHITESPACES)
    }

    /// Reject digits
    pub fn no_numbers(mut self) -> Result<Self> {
        self.reject_if(self.options.only_numbers, "no_numbers", "only_numbers")?;
        self.reject_if(self.options.require_number, "no_numbers", "require_number")?;
        self.options.no_numbers = true;
        Ok(self.rule(predicates::not_contains_numbers, strings::NO_NUMBERS))
    }

    /// Allow only ASCII letters and digits
    pub fn no_special_characters(mut self) -> Result<Self> {
        self.reject_if(
            self.options.only_numbers,
            "no_special_characters",
            "only_numbers",
        )?;
        self.reject_if(
            self.options.require_special_character,
            "no_special_characters",
            "require_special_character",
        )?;
        self.options.no_special_characters = true;
        Ok(self.rule(
            predicates::not_contains_special_character,
            strings::NO_SPECIAL_CHARACTERS,
        ))
    }

    /// Allow only digits
    pub fn only_numbers(mut self) -> Result<Self> {
        self.reject_if(self.options.only_characters, "only_numbers", "only_characters")?;
        self.reject_if(self.options.no_numbers, "only_numbers", "no_numbers")?;
        self.reject_if(
            self.options.require_special_character,
            "only_numbers",
            "require_special_character",
        )?;
        self.options.only_numbers = true;
        Ok(self.rule(predicates::contains_only_numbers, strings::ONLY_NUMBERS))
    }

    /// Allow only letters
    pub fn only_characters(mut self) -> Result<Self> {
        self.reject_if(self.options.only_numbers, "only_characters", "only_numbers")?;
        self.reject_if(
            self.options.require_special_character,
            "only_characters",
            "require_special_character",
        )?;
        self.options.only_characters = true;
        Ok(self.rule(predicates::contains_only_letters, strings::ONLY_CHARACTERS))
    }

    /// Reject any character that occurs twice
    pub fn no_repeated_characters(self) -> Self {
        self.rule(
            predicates::not_contains_repeated_chars,
            strings::NO_REPEATED_CHARACTERS,
        )
    }

    // =========================================================================
    // Formats
    // =========================================================================

    /// Require an email address
    pub fn is_email(self) -> Self {
        self.rule(predicates::is_email, strings::IS_EMAIL)
    }

    /// Require a URL; `strict` demands a fully parseable absolute URL
    pub fn is_url(self, strict: bool) -> Self {
        self.rule(move |s| predicates::is_url(s, strict), strings::IS_URL)
    }

    /// Require an IPv4 address
    pub fn is_ip(self) -> Self {
        self.rule(predicates::is_ip, strings::IS_IP)
    }

    /// Require an ISO 8601 date or date-time
    pub fn is_iso8601(self) -> Self {
        self.rule(predicates::is_iso8601, strings::IS_ISO8601)
    }

    /// Require a JWT-shaped token
    pub fn is_jwt(self) -> Self {
        self.rule(predicates::is_jwt, strings::IS_JWT)
    }

    /// Require a Bitcoin address
    pub fn is_btc_address(self) -> Self {
        self.rule(predicates::is_btc_address, strings::IS_BTC_ADDRESS)
    }

    /// Require an Ethereum address
    pub fn is_eth_address(self) -> Self {
        self.rule(predicates::is_eth_address, strings::IS_ETH_ADDRESS)
    }

    /// Finish configuration
    pub fn build(self) -> StringValidator {
        self.inner
    }
}
