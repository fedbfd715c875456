//! Number validator

use serde_json::Value;

use crate::error::{Error, Result};
use crate::messages::{common, numbers};
use crate::validators::base::{Nullability, Rule, RuleSet, Validate};
use crate::validators::facets::{Bounds, Sign};

/// Validator for numeric values
///
/// Integers and floats are both checked as `f64`.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    name: Option<String>,
    nullability: Nullability,
    rules: RuleSet<f64>,
}

impl NumberValidator {
    /// Start configuring a number validator
    pub fn builder() -> NumberValidatorBuilder {
        NumberValidatorBuilder::default()
    }
}

impl Validate for NumberValidator {
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

        match input.as_f64() {
            Some(n) => Ok(self.rules.failures(&n)),
            None => Ok(vec![numbers::NOT_A_NUMBER.to_string()]),
        }
    }
}

/// Builder for [`NumberValidator`]
#[derive(Debug, Clone, Default)]
pub struct NumberValidatorBuilder {
    inner: NumberValidator,
    bounds: Bounds<f64>,
    signs: Vec<Sign>,
}

impl NumberValidatorBuilder {
    fn rule<F>(mut self, predicate: F, message: &str) -> Self
    where
        F: Fn(&f64) -> bool + Send + Sync + 'static,
    {
        self.inner.rules.push(Rule::new(predicate, message));
        self
    }

    fn has_sign(&self, sign: Sign) -> bool {
        self.signs.contains(&sign)
    }

    fn sign(mut self, sign: Sign, message: &str) -> Self {
        self.signs.push(sign);
        self.rule(move |n| sign.accepts(*n), message)
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
        F: Fn(&f64) -> bool + Send + Sync + 'static,
    {
        self.rule(predicate, common::CUSTOM_RULE)
    }

    fn require_finite(value: f64) -> Result<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Error::config(numbers::NON_FINITE_BOUND))
        }
    }

    /// Inclusive lower bound
    pub fn min(mut self, value: f64) -> Result<Self> {
        Self::require_finite(value)?;
        self.bounds.set_min(value, common::MIN_GREATER_THAN_MAX)?;
        Ok(self.rule(move |n| *n >= value, numbers::MIN))
    }

    /// Inclusive upper bound
    pub fn max(mut self, value: f64) -> Result<Self> {
        Self::require_finite(value)?;
        self.bounds.set_max(value, common::MAX_SMALLER_THAN_MIN)?;
        Ok(self.rule(move |n| *n <= value, numbers::MAX))
    }

    /// Require a value above zero
    pub fn is_positive(self) -> Result<Self> {
        if self.has_sign(Sign::Negative) {
            return Err(Error::config(numbers::POSITIVE_AND_NEGATIVE));
        }
        Ok(self.sign(Sign::Positive, numbers::IS_POSITIVE))
    }

    /// Require a value below zero
    pub fn is_negative(self) -> Result<Self> {
        if self.has_sign(Sign::Positive) || self.has_sign(Sign::NonNegative) {
            return Err(Error::config(
                numbers::NEGATIVE_AND_POSITIVE_OR_NON_NEGATIVE,
            ));
        }
        Ok(self.sign(Sign::Negative, numbers::IS_NEGATIVE))
    }

    /// Require a value of zero or above
    pub fn is_non_negative(self) -> Result<Self> {
        if self.has_sign(Sign::Negative) {
            return Err(Error::config(numbers::NEGATIVE_AND_NON_NEGATIVE));
        }
        Ok(self.sign(Sign::NonNegative, numbers::IS_NON_NEGATIVE))
    }

    /// Finish configuration
    pub fn build(self) -> NumberValidator {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_bounds_are_inclusive() {
        let validator = NumberValidator::builder()
            .min(0.0)
            .unwrap()
            .max(10.0)
            .unwrap()
            .build();

        assert!(validator.is_valid(&json!(0)).unwrap());
        assert!(validator.is_valid(&json!(10)).unwrap());
        assert!(validator.is_valid(&json!(5.5)).unwrap());
        assert_eq!(
            validator.get_error_messages(&json!(-1)).unwrap(),
            vec![numbers::MIN]
        );
        assert_eq!(
            validator.get_error_messages(&json!(10.01)).unwrap(),
            vec![numbers::MAX]
        );
    }

    #[test]
    fn test_min_max_invariant() {
        let err = NumberValidator::builder()
            .max(5.0)
            .unwrap()
            .min(6.0)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == common::MIN_GREATER_THAN_MAX));

        let err = NumberValidator::builder()
            .min(5.0)
            .unwrap()
            .max(4.0)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == common::MAX_SMALLER_THAN_MIN));

        assert!(NumberValidator::builder()
            .min(5.0)
            .unwrap()
            .max(5.0)
            .is_ok());
    }

    #[test]
    fn test_non_finite_bounds_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = NumberValidator::builder().min(value).unwrap_err();
            assert!(matches!(err, Error::Config(ref m) if m == numbers::NON_FINITE_BOUND));

            let err = NumberValidator::builder().max(value).unwrap_err();
            assert!(matches!(err, Error::Config(ref m) if m == numbers::NON_FINITE_BOUND));
        }

        // a rejected bound leaves the invariant check intact
        let err = NumberValidator::builder()
            .max(1.0)
            .unwrap()
            .min(f64::NAN)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == numbers::NON_FINITE_BOUND));
    }

    #[test]
    fn test_sign_conflicts() {
        let b = NumberValidator::builder;

        assert!(b().is_negative().unwrap().is_positive().is_err());
        assert!(b().is_negative().unwrap().is_non_negative().is_err());
        assert!(b().is_positive().unwrap().is_negative().is_err());
        assert!(b().is_non_negative().unwrap().is_negative().is_err());
        assert!(b().is_positive().unwrap().is_non_negative().is_ok());
    }

    #[test]
    fn test_sign_rules() {
        let positive = NumberValidator::builder().is_positive().unwrap().build();
        assert!(positive.is_valid(&json!(1)).unwrap());
        assert_eq!(
            positive.get_error_messages(&json!(0)).unwrap(),
            vec![numbers::IS_POSITIVE]
        );

        let non_negative = NumberValidator::builder().is_non_negative().unwrap().build();
        assert!(non_negative.is_valid(&json!(0)).unwrap());
        assert!(!non_negative.is_valid(&json!(-3)).unwrap());

        let negative = NumberValidator::builder().is_negative().unwrap().build();
        assert!(negative.is_valid(&json!(-0.5)).unwrap());
        assert!(!negative.is_valid(&json!(0)).unwrap());
    }

    #[test]
    fn test_custom_rule() {
        let even = NumberValidator::builder()
            .add_rule(|n| n % 2.0 == 0.0)
            .with_message("must be even")
            .build();

        assert!(even.is_valid(&json!(4)).unwrap());
        assert_eq!(
            even.get_error_messages(&json!(3)).unwrap(),
            vec!["must be even"]
        );
    }

    #[test]
    fn test_wrong_type_and_null() {
        let validator = NumberValidator::builder().min(1.0).unwrap().build();
        assert_eq!(
            validator.get_error_messages(&json!("12")).unwrap(),
            vec![numbers::NOT_A_NUMBER]
        );
        assert!(matches!(
            validator.is_valid(&Value::Null),
            Err(Error::ContractViolation(_))
        ));
    }
}
