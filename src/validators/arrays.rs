//! Array validator
//!
//! Applies structural checks to the sequence itself and a single child
//! validator to every element. Flat reporting merges both into one
//! deduplicated list; structured reporting lists failing elements.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::messages::{arrays, common};
use crate::validators::base::{Nullability, Rule, Validate};
use crate::validators::facets::Bounds;
use crate::validators::report::{element_key, ElementError, ErrorTree};
use crate::validators::AnyValidator;

/// Equality function used by `no_duplicates`
pub type Comparator = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Structural check on the whole sequence
#[derive(Clone)]
enum Check {
    Rule(Rule<[Value]>),
    // Evaluated with whichever comparator the validator ends up with
    NoDuplicates(String),
}

impl Check {
    fn set_message(&mut self, message: String) {
        match self {
            Check::Rule(rule) => rule.set_message(message),
            Check::NoDuplicates(current) => *current = message,
        }
    }
}

/// Validator for arrays
#[derive(Clone)]
pub struct ArrayValidator {
    name: Option<String>,
    nullability: Nullability,
    element: Box<AnyValidator>,
    checks: Vec<Check>,
    comparator: Comparator,
}

impl fmt::Debug for ArrayValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayValidator")
            .field("name", &self.name)
            .field("nullability", &self.nullability)
            .field("element", &self.element)
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}

impl ArrayValidator {
    /// Start configuring an array validator whose elements are checked by `element`
    pub fn builder(element: impl Into<AnyValidator>) -> ArrayValidatorBuilder {
        ArrayValidatorBuilder {
            inner: ArrayValidator {
                name: None,
                nullability: Nullability::default(),
                element: Box::new(element.into()),
                checks: Vec::new(),
                comparator: Arc::new(|a: &Value, b: &Value| a == b),
            },
            lengths: Bounds::new(),
        }
    }

    /// Validator applied to every element
    pub fn element(&self) -> &AnyValidator {
        &self.element
    }

    fn has_duplicates(&self, items: &[Value]) -> bool {
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                if (self.comparator)(a, b) {
                    return true;
                }
            }
        }
        false
    }

    /// Messages of the failing structural checks, in configuration order
    pub fn structural_failures(&self, items: &[Value]) -> Vec<String> {
        self.checks
            .iter()
            .filter_map(|check| match check {
                Check::Rule(rule) if !rule.check(items) => Some(rule.message().to_string()),
                Check::NoDuplicates(message) if self.has_duplicates(items) => {
                    Some(message.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Outcome for a null element
    ///
    /// The element validator's own policy wins; otherwise a not-null array
    /// reports its message; otherwise the element is a contract violation.
    fn null_element_messages(&self) -> Result<Vec<String>> {
        match self.element.nullability() {
            Nullability::Nullable => Ok(Vec::new()),
            Nullability::NotNull(message) => Ok(vec![message.clone()]),
            Nullability::Unset => match &self.nullability {
                Nullability::NotNull(message) => Ok(vec![message.clone()]),
                _ => Err(Error::null_input()),
            },
        }
    }

    fn element_messages(&self, item: &Value) -> Result<Vec<String>> {
        if item.is_null() {
            return self.null_element_messages();
        }
        self.element.get_error_messages(item)
    }

    fn element_error(&self, item: &Value) -> Result<Option<ElementError>> {
        if item.is_null() {
            let messages = self.null_element_messages()?;
            return Ok((!messages.is_empty()).then_some(ElementError::NotNull(messages)));
        }

        let entry = match self.element.as_ref() {
            AnyValidator::Schema(schema) => {
                let errors = schema.get_errors(item)?;
                (!errors.is_empty()).then(|| ElementError::Nested {
                    data: item.clone(),
                    errors,
                })
            }
            AnyValidator::Array(inner) => {
                let errors = inner.get_errors(item)?;
                (!errors.is_empty()).then(|| ElementError::Nested {
                    data: item.clone(),
                    errors,
                })
            }
            scalar => {
                let messages = scalar.get_error_messages(item)?;
                (!messages.is_empty()).then(|| ElementError::Value {
                    key: element_key(item),
                    messages,
                })
            }
        };

        Ok(entry)
    }
}

impl Validate for ArrayValidator {
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

        let items = match input.as_array() {
            Some(items) => items,
            None => return Ok(vec![arrays::NOT_AN_ARRAY.to_string()]),
        };

        let mut messages = self.structural_failures(items);
        for item in items {
            messages.extend(self.element_messages(item)?);
        }

        let mut unique: Vec<String> = Vec::with_capacity(messages.len());
        for message in messages {
            if !unique.contains(&message) {
                unique.push(message);
            }
        }

        tracing::trace!(elements = items.len(), failures = unique.len(), "checked array");
        Ok(unique)
    }

    fn get_errors(&self, input: &Value) -> Result<ErrorTree> {
        if input.is_null() {
            return match &self.nullability {
                Nullability::Nullable => Ok(ErrorTree::Elements(Vec::new())),
                Nullability::NotNull(message) => Ok(ErrorTree::Elements(vec![
                    ElementError::NotNull(vec![message.clone()]),
                ])),
                Nullability::Unset => Err(Error::null_input()),
            };
        }

        let items = match input.as_array() {
            Some(items) => items,
            None => return Ok(ErrorTree::Messages(vec![arrays::NOT_AN_ARRAY.to_string()])),
        };

        // elements are checked even when a structural check fails, so null
        // elements raise the same contract violation as in flat mode
        let mut entries = Vec::new();
        for item in items {
            if let Some(entry) = self.element_error(item)? {
                entries.push(entry);
            }
        }

        let structural = self.structural_failures(items);
        if !structural.is_empty() {
            return Ok(ErrorTree::Messages(structural));
        }

        Ok(ErrorTree::Elements(entries))
    }
}

/// Builder for [`ArrayValidator`]
#[derive(Clone)]
pub struct ArrayValidatorBuilder {
    inner: ArrayValidator,
    lengths: Bounds<usize>,
}

impl fmt::Debug for ArrayValidatorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayValidatorBuilder")
            .field("inner", &self.inner)
            .field("lengths", &self.lengths)
            .finish()
    }
}

impl ArrayValidatorBuilder {
    fn check(mut self, check: Check) -> Self {
        self.inner.checks.push(check);
        self
    }

    fn rule<F>(self, predicate: F, message: &str) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.check(Check::Rule(Rule::new(predicate, message)))
    }

    /// Name used in raised errors
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    /// Accept a null array
    pub fn nullable(mut self) -> Result<Self> {
        self.inner.nullability.set_nullable()?;
        Ok(self)
    }

    /// Reject a null array with the default message
    pub fn not_null(mut self) -> Result<Self> {
        self.inner.nullability.set_not_null(None)?;
        Ok(self)
    }

    /// Reject a null array with a custom message
    pub fn not_null_with_message(mut self, message: impl Into<String>) -> Result<Self> {
        self.inner.nullability.set_not_null(Some(message.into()))?;
        Ok(self)
    }

    /// Replace the message of the last added check
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        match self.inner.checks.last_mut() {
            Some(check) => check.set_message(message.into()),
            None => tracing::debug!("with_message called before any check was added"),
        }
        self
    }

    /// Add a custom check on the whole array
    pub fn add_rule<F>(self, predicate: F) -> Self
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.rule(predicate, common::CUSTOM_RULE)
    }

    /// Require at least `length` elements
    pub fn min_length(mut self, length: usize) -> Result<Self> {
        self.lengths.set_min(length, common::MIN_GREATER_THAN_MAX)?;
        Ok(self.rule(move |items| items.len() >= length, arrays::MIN))
    }

    /// Allow at most `length` elements
    pub fn max_length(mut self, length: usize) -> Result<Self> {
        self.lengths.set_max(length, common::MAX_SMALLER_THAN_MIN)?;
        Ok(self.rule(move |items| items.len() <= length, arrays::MAX))
    }

    /// Reject the empty array
    pub fn not_empty(self) -> Self {
        self.rule(|items| !items.is_empty(), arrays::NOT_EMPTY)
    }

    /// Reject arrays holding two elements the comparator considers equal
    pub fn no_duplicates(self) -> Self {
        self.check(Check::NoDuplicates(arrays::NO_DUPLICATES.to_string()))
    }

    /// Replace the equality used by `no_duplicates`
    ///
    /// Defaults to structural equality of the JSON values.
    pub fn comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.inner.comparator = Arc::new(comparator);
        self
    }

    /// Finish configuration
    pub fn build(self) -> ArrayValidator {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{numbers, strings};
    use crate::validators::{NumberValidator, StringValidator};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn non_negative() -> NumberValidator {
        NumberValidator::builder().min(0.0).unwrap().build()
    }

    #[test]
    fn test_messages_are_deduplicated() {
        let validator = ArrayValidator::builder(non_negative()).build();

        assert_eq!(
            validator.get_error_messages(&json!([1, -2, 3, -1])).unwrap(),
            vec![numbers::MIN]
        );
        assert!(validator.get_error_messages(&json!([1, 2, 3])).unwrap().is_empty());
    }

    #[test]
    fn test_structural_failures_come_first() {
        let validator = ArrayValidator::builder(non_negative())
            .max_length(2)
            .unwrap()
            .no_duplicates()
            .build();

        assert_eq!(
            validator.get_error_messages(&json!([-1, -1, 4])).unwrap(),
            vec![arrays::MAX, arrays::NO_DUPLICATES, numbers::MIN]
        );
    }

    #[test]
    fn test_length_configuration_errors() {
        let err = ArrayValidator::builder(non_negative())
            .min_length(5)
            .unwrap()
            .max_length(4)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == common::MAX_SMALLER_THAN_MIN));

        let err = ArrayValidator::builder(non_negative())
            .max_length(1)
            .unwrap()
            .min_length(2)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m == common::MIN_GREATER_THAN_MAX));
    }

    #[test]
    fn test_not_empty() {
        let validator = ArrayValidator::builder(non_negative()).not_empty().build();
        assert_eq!(
            validator.get_error_messages(&json!([])).unwrap(),
            vec![arrays::NOT_EMPTY]
        );
    }

    #[test]
    fn test_no_duplicates_default_comparator() {
        let validator = ArrayValidator::builder(StringValidator::builder().build())
            .no_duplicates()
            .build();

        assert!(!validator.is_valid(&json!(["apple", "banana", "apple"])).unwrap());
        assert!(validator.is_valid(&json!(["apple", "banana"])).unwrap());
    }

    #[test]
    fn test_custom_comparator_applies_regardless_of_order() {
        let validator = ArrayValidator::builder(crate::validators::BaseValidator::builder().build())
            .no_duplicates()
            .comparator(|a, b| a["id"] == b["id"])
            .build();

        let input = json!([{"id": 1, "n": "a"}, {"id": 2, "n": "b"}, {"id": 1, "n": "c"}]);
        assert_eq!(
            validator.get_error_messages(&input).unwrap(),
            vec![arrays::NO_DUPLICATES]
        );
        assert!(validator
            .is_valid(&json!([{"id": 1}, {"id": 2}]))
            .unwrap());
    }

    #[test]
    fn test_structured_scalar_errors() {
        let validator = ArrayValidator::builder(
            StringValidator::builder().min_length(3).unwrap().build(),
        )
        .build();

        let errors = validator.get_errors(&json!(["ok!", "no", "x"])).unwrap();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([
                {"no": [strings::MIN_LENGTH]},
                {"x": [strings::MIN_LENGTH]}
            ])
        );
    }

    #[test]
    fn test_null_array() {
        let nullable = ArrayValidator::builder(non_negative()).nullable().unwrap().build();
        assert!(nullable.get_error_messages(&Value::Null).unwrap().is_empty());
        assert_eq!(nullable.get_errors(&Value::Null).unwrap(), ErrorTree::Elements(vec![]));

        let not_null = ArrayValidator::builder(non_negative()).not_null().unwrap().build();
        assert_eq!(
            not_null.get_error_messages(&Value::Null).unwrap(),
            vec![common::NOT_NULL]
        );

        let unset = ArrayValidator::builder(non_negative()).build();
        assert!(matches!(
            unset.is_valid(&Value::Null),
            Err(Error::ContractViolation(_))
        ));
    }

    #[test]
    fn test_null_elements() {
        // element policy wins
        let nullable_elements = ArrayValidator::builder(
            NumberValidator::builder().nullable().unwrap().build(),
        )
        .build();
        assert!(nullable_elements.is_valid(&json!([1, null])).unwrap());

        // then the array's not-null policy
        let not_null_array = ArrayValidator::builder(non_negative())
            .not_null_with_message("no holes")
            .unwrap()
            .build();
        assert_eq!(
            not_null_array.get_errors(&json!([1, null])).unwrap(),
            ErrorTree::Elements(vec![ElementError::NotNull(vec!["no holes".to_string()])])
        );
        assert_eq!(
            not_null_array.get_error_messages(&json!([null])).unwrap(),
            vec!["no holes"]
        );

        // otherwise a contract violation
        let unset = ArrayValidator::builder(non_negative()).build();
        assert!(matches!(
            unset.get_errors(&json!([1, null])),
            Err(Error::ContractViolation(_))
        ));
    }

    #[test]
    fn test_nested_arrays() {
        let inner = ArrayValidator::builder(non_negative()).not_empty().build();
        let outer = ArrayValidator::builder(inner).build();

        let input = json!([[1, 2], [], [3, -4]]);
        assert_eq!(
            outer.get_errors(&input).unwrap(),
            ErrorTree::Elements(vec![
                ElementError::Nested {
                    data: json!([]),
                    errors: ErrorTree::Messages(vec![arrays::NOT_EMPTY.to_string()]),
                },
                ElementError::Nested {
                    data: json!([3, -4]),
                    errors: ErrorTree::Elements(vec![ElementError::Value {
                        key: "-4".to_string(),
                        messages: vec![numbers::MIN.to_string()],
                    }]),
                },
            ])
        );

        assert_eq!(
            outer.get_error_messages(&input).unwrap(),
            vec![arrays::NOT_EMPTY, numbers::MIN]
        );
    }

    #[test]
    fn test_structured_structural_failures() {
        let validator = ArrayValidator::builder(non_negative())
            .not_empty()
            .no_duplicates()
            .build();

        let errors = validator.get_errors(&json!([])).unwrap();
        assert_eq!(errors.as_messages(), Some(&[arrays::NOT_EMPTY.to_string()][..]));

        let errors = validator.get_errors(&json!([1, 1])).unwrap();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([arrays::NO_DUPLICATES])
        );

        for input in [json!([]), json!([1, 1]), json!([1, -1]), json!([1, 2])] {
            assert_eq!(
                validator.get_errors(&input).unwrap().is_empty(),
                validator.is_valid(&input).unwrap(),
                "modes disagree on {}",
                input
            );
        }

        let errors = validator.get_errors(&json!([1, -1])).unwrap();
        assert_eq!(errors.elements().map(<[_]>::len), Some(1));
        assert_eq!(errors.as_messages(), None);
    }

    #[test]
    fn test_nested_null_elements_agree_across_modes() {
        let inner = ArrayValidator::builder(NumberValidator::builder().build())
            .no_duplicates()
            .build();
        let outer = ArrayValidator::builder(inner).build();
        let input = json!([[null, null]]);

        assert!(matches!(
            outer.get_error_messages(&input),
            Err(Error::ContractViolation(_))
        ));
        assert!(matches!(
            outer.get_errors(&input),
            Err(Error::ContractViolation(_))
        ));
    }

    #[test]
    fn test_element_accessor() {
        let validator = ArrayValidator::builder(non_negative()).build();
        assert_eq!(validator.element().kind(), crate::validators::ValidatorKind::Scalar);
    }

    #[test]
    fn test_with_message_on_checks() {
        let validator = ArrayValidator::builder(non_negative())
            .no_duplicates()
            .with_message("unique please")
            .min_length(2)
            .unwrap()
            .with_message("two at least")
            .build();

        assert_eq!(
            validator.get_error_messages(&json!([1])).unwrap(),
            vec!["two at least"]
        );
        assert_eq!(
            validator.get_error_messages(&json!([1, 1])).unwrap(),
            vec!["unique please"]
        );
    }

    #[test]
    fn test_wrong_type() {
        let validator = ArrayValidator::builder(non_negative()).build();
        assert_eq!(
            validator.get_error_messages(&json!({"a": 1})).unwrap(),
            vec![arrays::NOT_AN_ARRAY]
        );
    }
}
