//! Validators
//!
//! Scalar validators (base, string, number, card) evaluate their own rules.
//! Composite validators (array, schema) hold children as [`AnyValidator`] and
//! assemble the children's results.

pub mod arrays;
pub mod base;
pub mod cards;
pub mod facets;
pub mod numbers;
pub mod report;
pub mod schemas;
pub mod strings;

use serde_json::Value;

use crate::error::Result;

// Re-exports
pub use arrays::{ArrayValidator, ArrayValidatorBuilder};
pub use base::{BaseValidator, BaseValidatorBuilder, Nullability, Rule, RuleSet, Validate};
pub use cards::{CardProvider, CardValidator, CardValidatorBuilder};
pub use numbers::{NumberValidator, NumberValidatorBuilder};
pub use report::{CardErrors, ElementError, ErrorTree};
pub use schemas::{SchemaValidator, SchemaValidatorBuilder};
pub use strings::{StringValidator, StringValidatorBuilder};

/// Shape of the values a validator reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    /// Single value with a flat message list
    Scalar,
    /// Sequence validated element by element
    Array,
    /// Object validated field by field
    Schema,
}

/// Any validator, as held by composite validators
#[derive(Debug, Clone)]
pub enum AnyValidator {
    /// Custom rules over arbitrary values
    Base(BaseValidator),
    /// String rules
    String(StringValidator),
    /// Number rules
    Number(NumberValidator),
    /// Payment card rules
    Card(CardValidator),
    /// Array of child values
    Array(ArrayValidator),
    /// Object schema
    Schema(SchemaValidator),
}

impl AnyValidator {
    /// Classify the wrapped validator
    pub fn kind(&self) -> ValidatorKind {
        match self {
            AnyValidator::Base(_)
            | AnyValidator::String(_)
            | AnyValidator::Number(_)
            | AnyValidator::Card(_) => ValidatorKind::Scalar,
            AnyValidator::Array(_) => ValidatorKind::Array,
            AnyValidator::Schema(_) => ValidatorKind::Schema,
        }
    }

    fn as_validate(&self) -> &dyn Validate {
        match self {
            AnyValidator::Base(v) => v,
            AnyValidator::String(v) => v,
            AnyValidator::Number(v) => v,
            AnyValidator::Card(v) => v,
            AnyValidator::Array(v) => v,
            AnyValidator::Schema(v) => v,
        }
    }
}

impl Validate for AnyValidator {
    fn name(&self) -> Option<&str> {
        self.as_validate().name()
    }

    fn nullability(&self) -> &Nullability {
        self.as_validate().nullability()
    }

    fn get_error_messages(&self, input: &Value) -> Result<Vec<String>> {
        self.as_validate().get_error_messages(input)
    }

    fn get_errors(&self, input: &Value) -> Result<ErrorTree> {
        self.as_validate().get_errors(input)
    }

    fn validate(&self, input: &Value) -> Result<()> {
        self.as_validate().validate(input)
    }
}

impl From<BaseValidator> for AnyValidator {
    fn from(v: BaseValidator) -> Self {
        AnyValidator::Base(v)
    }
}

impl From<StringValidator> for AnyValidator {
    fn from(v: StringValidator) -> Self {
        AnyValidator::String(v)
    }
}

impl From<NumberValidator> for AnyValidator {
    fn from(v: NumberValidator) -> Self {
        AnyValidator::Number(v)
    }
}

impl From<CardValidator> for AnyValidator {
    fn from(v: CardValidator) -> Self {
        AnyValidator::Card(v)
    }
}

impl From<ArrayValidator> for AnyValidator {
    fn from(v: ArrayValidator) -> Self {
        AnyValidator::Array(v)
    }
}

impl From<SchemaValidator> for AnyValidator {
    fn from(v: SchemaValidator) -> Self {
        AnyValidator::Schema(v)
    }
}
