//! Schema validator
//!
//! Validates objects field by field. Each field maps to one validator; input
//! keys that the schema does not name are ignored and missing keys are
//! looked up as null.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result, ValidationError};
use crate::messages::schemas;
use crate::validators::base::{Nullability, Validate};
use crate::validators::report::ErrorTree;
use crate::validators::{AnyValidator, ValidatorKind};

static NULL: Value = Value::Null;

/// Validator for objects
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    name: Option<String>,
    nullability: Nullability,
    fields: IndexMap<String, AnyValidator>,
}

impl SchemaValidator {
    /// Start configuring a schema validator
    pub fn builder() -> SchemaValidatorBuilder {
        SchemaValidatorBuilder::default()
    }

    /// Validator of a field
    pub fn field(&self, name: &str) -> Option<&AnyValidator> {
        self.fields.get(name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn field_value<'a>(input: &'a Value, key: &str) -> &'a Value {
        input.get(key).unwrap_or(&NULL)
    }
}

impl Validate for SchemaValidator {
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

        if !input.is_object() {
            return Ok(vec![schemas::NOT_AN_OBJECT.to_string()]);
        }

        let mut messages = Vec::new();
        for (key, validator) in &self.fields {
            messages.extend(validator.get_error_messages(Self::field_value(input, key))?);
        }

        Ok(messages)
    }

    fn get_errors(&self, input: &Value) -> Result<ErrorTree> {
        if input.is_null() {
            return match &self.nullability {
                Nullability::Nullable => Ok(ErrorTree::Fields(IndexMap::new())),
                Nullability::NotNull(message) => Ok(ErrorTree::Messages(vec![message.clone()])),
                Nullability::Unset => Err(Error::null_input()),
            };
        }

        if !input.is_object() {
            return Ok(ErrorTree::Messages(vec![schemas::NOT_AN_OBJECT.to_string()]));
        }

        let mut fields = IndexMap::new();
        for (key, validator) in &self.fields {
            let value = Self::field_value(input, key);
            let errors = match validator.kind() {
                ValidatorKind::Schema => validator.get_errors(value)?,
                ValidatorKind::Scalar | ValidatorKind::Array => {
                    ErrorTree::Messages(validator.get_error_messages(value)?)
                }
            };

            if !errors.is_empty() {
                fields.insert(key.clone(), errors);
            }
        }

        tracing::trace!(failed_fields = fields.len(), "checked schema");
        Ok(ErrorTree::Fields(fields))
    }

    fn validate(&self, input: &Value) -> Result<()> {
        let errors = self.get_errors(input)?;

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::from_tree(errors)
                .with_name(self.name())
                .into())
        }
    }
}

/// Builder for [`SchemaValidator`]
#[derive(Debug, Clone, Default)]
pub struct SchemaValidatorBuilder {
    inner: SchemaValidator,
}

impl SchemaValidatorBuilder {
    /// Name used in raised errors
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    /// Add a field; a later field with the same name replaces the earlier one
    pub fn field(mut self, name: impl Into<String>, validator: impl Into<AnyValidator>) -> Self {
        self.inner.fields.insert(name.into(), validator.into());
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

    /// Finish configuration
    pub fn build(self) -> SchemaValidator {
        self.inner
    }
}
