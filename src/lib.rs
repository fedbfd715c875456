//! # rulekit
//!
//! Composable input validation for Rust.
//!
//! Validators are configured through builders and then frozen into immutable
//! values that can be queried any number of times, from any thread.
//!
//! ## Features
//!
//! - String rules: length bounds, character classes, email/URL/IP/ISO 8601
//!   and other format checks
//! - Number rules: inclusive bounds and sign constraints
//! - Payment card checks: Luhn checksum, provider number shapes, `MM/YY`
//!   expiration dates
//! - Array validators with per-element errors and duplicate detection
//! - Schema validators for nested objects with per-field errors
//! - Incompatible options are rejected while building, not while validating
//!
//! ## Example
//!
//! ```rust
//! use rulekit::{NumberValidator, SchemaValidator, StringValidator, Validate};
//! use serde_json::json;
//!
//! let person = SchemaValidator::builder()
//!     .field("name", StringValidator::builder().min_length(3)?.build())
//!     .field("age", NumberValidator::builder().min(18.0)?.build())
//!     .build();
//!
//! assert!(person.is_valid(&json!({"name": "John", "age": 25}))?);
//!
//! let errors = person.get_errors(&json!({"name": "Jo", "age": 13}))?;
//! assert_eq!(
//!     serde_json::to_value(&errors).unwrap(),
//!     json!({
//!         "name": ["the value does not meet the minimum length"],
//!         "age": ["the value does not meet the minimum value"]
//!     })
//! );
//! # Ok::<(), rulekit::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod messages;

// Stateless helpers
pub mod dates;
pub mod predicates;
pub mod sanitizers;

// Validators
pub mod validators;

// Re-exports for convenience
pub use error::{CardError, Error, Result, ValidationError};
pub use validators::{
    AnyValidator, ArrayValidator, BaseValidator, CardErrors, CardProvider, CardValidator,
    ElementError, ErrorTree, Nullability, NumberValidator, SchemaValidator, StringValidator,
    Validate, ValidatorKind,
};

/// Version of the rulekit library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
