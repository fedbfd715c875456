//! Default message catalogue
//!
//! Every rule carries one of these strings unless the caller supplies its own
//! through `with_message`. Callers and tests compare against these constants.

/// Messages shared by every validator kind
pub mod common {
    /// Default not-null message
    pub const NOT_NULL: &str = "the value cannot be null or undefined";
    /// Contract violation message for unconfigured null input
    pub const NULL_INPUT: &str = "input cannot be null or undefined";
    /// Both nullability flags requested
    pub const NULLABLE_AND_NOT_NULL: &str = "Cannot use not_null() and nullable() together";
    /// Default message for custom rules
    pub const CUSTOM_RULE: &str = "the value does not meet the requirements.";
    /// Summary message when the validator has no name
    pub const DEFAULT_ERROR: &str = "the input does not meet the requirements.";
    /// Suffix of the summary message for named validators
    pub const FIELD_INVALID: &str = "is not valid";
    /// Lower bound set above the upper bound
    pub const MIN_GREATER_THAN_MAX: &str = "min cannot be greater than max";
    /// Upper bound set below the lower bound
    pub const MAX_SMALLER_THAN_MIN: &str = "max cannot be smaller than min";
}

/// String validator messages
#[allow(missing_docs)]
pub mod strings {
    pub const IS_URL: &str = "the value is not a valid url";
    pub const IS_JWT: &str = "the value is not a valid JWT";
    pub const IS_IP: &str = "the value is not a valid IP address";
    pub const NOT_EMPTY: &str = "the value cannot be empty";
    pub const NOT_BLANK: &str = "the value cannot be blank";
    pub const IS_EMAIL: &str = "the value is not a valid email";
    pub const MAX_LENGTH: &str = "the value exceeds the maximum length";
    pub const ONLY_NUMBERS: &str = "the value must contain only numbers";
    pub const IS_ISO8601: &str = "the value is not a valid ISO8601 date";
    pub const NO_NUMBERS: &str = "the value must not contain any numbers";
    pub const IS_BTC_ADDRESS: &str = "the value is not a valid BTC address";
    pub const IS_ETH_ADDRESS: &str = "the value is not a valid ETH address";
    pub const HAS_NUMBER: &str = "the value must contain at least one number";
    pub const MIN_LENGTH: &str = "the value does not meet the minimum length";
    pub const FIXED_LENGTH: &str = "the value does not meet the fixed length";
    pub const ONLY_CHARACTERS: &str = "the value must contain only characters";
    pub const HAS_UPPERCASE: &str = "the value must contain at least one uppercase letter";
    pub const HAS_LOWERCASE: &str = "the value must contain at least one lowercase letter";
    pub const NO_WHITESPACES: &str = "the value must not contain any whitespace characters";
    pub const NO_SPECIAL_CHARACTERS: &str = "the value must not contain any special characters";
    pub const NO_REPEATED_CHARACTERS: &str = "the value must not contain any repeated characters";
    pub const HAS_SPECIAL_CHARACTER: &str = "the value must contain at least one special character";
    pub const NOT_A_STRING: &str = "the value must be a string";

    pub const MAX_LENGTH_SMALLER_THAN_ONE: &str = "max length cannot be less than 1";
    pub const FIXED_LENGTH_SMALLER_THAN_ONE: &str = "fixed length cannot be less than 1";
    pub const MIN_LENGTH_GREATER_THAN_MAX: &str = "min length cannot be greater than max length";
    pub const MAX_LENGTH_SMALLER_THAN_MIN: &str = "max length cannot be smaller than min length";

    /// Two configuration methods that cannot be combined
    pub fn incompatible(method: &str, other: &str) -> String {
        format!("{}() cannot be used with {}()", method, other)
    }
}

/// Number validator messages
#[allow(missing_docs)]
pub mod numbers {
    pub const IS_POSITIVE: &str = "the value must be positive";
    pub const IS_NEGATIVE: &str = "the value must be negative";
    pub const MAX: &str = "the value exceeds the maximum value";
    pub const MIN: &str = "the value does not meet the minimum value";
    pub const IS_NON_NEGATIVE: &str = "the value must be non-negative";
    pub const NOT_A_NUMBER: &str = "the value must be a number";
    pub const NON_FINITE_BOUND: &str = "min() and max() require a finite number";

    pub const POSITIVE_AND_NEGATIVE: &str = "Cannot use is_positive() and is_negative() together";
    pub const NEGATIVE_AND_NON_NEGATIVE: &str =
        "Cannot use is_negative() and is_non_negative() together";
    pub const NEGATIVE_AND_POSITIVE_OR_NON_NEGATIVE: &str =
        "Cannot use is_negative() and is_positive() or is_non_negative() together";
}

/// Array validator messages
#[allow(missing_docs)]
pub mod arrays {
    pub const NOT_EMPTY: &str = "the array cannot be empty";
    pub const MAX: &str = "the array exceeds the maximum length";
    pub const MIN: &str = "the array does not meet the minimum length";
    pub const NO_DUPLICATES: &str = "the array must not contain any duplicates";
    pub const NOT_AN_ARRAY: &str = "the value must be an array";
}

/// Schema validator messages
#[allow(missing_docs)]
pub mod schemas {
    pub const NOT_AN_OBJECT: &str = "the value must be an object";
}

/// Card validator messages
#[allow(missing_docs)]
pub mod cards {
    pub const INVALID_NUMBER: &str = "Invalid card number";
    pub const INVALID_EXPIRATION: &str = "Invalid expiration date";
    pub const NOT_A_CARD: &str = "the value must be a card number";

    /// Provider-shape failure message
    pub fn invalid_for_provider(provider: impl std::fmt::Display) -> String {
        format!("Invalid card number for provider {}", provider)
    }
}
