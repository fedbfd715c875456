//! String sanitizers
//!
//! Pure `&str -> String` transformations for cleaning input before it is
//! validated.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static NOT_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9ñÑ]").unwrap());
static NOT_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]").unwrap());
static NOT_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-ZñÑ]").unwrap());
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static UNDERSCORE_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([a-z])").unwrap());

/// Keep ASCII letters, digits and `ñ`/`Ñ`
pub fn keep_alphanumeric(input: &str) -> String {
    NOT_ALPHANUMERIC.replace_all(input, "").into_owned()
}

/// Keep ASCII digits
pub fn keep_only_numbers(input: &str) -> String {
    NOT_DIGIT.replace_all(input, "").into_owned()
}

/// Keep ASCII letters and `ñ`/`Ñ`
pub fn keep_only_characters(input: &str) -> String {
    NOT_LETTER.replace_all(input, "").into_owned()
}

/// `camelCase` to `snake_case`
pub fn camel_case_to_snake_case(input: &str) -> String {
    UPPERCASE
        .replace_all(input, |caps: &Captures| format!("_{}", caps[0].to_lowercase()))
        .into_owned()
}

/// `snake_case` to `camelCase`
pub fn snake_case_to_camel_case(input: &str) -> String {
    UNDERSCORE_LOWER
        .replace_all(input, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Strip Spanish accents and tildes
pub fn normalize_spanish_input(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}
