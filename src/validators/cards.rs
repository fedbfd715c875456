//! Payment card validator
//!
//! Checks a card number against the Luhn checksum, optionally against the
//! number shape of a provider, and optionally checks an `MM/YY` expiration
//! date. Input is either the bare number as a string or an object
//! `{"cardNumber": ..., "provider": ..., "expirationDate": ...}`.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{CardError, Error, Result, ValidationError};
use crate::messages::{cards, common};
use crate::predicates::luhn_checksum;
use crate::validators::base::{Nullability, Rule, RuleSet, Validate};
use crate::validators::report::CardErrors;

static EXPIRATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{2})$").unwrap());

static MASTERCARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(5[1-5]|2[2-7])").unwrap());
static AMEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^3[47]").unwrap());
static DISCOVER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(6011|622(1[2-9]{2}|[2-8][0-9]{2}|9[0-2][0-5])|64[4-9]|65)").unwrap()
});
static JCB: Lazy<Regex> = Lazy::new(|| Regex::new(r"^35(2[89]|[3-8][0-9])").unwrap());
static DINERS_CLUB: Lazy<Regex> = Lazy::new(|| Regex::new(r"^3(0[0-5]|[68])").unwrap());
static MAESTRO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(5[06-8]|6)").unwrap());
static TARJETA_NARANJA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(5895|546553)").unwrap());

// =============================================================================
// Providers
// =============================================================================

/// Card issuers with a known number shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardProvider {
    /// 13 or 16 digits starting with 4
    Visa,
    /// 16 digits starting with 51-55 or 22-27
    MasterCard,
    /// 15 digits starting with 34 or 37
    AmericanExpress,
    /// 16 digits starting with 6011, 622126-622925, 644-649 or 65
    Discover,
    /// 16 digits starting with 3528-3589
    Jcb,
    /// 14 digits starting with 300-305, 36 or 38
    DinersClub,
    /// 12 to 19 digits starting with 50, 56-58 or 6
    Maestro,
    /// 16 to 19 digits starting with 62
    UnionPay,
    /// 16 digits starting with 5895 or 546553
    TarjetaNaranja,
}

impl CardProvider {
    /// Every provider
    pub const ALL: [CardProvider; 9] = [
        CardProvider::Visa,
        CardProvider::MasterCard,
        CardProvider::AmericanExpress,
        CardProvider::Discover,
        CardProvider::Jcb,
        CardProvider::DinersClub,
        CardProvider::Maestro,
        CardProvider::UnionPay,
        CardProvider::TarjetaNaranja,
    ];

    /// Provider name
    pub fn as_str(&self) -> &'static str {
        match self {
            CardProvider::Visa => "Visa",
            CardProvider::MasterCard => "MasterCard",
            CardProvider::AmericanExpress => "AmericanExpress",
            CardProvider::Discover => "Discover",
            CardProvider::Jcb => "JCB",
            CardProvider::DinersClub => "DinersClub",
            CardProvider::Maestro => "Maestro",
            CardProvider::UnionPay => "UnionPay",
            CardProvider::TarjetaNaranja => "TarjetaNaranja",
        }
    }

    /// Whether `number` has this provider's length and prefix
    pub fn matches(&self, number: &str) -> bool {
        let len = number.len();

        match self {
            CardProvider::Visa => (len == 13 || len == 16) && number.starts_with('4'),
            CardProvider::MasterCard => len == 16 && MASTERCARD.is_match(number),
            CardProvider::AmericanExpress => len == 15 && AMEX.is_match(number),
            CardProvider::Discover => len == 16 && DISCOVER.is_match(number),
            CardProvider::Jcb => len == 16 && JCB.is_match(number),
            CardProvider::DinersClub => len == 14 && DINERS_CLUB.is_match(number),
            CardProvider::Maestro => (12..=19).contains(&len) && MAESTRO.is_match(number),
            CardProvider::UnionPay => (16..=19).contains(&len) && number.starts_with("62"),
            CardProvider::TarjetaNaranja => len == 16 && TARJETA_NARANJA.is_match(number),
        }
    }
}

impl fmt::Display for CardProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardProvider {
    type Err = Error;

    /// Parse a provider name, ignoring case, spaces, dashes and underscores
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "visa" => Ok(CardProvider::Visa),
            "mastercard" => Ok(CardProvider::MasterCard),
            "americanexpress" | "amex" => Ok(CardProvider::AmericanExpress),
            "discover" => Ok(CardProvider::Discover),
            "jcb" => Ok(CardProvider::Jcb),
            "dinersclub" | "diners" => Ok(CardProvider::DinersClub),
            "maestro" => Ok(CardProvider::Maestro),
            "unionpay" => Ok(CardProvider::UnionPay),
            "tarjetanaranja" | "naranja" => Ok(CardProvider::TarjetaNaranja),
            _ => Err(Error::value(format!("Unknown card provider: '{}'", s))),
        }
    }
}

// =============================================================================
// Expiration
// =============================================================================

/// Whether an `MM/YY` expiration date is well formed and not in the past
///
/// The two-digit year is compared against `today`'s year modulo 100, so
/// there is no century handling. The current month is still valid.
pub fn is_expiration_valid_at(expiration: &str, today: NaiveDate) -> bool {
    let captures = match EXPIRATION.captures(expiration) {
        Some(captures) => captures,
        None => return false,
    };

    let (month, year) = match (captures[1].parse::<u32>(), captures[2].parse::<i32>()) {
        (Ok(month), Ok(year)) => (month, year),
        _ => return false,
    };

    let current_year = today.year() % 100;
    let current_month = today.month();

    (1..=12).contains(&month)
        && year >= current_year
        && !(year == current_year && month < current_month)
}

fn expiration_error() -> Error {
    ValidationError::new(vec![cards::INVALID_EXPIRATION.to_string()])
        .with_name(Some("Expiration"))
        .into()
}

// =============================================================================
// CardValidator
// =============================================================================

/// Card fields read from the input
#[derive(Debug, Clone, Copy)]
struct CardInput<'a> {
    number: &'a str,
    provider: Option<&'a str>,
    expiration: Option<&'a str>,
}

impl<'a> CardInput<'a> {
    fn from_value(input: &'a Value) -> Option<Self> {
        match input {
            Value::String(number) => Some(Self {
                number,
                provider: None,
                expiration: None,
            }),
            Value::Object(map) => Some(Self {
                number: map.get("cardNumber")?.as_str()?,
                provider: map.get("provider").and_then(Value::as_str),
                expiration: map.get("expirationDate").and_then(Value::as_str),
            }),
            _ => None,
        }
    }
}

/// Errors of one card in both reporting shapes
struct CardReport {
    errors: CardErrors,
    flat: Vec<String>,
}

/// Validator for payment cards
#[derive(Debug, Clone, Default)]
pub struct CardValidator {
    name: Option<String>,
    nullability: Nullability,
    rules: RuleSet<str>,
    reference_date: Option<NaiveDate>,
}

impl CardValidator {
    /// Start configuring a card validator
    pub fn builder() -> CardValidatorBuilder {
        CardValidatorBuilder::default()
    }

    /// Check an `MM/YY` expiration date against today's local date
    pub fn validate_expiration(expiration: &str) -> Result<()> {
        Self::validate_expiration_at(expiration, Local::now().date_naive())
    }

    /// Check an `MM/YY` expiration date against `today`
    pub fn validate_expiration_at(expiration: &str, today: NaiveDate) -> Result<()> {
        if is_expiration_valid_at(expiration, today) {
            Ok(())
        } else {
            Err(expiration_error())
        }
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn report(&self, card: CardInput<'_>) -> CardReport {
        let mut errors = CardErrors {
            messages: self.rules.failures(card.number),
            ..CardErrors::default()
        };
        let mut flat = errors.messages.clone();

        if !luhn_checksum(card.number) {
            errors.number = Some(cards::INVALID_NUMBER.to_string());
            flat.push(cards::INVALID_NUMBER.to_string());
        }

        if let Some(provider) = card.provider {
            let shape_ok = provider
                .parse::<CardProvider>()
                .map(|p| p.matches(card.number))
                .unwrap_or(false);

            if !shape_ok {
                // the more specific message replaces the checksum one
                let message = cards::invalid_for_provider(provider);
                errors.number = Some(message.clone());
                flat.push(message);
            }
        }

        if let Some(expiration) = card.expiration {
            if !is_expiration_valid_at(expiration, self.today()) {
                errors.expiration_date = Some(cards::INVALID_EXPIRATION.to_string());
                flat.push(cards::INVALID_EXPIRATION.to_string());
            }
        }

        CardReport { errors, flat }
    }

    /// Per-part errors for a card given as typed arguments
    pub fn check(
        &self,
        number: &str,
        provider: Option<CardProvider>,
        expiration: Option<&str>,
    ) -> CardErrors {
        let provider = provider.map(|p| p.as_str());
        self.report(CardInput {
            number,
            provider,
            expiration,
        })
        .errors
    }

    /// Raise a [`CardError`] for a card given as typed arguments
    pub fn validate_card(
        &self,
        number: &str,
        provider: Option<CardProvider>,
        expiration: Option<&str>,
    ) -> Result<()> {
        let errors = self.check(number, provider, expiration);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CardError::new(errors).into())
        }
    }
}

impl Validate for CardValidator {
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

        match CardInput::from_value(input) {
            Some(card) => Ok(self.report(card).flat),
            None => Ok(vec![cards::NOT_A_CARD.to_string()]),
        }
    }

    fn validate(&self, input: &Value) -> Result<()> {
        if let Some(messages) = self.nullability.resolve(input)? {
            if messages.is_empty() {
                return Ok(());
            }
            return Err(ValidationError::new(messages).with_name(self.name()).into());
        }

        let card = match CardInput::from_value(input) {
            Some(card) => card,
            None => {
                return Err(ValidationError::new(vec![cards::NOT_A_CARD.to_string()])
                    .with_name(self.name())
                    .into())
            }
        };

        let report = self.report(card);
        tracing::trace!(failures = report.flat.len(), "checked card");

        if report.errors.is_empty() {
            Ok(())
        } else {
            Err(CardError::new(report.errors).into())
        }
    }
}

/// Builder for [`CardValidator`]
#[derive(Debug, Clone, Default)]
pub struct CardValidatorBuilder {
    inner: CardValidator,
}

impl CardValidatorBuilder {
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

    /// Add a custom rule on the card number
    pub fn add_rule<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
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

    /// Date used as "today" for expiration checks
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.inner.reference_date = Some(date);
        self
    }

    /// Finish configuration
    pub fn build(self) -> CardValidator {
        self.inner
    }
}
