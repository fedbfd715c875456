//! Error report types
//!
//! Validators report failures either as a flat list of messages or as a
//! structured tree keyed by field name (schemas) or by element (arrays).

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Structured validation errors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorTree {
    /// Flat list of messages
    Messages(Vec<String>),
    /// Errors keyed by schema field name, in schema order
    Fields(IndexMap<String, ErrorTree>),
    /// Errors of individual array elements
    Elements(Vec<ElementError>),
}

impl ErrorTree {
    /// Whether the tree holds no errors at all
    pub fn is_empty(&self) -> bool {
        match self {
            ErrorTree::Messages(messages) => messages.is_empty(),
            ErrorTree::Fields(fields) => fields.is_empty(),
            ErrorTree::Elements(elements) => elements.is_empty(),
        }
    }

    /// Messages of a flat tree
    pub fn as_messages(&self) -> Option<&[String]> {
        match self {
            ErrorTree::Messages(messages) => Some(messages),
            _ => None,
        }
    }

    /// Entry for a schema field
    pub fn field(&self, name: &str) -> Option<&ErrorTree> {
        match self {
            ErrorTree::Fields(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Array element entries
    pub fn elements(&self) -> Option<&[ElementError]> {
        match self {
            ErrorTree::Elements(elements) => Some(elements),
            _ => None,
        }
    }
}

impl Default for ErrorTree {
    fn default() -> Self {
        ErrorTree::Messages(Vec::new())
    }
}

/// Error entry for one array element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementError {
    /// Scalar element that failed, keyed by its string form
    Value {
        /// String form of the element
        key: String,
        /// Messages from the element validator
        messages: Vec<String>,
    },
    /// Schema or array element together with its own structured errors
    Nested {
        /// The failing element
        data: Value,
        /// Structured errors of the element
        errors: ErrorTree,
    },
    /// Null element rejected by a not-null policy
    NotNull(Vec<String>),
}

impl Serialize for ElementError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ElementError::Value { key, messages } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, messages)?;
                map.end()
            }
            ElementError::Nested { data, errors } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("data", data)?;
                map.serialize_entry("errors", errors)?;
                map.end()
            }
            ElementError::NotNull(messages) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("notNull", messages)?;
                map.end()
            }
        }
    }
}

/// String form used to key scalar element errors
///
/// Strings are used as-is, everything else uses its JSON text.
pub fn element_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Per-part errors of a card validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardErrors {
    /// Checksum or provider-shape failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Expiration parse or range failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    /// Custom rule failures
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

impl CardErrors {
    /// Whether no part failed
    pub fn is_empty(&self) -> bool {
        self.number.is_none() && self.expiration_date.is_none() && self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tree_serialization() {
        let mut fields = IndexMap::new();
        fields.insert(
            "name".to_string(),
            ErrorTree::Messages(vec!["too short".to_string()]),
        );
        fields.insert(
            "tags".to_string(),
            ErrorTree::Elements(vec![
                ElementError::Value {
                    key: "-1".to_string(),
                    messages: vec!["negative".to_string()],
                },
                ElementError::NotNull(vec!["missing".to_string()]),
                ElementError::Nested {
                    data: json!({"id": 1}),
                    errors: ErrorTree::Messages(vec!["bad".to_string()]),
                },
            ]),
        );

        let value = serde_json::to_value(ErrorTree::Fields(fields)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": ["too short"],
                "tags": [
                    {"-1": ["negative"]},
                    {"notNull": ["missing"]},
                    {"data": {"id": 1}, "errors": ["bad"]}
                ]
            })
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(ErrorTree::default().is_empty());
        assert!(ErrorTree::Fields(IndexMap::new()).is_empty());
        assert!(!ErrorTree::Elements(vec![ElementError::NotNull(vec![])]).is_empty());
    }

    #[test]
    fn test_element_key() {
        assert_eq!(element_key(&json!("apple")), "apple");
        assert_eq!(element_key(&json!(-1)), "-1");
        assert_eq!(element_key(&json!(true)), "true");
    }

    #[test]
    fn test_card_errors_serialization() {
        let errors = CardErrors {
            number: None,
            expiration_date: Some("Invalid expiration date".to_string()),
            messages: vec![],
        };
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"expirationDate": "Invalid expiration date"})
        );
        assert!(CardErrors::default().is_empty());
    }
}
