//! Maps GraphQL client error envelopes to display text
//!
//! The envelope follows the client's JSON shape:
//!
//! ```json
//! {
//!   "graphQLErrors": [{ "message": "UNIQUE", "state": { "email": ["UNIQUE_ATTRIBUTE"] } }],
//!   "networkError": { "statusCode": 500 }
//! }
//! ```
//!
//! Codes are resolved through a [`MessageCatalog`]. Only the first GraphQL
//! error is considered.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Error payload produced by the GraphQL client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[serde(rename = "graphQLErrors", default)]
    pub graphql_errors: Vec<GraphQlError>,
    #[serde(default)]
    pub network_error: Option<NetworkError>,
}

impl ErrorEnvelope {
    /// Parses an envelope from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One GraphQL error. `state` maps field names to error codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub state: Option<IndexMap<String, Vec<String>>>,
}

/// Transport failure.
///
/// `status_code` is `None` when the field is absent, which means the server
/// was unreachable, and `Some(None)` when it is present but `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkError {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_code: Option<Option<u16>>,
}

impl NetworkError {
    /// Returns true when no status code was reported at all.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        self.status_code.is_none()
    }
}

/// Wraps a present field in `Some`, keeping an explicit `null` apart from a
/// missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<u16>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u16>::deserialize(deserializer).map(Some)
}

/// Catalog value: one text, or texts keyed by attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Text(String),
    PerAttribute(HashMap<String, String>),
}

impl From<&str> for CatalogEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for CatalogEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Code to message table plus the fallback texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub codes: HashMap<String, CatalogEntry>,
    /// Used for unmapped codes and unexpected failures.
    pub generic: String,
    /// Report message when field-level errors are present.
    pub fields: String,
    /// Used when the server could not be reached.
    pub network: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl MessageCatalog {
    /// Catalog with no codes; everything resolves to the generic message.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
            generic: "Unexpected error".to_owned(),
            fields: "Error: one or more fields were not filled in correctly".to_owned(),
            network: "Could not reach the server: check your connection".to_owned(),
        }
    }

    /// Catalog with the default code table.
    #[must_use]
    pub fn standard() -> Self {
        [
            ("LOGIN_FAILED", "Invalid username or password"),
            ("TOO_LARGE", "Number too large"),
            ("INVALID_FORMAT", "Invalid format"),
            ("DUPLICATED", "Duplicated"),
            ("CHOOSE_BETWEEN", "Only one option must be chosen"),
            ("UNIQUE", "Already in use"),
            ("UNIQUE_ATTRIBUTE", "Must be unique"),
            ("INVALID_DATA", "Does not exist"),
        ]
        .into_iter()
        .fold(Self::empty(), |catalog, (code, text)| catalog.with_code(code, text))
    }

    /// Adds or replaces the entry for `code`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, code: impl Into<String>, entry: impl Into<CatalogEntry>) -> Self {
        self.codes.insert(code.into(), entry.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_generic(mut self, text: impl Into<String>) -> Self {
        self.generic = text.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_fields(mut self, text: impl Into<String>) -> Self {
        self.fields = text.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_network(mut self, text: impl Into<String>) -> Self {
        self.network = text.into();
        self
    }

    /// Resolves `code`, falling back to the generic message.
    ///
    /// Per-attribute entries only resolve when `attribute` names one of them.
    #[must_use]
    pub fn lookup(&self, code: &str, attribute: Option<&str>) -> &str {
        let text = match self.codes.get(code) {
            Some(CatalogEntry::Text(text)) => Some(text),
            Some(CatalogEntry::PerAttribute(texts)) => attribute.and_then(|a| texts.get(a)),
            None => None,
        };
        text.map_or(self.generic.as_str(), String::as_str)
    }
}

/// Display-ready error. `data` holds per-field messages when the server
/// reported field-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<IndexMap<String, String>>,
}

impl ErrorReport {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    /// One-string rendering of the report.
    ///
    /// Returns `None` for an empty field map. Several field messages are
    /// each rendered as `"● message\n"`.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let Some(data) = &self.data else {
            return Some(self.message.clone());
        };
        match data.len() {
            0 => None,
            1 => data.values().next().cloned(),
            _ => Some(data.values().map(|text| format!("● {text}\n")).collect()),
        }
    }
}

/// Builds an [`ErrorReport`] from a client error envelope.
///
/// # Examples
///
/// ```
/// use verity_support::{ErrorEnvelope, MessageCatalog, extract};
///
/// let envelope = ErrorEnvelope::from_json(
///     r#"{"graphQLErrors": [{"message": "x", "state": {"email": ["UNIQUE"]}}]}"#,
/// )?;
/// let report = extract(&envelope, &MessageCatalog::standard());
/// assert_eq!(report.summary().as_deref(), Some("Already in use"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[must_use]
pub fn extract(envelope: &ErrorEnvelope, catalog: &MessageCatalog) -> ErrorReport {
    if let Some(first) = envelope.graphql_errors.first() {
        let Some(state) = &first.state else {
            return ErrorReport::message(catalog.lookup(&first.message, None));
        };

        let data: IndexMap<String, String> = state
            .iter()
            .map(|(field, codes)| {
                let text = codes
                    .first()
                    .map_or(catalog.generic.as_str(), |code| catalog.lookup(code, Some(field.as_str())));
                (field.clone(), text.to_owned())
            })
            .collect();
        tracing::debug!(fields = data.len(), "mapped field-level errors");

        return ErrorReport {
            message: catalog.fields.clone(),
            data: Some(data),
        };
    }

    match envelope.network_error {
        Some(network) if network.is_unreachable() => ErrorReport::message(&catalog.network),
        _ => ErrorReport::message(&catalog.generic),
    }
}
