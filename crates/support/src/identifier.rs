//! Identifier-type dispatch
//!
//! [`IdentifierValidators`] maps a type name (matched case-insensitively) to a
//! validator function. The table is built by the caller; nothing is global.
//! Unknown types are accepted: they are "not validated here", and callers
//! that need stricter behavior must check [`IdentifierValidators::supports`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use verity_validator::predicates::{is_alphanumeric, is_length};

use crate::checksum::{is_cnpj, is_cpf};

/// A validator for one identifier type.
pub type IdentifierCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Rules for the free-form `OTHER` identifier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherPolicy {
    /// Maximum length in characters; `None` for no limit.
    pub max_len: Option<usize>,
    /// Require a non-empty, ASCII-alphanumeric value.
    pub require_alphanumeric: bool,
}

impl Default for OtherPolicy {
    fn default() -> Self {
        Self {
            max_len: Some(20),
            require_alphanumeric: true,
        }
    }
}

impl OtherPolicy {
    /// Accepts anything.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            max_len: None,
            require_alphanumeric: false,
        }
    }

    /// Checks `value` against the policy.
    #[must_use]
    pub fn check(&self, value: &str) -> bool {
        let within_len = self.max_len.is_none_or(|max| is_length(value, 0, max));
        within_len && (!self.require_alphanumeric || is_alphanumeric(value))
    }
}

/// Type name to validator table.
///
/// # Examples
///
/// ```
/// use verity_support::{IdentifierValidators, OtherPolicy};
///
/// let validators = IdentifierValidators::standard().with_other(OtherPolicy::default());
/// assert!(validators.is_valid("11144477735", "cpf"));
/// assert!(validators.is_valid("AB12", "Other"));
/// assert!(validators.is_valid("anything", "PASSPORT"));
/// ```
#[derive(Clone, Default)]
pub struct IdentifierValidators {
    checks: HashMap<String, IdentifierCheck>,
}

impl IdentifierValidators {
    /// Creates an empty table; every type is accepted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with `CPF` and `CNPJ`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new().register("CPF", is_cpf).register("CNPJ", is_cnpj)
    }

    /// Registers `check` for `kind`, replacing any previous validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn register<F>(mut self, kind: &str, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.checks.insert(kind.to_uppercase(), Arc::new(check));
        self
    }

    /// Registers the `OTHER` type with `policy`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_other(self, policy: OtherPolicy) -> Self {
        self.register("OTHER", move |value| policy.check(value))
    }

    /// Returns true if `kind` has a validator.
    #[must_use]
    pub fn supports(&self, kind: &str) -> bool {
        self.checks.contains_key(&kind.to_uppercase())
    }

    /// Validates `value` as `kind`. Unknown kinds pass.
    #[must_use]
    pub fn is_valid(&self, value: &str, kind: &str) -> bool {
        match self.checks.get(&kind.to_uppercase()) {
            Some(check) => check(value),
            None => {
                tracing::trace!(kind, "no validator registered, accepting");
                true
            }
        }
    }
}

impl fmt::Debug for IdentifierValidators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.checks.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("IdentifierValidators")
            .field("kinds", &kinds)
            .finish()
    }
}

/// Validates `value` as `kind` using the standard `CPF`/`CNPJ` table.
///
/// # Examples
///
/// ```
/// use verity_support::is_valid_identifier;
///
/// assert!(is_valid_identifier("11222333000181", "CNPJ"));
/// assert!(!is_valid_identifier("00000000000", "CPF"));
/// assert!(is_valid_identifier("whatever", "unknown"));
/// ```
#[must_use]
pub fn is_valid_identifier(value: &str, kind: &str) -> bool {
    IdentifierValidators::standard().is_valid(value, kind)
}
