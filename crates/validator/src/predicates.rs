//! Stock predicates
//!
//! Ready-made [`Rule`]s for common string checks. Each carries a default
//! message that can be replaced with [`Rule::with_message`]:
//!
//! ```rust
//! use verity_validator::predicates;
//! use verity_validator::prelude::*;
//!
//! let rules = RuleMap::new()
//!     .rule("email", predicates::email())
//!     .rules("nick", vec![
//!         predicates::alphanumeric(),
//!         predicates::length(3, 20).with_message("{} must have 3 to 20 characters"),
//!     ]);
//! # assert_eq!(rules.len(), 2);
//! ```
//!
//! The `is_*` functions are the underlying string tests. Values that are not
//! strings fail every string rule.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::rule::Rule;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("url pattern compiles"));

static ALPHANUMERIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("alphanumeric pattern compiles"));

// ============================================================================
// STRING TESTS
// ============================================================================

/// Returns true if `value` looks like an email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Returns true if `value` is an `http` or `https` URL.
#[must_use]
pub fn is_url(value: &str) -> bool {
    URL_REGEX.is_match(value)
}

/// Returns true if `value` is non-empty and only holds ASCII letters and digits.
#[must_use]
pub fn is_alphanumeric(value: &str) -> bool {
    ALPHANUMERIC_REGEX.is_match(value)
}

/// Returns true if `value` has between `min` and `max` characters, inclusive.
#[must_use]
pub fn is_length(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

// ============================================================================
// RULES
// ============================================================================

fn string_rule(message: &'static str, test: fn(&str) -> bool) -> Rule {
    Rule::check(message, move |v: &Value| v.as_str().is_some_and(test))
}

/// Email address rule.
#[must_use]
pub fn email() -> Rule {
    string_rule("{} is not a valid email", is_email)
}

/// `http`/`https` URL rule.
#[must_use]
pub fn url() -> Rule {
    string_rule("{} is not a valid URL", is_url)
}

/// ASCII letters and digits only; the empty string fails.
#[must_use]
pub fn alphanumeric() -> Rule {
    string_rule("{} must contain only letters and digits", is_alphanumeric)
}

/// Length between `min` and `max`, inclusive.
///
/// Strings are measured in characters and arrays in elements. Other values
/// fail.
#[must_use]
pub fn length(min: usize, max: usize) -> Rule {
    Rule::check(
        format!("must have between {min} and {max} characters"),
        move |v: &Value| match v {
            Value::String(s) => is_length(s, min, max),
            Value::Array(items) => (min..=max).contains(&items.len()),
            _ => false,
        },
    )
}

/// Regular expression rule.
///
/// # Examples
///
/// ```
/// use verity_validator::predicates::matches;
///
/// assert!(matches(r"^\d{5}-\d{3}$").is_ok());
/// assert!(matches(r"(unclosed").is_err());
/// ```
pub fn matches(pattern: &str) -> Result<Rule, regex::Error> {
    let pattern = Regex::new(pattern)?;
    Ok(Rule::check("{} has an invalid format", move |v: &Value| {
        v.as_str().is_some_and(|s| pattern.is_match(s))
    }))
}

// ============================================================================
// TESTS
// ============================================================================
