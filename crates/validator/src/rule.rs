//! Rules and rule maps
//!
//! A [`RuleMap`] assigns each attribute one rule or an ordered list of rules.
//! A [`Rule`] is either a predicate with a message template or a nested
//! [`RuleMap`] applied to every element of the attribute's value.
//!
//! ```
//! use serde_json::Value;
//! use verity_validator::rule::{Rule, RuleMap};
//!
//! let address = RuleMap::new().rule(
//!     "city",
//!     Rule::check("City is required", |v: &Value| v.as_str().is_some_and(|s| !s.is_empty())),
//! );
//!
//! let rules = RuleMap::new()
//!     .rules("name", vec![
//!         Rule::check("Name is required", |v: &Value| v.as_str().is_some_and(|s| !s.is_empty())),
//!         Rule::check("{} is too long", |v: &Value| v.as_str().is_some_and(|s| s.len() <= 40)),
//!     ])
//!     .rule("addresses", Rule::nested(address));
//!
//! assert_eq!(rules.len(), 2);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::foundation::{
    AsyncFnPredicate, FnPredicate, Outcome, Predicate, PredicateError, TryFnPredicate,
};

// ============================================================================
// RULE
// ============================================================================

/// What a rule does with the attribute value.
#[derive(Clone)]
pub enum RuleKind {
    /// Run a predicate against the value.
    Predicate(Arc<dyn Predicate>),
    /// Validate each element of the value against a sub-schema.
    Nested(RuleMap),
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Nested(map) => f.debug_tuple("Nested").field(map).finish(),
        }
    }
}

/// A single validation rule.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    message: Cow<'static, str>,
}

impl Rule {
    /// Creates a rule from any [`Predicate`].
    pub fn from_predicate<P>(message: impl Into<Cow<'static, str>>, predicate: P) -> Self
    where
        P: Predicate + 'static,
    {
        Self {
            kind: RuleKind::Predicate(Arc::new(predicate)),
            message: message.into(),
        }
    }

    /// Creates a rule from a synchronous check.
    ///
    /// The closure may return `bool`, an [`Outcome`], or a list of failing
    /// items.
    pub fn check<F, O>(message: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Value) -> O + Send + Sync + 'static,
        O: Into<Outcome> + 'static,
    {
        Self::from_predicate(message, FnPredicate::new(f))
    }

    /// Creates a rule from a synchronous check that can fail to decide.
    pub fn try_check<F, O>(message: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<O, PredicateError> + Send + Sync + 'static,
        O: Into<Outcome> + 'static,
    {
        Self::from_predicate(message, TryFnPredicate::new(f))
    }

    /// Creates a rule from an asynchronous check.
    pub fn check_async<F, Fut, O>(message: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, PredicateError>> + Send + 'static,
        O: Into<Outcome> + Send + 'static,
    {
        Self::from_predicate(message, AsyncFnPredicate::new(f))
    }

    /// Creates a rule validating every element of the value against `schema`.
    ///
    /// A non-array value is treated as a single element.
    pub fn nested(schema: RuleMap) -> Self {
        Self {
            kind: RuleKind::Nested(schema),
            message: Cow::Borrowed(""),
        }
    }

    /// Replaces the message template.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// The rule's behavior.
    #[must_use]
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// The message template.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true for nested-schema rules.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        matches!(self.kind, RuleKind::Nested(_))
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// The rules configured for one attribute.
#[derive(Debug, Clone)]
pub enum RuleSet {
    /// A single rule.
    Single(Rule),
    /// Several rules, run in this order.
    Many(Vec<Rule>),
}

impl RuleSet {
    /// Views the configuration as a sequence.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        match self {
            Self::Single(rule) => std::slice::from_ref(rule),
            Self::Many(rules) => rules,
        }
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules().len()
    }

    /// Returns true when no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules().is_empty()
    }

    fn push(&mut self, rule: Rule) {
        *self = match std::mem::replace(self, Self::Many(Vec::new())) {
            Self::Single(first) => Self::Many(vec![first, rule]),
            Self::Many(mut rules) => {
                rules.push(rule);
                Self::Many(rules)
            }
        };
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        Self::Single(rule)
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::Many(rules)
    }
}

// ============================================================================
// RULE MAP
// ============================================================================

/// Rule map construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// Attribute names key every error, so they cannot be empty.
    #[error("attribute name must not be empty")]
    EmptyAttribute,
}

fn attribute_name(attribute: impl Into<String>) -> Result<String, RuleError> {
    let attribute = attribute.into();
    if attribute.is_empty() {
        return Err(RuleError::EmptyAttribute);
    }
    Ok(attribute)
}

/// Attribute name to rule configuration, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct RuleMap {
    attributes: IndexMap<String, RuleSet>,
}

impl RuleMap {
    /// Creates an empty rule map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rules of `attribute`, replacing earlier ones.
    ///
    /// An empty attribute name is skipped with a warning; use
    /// [`RuleMap::insert`] to get the error instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, attribute: impl Into<String>, rules: impl Into<RuleSet>) -> Self {
        if let Err(error) = self.insert(attribute, rules) {
            warn!(%error, "rule skipped");
        }
        self
    }

    /// Sets several rules for `attribute`, replacing earlier ones.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules(self, attribute: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.rule(attribute, RuleSet::Many(rules))
    }

    /// Sets the rules of `attribute`, returning the previous configuration.
    pub fn insert(
        &mut self,
        attribute: impl Into<String>,
        rules: impl Into<RuleSet>,
    ) -> Result<Option<RuleSet>, RuleError> {
        let attribute = attribute_name(attribute)?;
        Ok(self.attributes.insert(attribute, rules.into()))
    }

    /// Appends `rule` after the existing rules of `attribute`.
    pub fn push(&mut self, attribute: impl Into<String>, rule: Rule) -> Result<(), RuleError> {
        match self.attributes.entry(attribute_name(attribute)?) {
            indexmap::map::Entry::Occupied(mut entry) => entry.get_mut().push(rule),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(RuleSet::Single(rule));
            }
        }
        Ok(())
    }

    /// Rules configured for `attribute`.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&RuleSet> {
        self.attributes.get(attribute)
    }

    /// Returns true if `attribute` has rules.
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Number of configured attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true when no attribute is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates over attributes and their rules.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RuleSet> {
        self.attributes.iter()
    }

    /// Configured attribute names.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

impl<K, R> FromIterator<(K, R)> for RuleMap
where
    K: Into<String>,
    R: Into<RuleSet>,
{
    /// Empty attribute names are skipped, as in [`RuleMap::rule`].
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (attribute, rules)| map.rule(attribute, rules))
    }
}

impl<'a> IntoIterator for &'a RuleMap {
    type Item = (&'a String, &'a RuleSet);
    type IntoIter = indexmap::map::Iter<'a, String, RuleSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
