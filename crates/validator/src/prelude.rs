//! Prelude module for convenient imports.
//!
//! ```rust
//! use verity_validator::prelude::*;
//! ```

pub use crate::config::{DefectPolicy, ValidatorConfig};
pub use crate::engine::{Mode, Validator, validate, validate_raw};
pub use crate::foundation::{
    Defect, ErrorOrigin, FieldError, Outcome, Predicate, PredicateError, Record, ValidateError,
    ValidationErrors, ValidationResult,
};
pub use crate::rule::{Rule, RuleError, RuleMap, RuleSet};
pub use crate::template::format_message;
