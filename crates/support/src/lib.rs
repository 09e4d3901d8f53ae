//! # verity-support
//!
//! Self-contained helpers that sit next to the validation engine:
//!
//! - [`checksum`]: CPF (11 digits) and CNPJ (14 digits) check-digit validators
//! - [`identifier`]: case-insensitive dispatch from identifier type to validator
//! - [`duplicates`]: flags records sharing a property value
//! - [`list`]: keeps the payloads whose predicate is false
//! - [`presentation`]: maps GraphQL client error envelopes to display text
//!
//! None of these share state or run concurrently.

pub mod checksum;
pub mod duplicates;
pub mod identifier;
pub mod list;
pub mod presentation;

pub use checksum::{is_cnpj, is_cpf};
pub use duplicates::{DUPLICATE_MARKER, has_duplicates};
pub use identifier::{IdentifierValidators, OtherPolicy, is_valid_identifier};
pub use list::{Entry, filter_by_predicate};
pub use presentation::{CatalogEntry, ErrorEnvelope, ErrorReport, MessageCatalog, extract};
