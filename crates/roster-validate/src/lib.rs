//! Per-row validation of mapped roster records.

#![deny(unsafe_code)]

mod choices;
mod error;
mod rules;
mod summary;
mod validator;

pub use choices::{ChoiceSet, ClassRegistry};
pub use error::RulesError;
pub use rules::{DEFAULT_GENDERS, DEFAULT_PHONE_PATTERN, PhonePattern, ValidationRules};
pub use summary::IssueSummary;
pub use validator::{RowValidator, validate};
