//! Configured inputs of the row validator.

use std::collections::BTreeMap;

use regex::Regex;
use roster_model::FieldKey;

use crate::choices::{ChoiceSet, ClassRegistry};
use crate::error::RulesError;

/// Digits only, 10 to 12 of them, with an optional `+` country-code prefix.
pub const DEFAULT_PHONE_PATTERN: &str = r"^\+?[0-9]{10,12}$";

/// Genders accepted when nothing else is configured.
pub const DEFAULT_GENDERS: [&str; 4] = ["Male", "Female", "M", "F"];

/// Compiled phone-number pattern.
#[derive(Debug, Clone)]
pub struct PhonePattern {
    regex: Regex,
}

impl PhonePattern {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::PhonePattern`] if the pattern is not a valid regex.
    pub fn new(pattern: &str) -> Result<Self, RulesError> {
        let regex = Regex::new(pattern).map_err(|source| RulesError::PhonePattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value.trim())
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Default for PhonePattern {
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_PHONE_PATTERN).expect("default phone pattern compiles"),
        }
    }
}

/// Everything the validator needs besides the records themselves.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Allowed values for enum fields.
    choices: BTreeMap<FieldKey, ChoiceSet>,
    phone: PhonePattern,
    classes: ClassRegistry,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::new(ClassRegistry::new())
    }
}

impl ValidationRules {
    /// Default genders and phone pattern, with the given class registry.
    pub fn new(classes: ClassRegistry) -> Self {
        let mut choices = BTreeMap::new();
        choices.insert(FieldKey::Gender, DEFAULT_GENDERS.into_iter().collect());
        Self {
            choices,
            phone: PhonePattern::default(),
            classes,
        }
    }

    #[must_use]
    pub fn with_choices<I, S>(mut self, field: FieldKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.choices.insert(field, values.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_phone_pattern(mut self, phone: PhonePattern) -> Self {
        self.phone = phone;
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: ClassRegistry) -> Self {
        self.classes = classes;
        self
    }

    /// Allowed values for `field`; empty if none were configured.
    pub fn choices(&self, field: FieldKey) -> Option<&ChoiceSet> {
        self.choices.get(&field)
    }

    pub fn phone(&self) -> &PhonePattern {
        &self.phone
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }
}
