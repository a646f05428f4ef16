//! Canonical import fields.
//!
//! The set of fields a student record carries after import is closed, so the
//! keys and their validation rules are enums rather than free-form strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::text::{fold_case, same_folded};

/// Key of a canonical student field.
///
/// Declaration order is the registry order and drives issue ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Name,
    Gender,
    Class,
    ParentPhone,
}

impl FieldKey {
    /// All keys in declaration order.
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Name,
        FieldKey::Gender,
        FieldKey::Class,
        FieldKey::ParentPhone,
    ];

    /// Wire name of the key (`name`, `gender`, `class`, `parent_phone`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Gender => "gender",
            Self::Class => "class",
            Self::ParentPhone => "parent_phone",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldKey::ALL
            .into_iter()
            .find(|key| {
                same_folded(key.as_str(), wanted)
                    || same_folded(&key.as_str().replace('_', " "), wanted)
            })
            .ok_or_else(|| ModelError::UnknownField(wanted.to_string()))
    }
}

/// Validation rule attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRule {
    /// Free text that must not be empty.
    Text,
    /// One of a configured set of values.
    Enum,
    /// Phone number matching a configured pattern.
    Phone,
    /// Code that must exist in an external registry.
    Reference,
}

/// A canonical target field and the header aliases that auto-map to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportField {
    pub key: FieldKey,
    /// Human-readable label, also used as the template header.
    pub label: &'static str,
    /// Known source header spellings, matched case-insensitively.
    pub aliases: &'static [&'static str],
    pub required: bool,
    pub rule: FieldRule,
}

impl ImportField {
    /// Returns true if `header` equals the label or one of the aliases,
    /// ignoring case and surrounding whitespace.
    pub fn matches_header(&self, header: &str) -> bool {
        let header = fold_case(header);
        if header.is_empty() {
            return false;
        }
        fold_case(self.label) == header
            || self.aliases.iter().any(|alias| fold_case(alias) == header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_spaced_labels() {
        assert_eq!("parent_phone".parse::<FieldKey>().unwrap(), FieldKey::ParentPhone);
        assert_eq!("Parent Phone".parse::<FieldKey>().unwrap(), FieldKey::ParentPhone);
        assert_eq!(" CLASS ".parse::<FieldKey>().unwrap(), FieldKey::Class);
        assert!(matches!(
            "dob".parse::<FieldKey>(),
            Err(ModelError::UnknownField(name)) if name == "dob"
        ));
    }

    #[test]
    fn headers_match_with_unicode_case_folding() {
        let field = ImportField {
            key: FieldKey::Name,
            label: "Élève",
            aliases: &["Nom de l'élève"],
            required: true,
            rule: FieldRule::Text,
        };
        assert!(field.matches_header(" ÉLÈVE "));
        assert!(field.matches_header("NOM DE L'ÉLÈVE"));
        assert!(!field.matches_header("   "));
    }

    #[test]
    fn key_order_follows_declaration() {
        let mut keys = vec![FieldKey::ParentPhone, FieldKey::Name, FieldKey::Class];
        keys.sort();
        assert_eq!(keys, vec![FieldKey::Name, FieldKey::Class, FieldKey::ParentPhone]);
    }
}
