//! Case-insensitive value sets used by enum and reference checks.

use std::collections::BTreeMap;

use roster_model::fold_case;

/// A set that performs case-insensitive lookups but preserves original values.
///
/// Values are trimmed on insert and on lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSet {
    /// Maps folded value -> original value
    inner: BTreeMap<String, String>,
}

impl ChoiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value into the set. Blank values are ignored.
    pub fn insert(&mut self, value: impl AsRef<str>) {
        let s = value.as_ref().trim();
        if s.is_empty() {
            return;
        }
        self.inner.insert(fold_case(s), s.to_string());
    }

    /// Check if the set contains a value (case-insensitive).
    pub fn contains(&self, value: impl AsRef<str>) -> bool {
        self.inner.contains_key(&fold_case(value.as_ref()))
    }

    /// Original spelling of a value (case-insensitive lookup).
    pub fn get(&self, value: impl AsRef<str>) -> Option<&str> {
        self.inner
            .get(&fold_case(value.as_ref()))
            .map(String::as_str)
    }

    /// Original values in sorted (case-folded) order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.inner.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ChoiceSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// Class codes that exist for the current school.
///
/// Supplied by the caller; this crate never fetches or caches it.
pub type ClassRegistry = ChoiceSet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_set() {
        let set: ChoiceSet = ["Male", "Female", " m "].into_iter().collect();

        assert!(set.contains("MALE"));
        assert!(set.contains("female"));
        assert!(set.contains(" M"));
        assert!(!set.contains("X"));
        assert!(!set.contains(""));
        assert_eq!(set.get("FEMALE"), Some("Female"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn folds_like_header_matching() {
        let set: ChoiceSet = ["Élève"].into_iter().collect();
        assert!(set.contains("ÉLÈVE"));
        assert_eq!(set.get(" élève "), Some("Élève"));
    }

    #[test]
    fn blank_values_are_not_inserted() {
        let set: ChoiceSet = ["", "   "].into_iter().collect();
        assert!(set.is_empty());
    }
}
