//! Case folding shared by header matching, choice lookups and duplicate keys.

/// Trimmed, Unicode-lowercased form of `value`.
///
/// Two strings are treated as the same header, choice or key throughout the
/// import pipeline exactly when their folded forms are equal.
pub fn fold_case(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive equality under [`fold_case`].
pub fn same_folded(left: &str, right: &str) -> bool {
    fold_case(left) == fold_case(right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_non_ascii_letters() {
        assert_eq!(fold_case("  ÉLÈVE "), "élève");
        assert!(same_folded("Nom de l'ÉLÈVE", "nom de l'élève"));
        assert!(!same_folded("Class", "Classe"));
    }
}
