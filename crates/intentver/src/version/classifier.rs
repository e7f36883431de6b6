use std::fmt;

/// Closed enumeration of pre-release classifiers, ordered by ascending
/// precedence. The derived `Ord` relies on declaration order — append new
/// variants at the end only, never reorder existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseClassifier {
    Dev,
    Milestone,
    Alpha,
    Beta,
    ReleaseCandidate,
    Snapshot,
}

impl PreReleaseClassifier {
    /// Whether this classifier carries a sequence number.
    pub fn versioned(&self) -> bool {
        !matches!(self, PreReleaseClassifier::Snapshot)
    }

    /// Canonical alias, used when rendering.
    pub fn canonical(&self) -> &'static str {
        match self {
            PreReleaseClassifier::Dev => "dev",
            PreReleaseClassifier::Milestone => "milestone",
            PreReleaseClassifier::Alpha => "alpha",
            PreReleaseClassifier::Beta => "beta",
            PreReleaseClassifier::ReleaseCandidate => "rc",
            PreReleaseClassifier::Snapshot => "snapshot",
        }
    }

    /// Resolve a case-insensitive alias to a classifier.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_lowercase().as_str() {
            "dev" => Some(PreReleaseClassifier::Dev),
            "milestone" | "m" => Some(PreReleaseClassifier::Milestone),
            "alpha" | "a" => Some(PreReleaseClassifier::Alpha),
            "beta" | "b" => Some(PreReleaseClassifier::Beta),
            "rc" | "cr" => Some(PreReleaseClassifier::ReleaseCandidate),
            "snapshot" => Some(PreReleaseClassifier::Snapshot),
            _ => None,
        }
    }
}

impl fmt::Display for PreReleaseClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dev", PreReleaseClassifier::Dev)]
    #[case("M", PreReleaseClassifier::Milestone)]
    #[case("milestone", PreReleaseClassifier::Milestone)]
    #[case("a", PreReleaseClassifier::Alpha)]
    #[case("ALPHA", PreReleaseClassifier::Alpha)]
    #[case("b", PreReleaseClassifier::Beta)]
    #[case("rc", PreReleaseClassifier::ReleaseCandidate)]
    #[case("CR", PreReleaseClassifier::ReleaseCandidate)]
    #[case("snapshot", PreReleaseClassifier::Snapshot)]
    fn resolves_known_aliases(#[case] alias: &str, #[case] expected: PreReleaseClassifier) {
        assert_eq!(PreReleaseClassifier::from_alias(alias), Some(expected));
    }

    #[test]
    fn rejects_unknown_alias() {
        assert_eq!(PreReleaseClassifier::from_alias("nightly"), None);
    }

    #[test]
    fn only_snapshot_is_unversioned() {
        assert!(!PreReleaseClassifier::Snapshot.versioned());
        assert!(PreReleaseClassifier::Dev.versioned());
        assert!(PreReleaseClassifier::ReleaseCandidate.versioned());
    }

    #[test]
    fn precedence_is_ascending_declaration_order() {
        assert!(PreReleaseClassifier::Dev < PreReleaseClassifier::Milestone);
        assert!(PreReleaseClassifier::Milestone < PreReleaseClassifier::Alpha);
        assert!(PreReleaseClassifier::Alpha < PreReleaseClassifier::Beta);
        assert!(PreReleaseClassifier::Beta < PreReleaseClassifier::ReleaseCandidate);
        assert!(PreReleaseClassifier::ReleaseCandidate < PreReleaseClassifier::Snapshot);
    }
}
