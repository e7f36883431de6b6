use std::fmt;

use crate::version::classifier::PreReleaseClassifier;
use crate::version::number::PreReleaseNumber;
use crate::Error;

/// A pre-release marker: a classifier, plus a sequence number when the
/// classifier requires one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreRelease {
    classifier: PreReleaseClassifier,
    number: Option<PreReleaseNumber>,
}

impl PreRelease {
    /// Construct directly from validated parts, enforcing the
    /// versioned-iff-numbered invariant.
    pub fn new(
        classifier: PreReleaseClassifier,
        number: Option<PreReleaseNumber>,
    ) -> Result<Self, Error> {
        match (classifier.versioned(), number) {
            (true, None) => Err(Error::UnrecognizedPreRelease {
                identifiers: format!("{classifier} without a sequence number"),
            }),
            (false, Some(n)) => Err(Error::UnrecognizedPreRelease {
                identifiers: format!("{classifier}.{n} is not versioned"),
            }),
            _ => Ok(Self { classifier, number }),
        }
    }

    pub fn classifier(&self) -> PreReleaseClassifier {
        self.classifier
    }

    pub fn number(&self) -> Option<PreReleaseNumber> {
        self.number
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}.{}", self.classifier, n),
            None => write!(f, "{}", self.classifier),
        }
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreRelease {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.classifier
            .cmp(&other.classifier)
            .then(self.number.cmp(&other.number))
    }
}
