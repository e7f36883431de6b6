use std::cmp;
use std::fmt;

use crate::version::metadata::Metadata;
use crate::version::number::CoreNumber;
use crate::version::pre_release::PreRelease;

/// A full SemVer 2.0.0 value: `(major, minor, patch, preRelease?, metadata?)`.
///
/// Precedence (`Ord`/`PartialOrd`) follows SemVer 2.0.0 §11: major, minor,
/// patch numerically; a final release outranks a pre-release of the same
/// core; build metadata never influences ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    major: CoreNumber,
    minor: CoreNumber,
    patch: CoreNumber,
    pre_release: Option<PreRelease>,
    metadata: Option<Metadata>,
}

impl Version {
    pub fn new(
        major: u32,
        minor: u32,
        patch: u32,
        pre_release: Option<PreRelease>,
        metadata: Option<Metadata>,
    ) -> Self {
        Self {
            major: CoreNumber::new(major),
            minor: CoreNumber::new(minor),
            patch: CoreNumber::new(patch),
            pre_release,
            metadata,
        }
    }

    pub fn from_core(major: CoreNumber, minor: CoreNumber, patch: CoreNumber) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            metadata: None,
        }
    }

    pub fn major(&self) -> u32 {
        self.major.value()
    }

    pub fn minor(&self) -> u32 {
        self.minor.value()
    }

    pub fn patch(&self) -> u32 {
        self.patch.value()
    }

    pub fn pre_release(&self) -> Option<&PreRelease> {
        self.pre_release.as_ref()
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn is_final(&self) -> bool {
        self.pre_release.is_none()
    }

    /// The `(major, minor, patch)` triple, discarding pre-release/metadata.
    pub fn core(&self) -> (CoreNumber, CoreNumber, CoreNumber) {
        (self.major, self.minor, self.patch)
    }

    pub fn with_pre_release(mut self, pre_release: Option<PreRelease>) -> Self {
        self.pre_release = pre_release;
        self
    }

    pub fn with_metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn next_major(&self) -> Self {
        Self::new(self.major.next().value(), 0, 0, None, None)
    }

    pub fn next_minor(&self) -> Self {
        Self::new(self.major(), self.minor.next().value(), 0, None, None)
    }

    pub fn next_patch(&self) -> Self {
        Self::new(self.major(), self.minor(), self.patch.next().value(), None, None)
    }

    /// Standard rendering: excludes metadata.
    pub fn render_standard(&self) -> String {
        match &self.pre_release {
            Some(pr) => format!("{}.{}.{}-{}", self.major, self.minor, self.patch, pr),
            None => format!("{}.{}.{}", self.major, self.minor, self.patch),
        }
    }

    /// Extended rendering: includes metadata, with cosmetic SHA truncation.
    pub fn render_extended(&self) -> String {
        let mut s = self.render_standard();
        if let Some(md) = &self.metadata {
            s.push('+');
            s.push_str(&md.render_truncated());
        }
        s
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_standard())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => cmp::Ordering::Equal,
                (None, Some(_)) => cmp::Ordering::Greater,
                (Some(_), None) => cmp::Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}
