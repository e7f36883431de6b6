use std::fmt;

use crate::Error;

/// A non-negative core version component (major, minor or patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CoreNumber(u32);

impl CoreNumber {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for CoreNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A positive pre-release sequence number (`rc.3` -> `3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreReleaseNumber(u32);

impl PreReleaseNumber {
    pub fn new(value: u32) -> Result<Self, Error> {
        if value < 1 {
            return Err(Error::InvalidNumericField {
                field: "pre_release_number".to_string(),
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PreReleaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
