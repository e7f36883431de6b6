use std::fmt;

use regex::Regex;

use crate::version::parser::parse_version;
use crate::version::semantic::Version;
use crate::Error;

/// A lowercase hex commit SHA, always 40 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn new(sha: impl Into<String>) -> Result<Self, Error> {
        let sha = sha.into().to_lowercase();
        if sha.len() != 40 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidShaLength);
        }
        Ok(Self(sha))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn abbreviate(&self, length: usize) -> String {
        self.0.chars().take(length).collect()
    }

    /// Whether this SHA starts with the given (lowercased) prefix, as used
    /// by `version: ignore: <sha>` directive matching.
    pub fn starts_with_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_lowercase())
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A commit: its SHA, raw message, and whether it has more than one
/// parent (relevant to `version: ignore-merged`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    sha: CommitSha,
    message: String,
    is_merge: bool,
}

impl Commit {
    pub fn new(sha: CommitSha, message: impl Into<String>, is_merge: bool) -> Self {
        Self {
            sha,
            message: message.into(),
            is_merge,
        }
    }

    pub fn is_merge(&self) -> bool {
        self.is_merge
    }

    pub fn sha(&self) -> &CommitSha {
        &self.sha
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A Git tag whose name parses as a SemVer version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    commit_sha: CommitSha,
    version: Version,
}

impl Tag {
    pub fn new(name: impl Into<String>, commit_sha: CommitSha, version: Version) -> Self {
        Self {
            name: name.into(),
            commit_sha,
            version,
        }
    }

    /// Parse a raw tag name (`[vV]?<semver>`) against a known commit. Returns
    /// `None` for non-SemVer names rather than an error — non-matching tag
    /// names are ignored silently per the Git adapter's contract.
    pub fn parse(name: &str, commit_sha: CommitSha) -> Option<Self> {
        let prefix_re = Regex::new(r"^[vV]?\d").expect("static regex is valid");
        if !prefix_re.is_match(name) {
            return None;
        }
        let version = parse_version(name).ok()?;
        Some(Self {
            name: name.to_string(),
            commit_sha,
            version,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commit_sha(&self) -> &CommitSha {
        &self.commit_sha
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha(s: &str) -> CommitSha {
        CommitSha::new(s.repeat(40).chars().take(40).collect::<String>()).unwrap()
    }

    #[test]
    fn commit_sha_rejects_wrong_length() {
        assert!(CommitSha::new("abc123").is_err());
    }

    #[test]
    fn commit_sha_lowercases() {
        let s = CommitSha::new("A".repeat(40)).unwrap();
        assert_eq!(s.as_str(), "a".repeat(40));
    }

    #[test]
    fn abbreviate_truncates() {
        let s = sha("a");
        assert_eq!(s.abbreviate(7).len(), 7);
    }

    #[test]
    fn tag_parse_accepts_v_prefix() {
        let tag = Tag::parse("v1.2.3", sha("a")).unwrap();
        assert_eq!(tag.version().render_standard(), "1.2.3");
    }

    #[test]
    fn tag_parse_rejects_non_semver_name() {
        assert!(Tag::parse("latest", sha("a")).is_none());
        assert!(Tag::parse("lib1-1.2.3", sha("a")).is_none());
    }
}
