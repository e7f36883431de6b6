//! Fixture generators shared across unit tests.

use crate::version::{parse_version, Commit, CommitSha};

#[allow(dead_code)]
pub(crate) fn sha_fixture(fill: char) -> CommitSha {
    CommitSha::new(fill.to_string().repeat(40)).unwrap()
}

#[allow(dead_code)]
pub(crate) fn commit_fixture(sha_fill: char, message: &str, is_merge: bool) -> Commit {
    Commit::new(sha_fixture(sha_fill), message, is_merge)
}

#[allow(dead_code)]
pub(crate) fn version_fixture(s: &str) -> crate::version::Version {
    parse_version(s).unwrap()
}
