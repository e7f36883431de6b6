//! Extraction of versioning keywords from commit messages.

use regex::Regex;

use crate::version::{parse_version, CoreNumber, Version};

/// A single instruction recovered from a commit message. Duplicates are
/// permitted in the extracted stream; reduction (see `calculator`)
/// coalesces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    /// `version: ignore` — drop every keyword from this commit.
    IgnoreSelf,
    /// `version: ignore: <sha>[, <sha>]*` — drop keywords from commits
    /// whose SHA starts with one of these (lowercase) prefixes.
    IgnoreCommits(Vec<String>),
    /// `version: ignore: <sha>..<sha>` — drop keywords from the commit
    /// range.
    IgnoreRange(String, String),
    /// `version: ignore-merged` — on a merge commit, drop keywords from
    /// all merged-in ancestry.
    IgnoreMerged,
    /// `breaking:`/`major:`/`version: major` — relative major bump.
    MajorChange,
    /// `feat:`/`feature:`/`minor:`/`version: minor` — relative minor bump.
    MinorChange,
    /// `version: major: <N>` — absolute major component.
    MajorSet(CoreNumber),
    /// `version: minor: <N>` — absolute minor component.
    MinorSet(CoreNumber),
    /// `version: patch: <N>` — absolute patch component.
    PatchSet(CoreNumber),
    /// `target: <semver>` — full target version (only its core is used
    /// for selection).
    TargetSet(Version),
}

/// A SHA reference is valid iff it matches `[0-9a-f]{7,40}`.
fn is_valid_sha_ref(candidate: &str) -> bool {
    let re = Regex::new(r"^[0-9a-f]{7,40}$").expect("static regex is valid");
    re.is_match(&candidate.to_lowercase())
}

/// Scan a raw commit message for every recognised directive, in the order
/// they appear. Unrecognised lines and malformed directive bodies are
/// silently dropped — they are not errors.
pub fn extract_keywords(message: &str) -> Vec<Keyword> {
    let mut keywords = Vec::new();

    for line in message.lines() {
        if let Some(keyword) = parse_directive_line(line) {
            keywords.push(keyword);
        }
    }

    keywords
}

fn parse_directive_line(line: &str) -> Option<Keyword> {
    parse_version_ignore(line)
        .or_else(|| parse_version_ignore_merged(line))
        .or_else(|| parse_version_comp(line))
        .or_else(|| parse_target(line))
        .or_else(|| parse_shorthand(line))
}

fn parse_version_ignore(line: &str) -> Option<Keyword> {
    let re = Regex::new(r"(?i)(?:^|[^0-9A-Za-z-])version\s*:\s*ignore\s*(:\s*(?P<body>.+))?$")
        .expect("static regex is valid");
    let caps = re.captures(line)?;

    let Some(body) = caps.name("body") else {
        return Some(Keyword::IgnoreSelf);
    };

    let body = body.as_str().trim();

    if let Some((from, to)) = body.split_once("..") {
        let (from, to) = (from.trim(), to.trim());
        if is_valid_sha_ref(from) && is_valid_sha_ref(to) {
            return Some(Keyword::IgnoreRange(
                from.to_lowercase(),
                to.to_lowercase(),
            ));
        }
        return None;
    }

    let shas: Vec<String> = body
        .split(',')
        .map(str::trim)
        .filter(|s| is_valid_sha_ref(s))
        .map(str::to_lowercase)
        .collect();

    if shas.is_empty() {
        None
    } else {
        Some(Keyword::IgnoreCommits(shas))
    }
}

fn parse_version_ignore_merged(line: &str) -> Option<Keyword> {
    let re = Regex::new(r"(?i)(?:^|[^0-9A-Za-z-])version\s*:\s*ignore-merged\b")
        .expect("static regex is valid");
    re.is_match(line).then_some(Keyword::IgnoreMerged)
}

fn parse_version_comp(line: &str) -> Option<Keyword> {
    let re = Regex::new(
        r"(?i)(?:^|[^0-9A-Za-z-])version\s*:\s*(?P<comp>major|breaking|minor|feature|feat|patch|fix)\s*(:\s*(?P<n>\d+))?\b",
    )
    .expect("static regex is valid");
    let caps = re.captures(line)?;
    let comp = caps["comp"].to_lowercase();

    match caps.name("n") {
        Some(n) => {
            let value: u32 = n.as_str().parse().ok()?;
            match comp.as_str() {
                "major" | "breaking" => Some(Keyword::MajorSet(CoreNumber::new(value))),
                "minor" | "feature" | "feat" => Some(Keyword::MinorSet(CoreNumber::new(value))),
                "patch" | "fix" => Some(Keyword::PatchSet(CoreNumber::new(value))),
                _ => None,
            }
        }
        None => match comp.as_str() {
            "major" | "breaking" => Some(Keyword::MajorChange),
            "minor" | "feature" | "feat" => Some(Keyword::MinorChange),
            // patch/fix relative form is a no-op: patch is the default.
            "patch" | "fix" => None,
            _ => None,
        },
    }
}

fn parse_target(line: &str) -> Option<Keyword> {
    let re = Regex::new(r"(?i)(?:^|[^0-9A-Za-z-])target\s*:\s*(?P<ver>[vV]?\S+)")
        .expect("static regex is valid");
    let caps = re.captures(line)?;
    let version = parse_version(&caps["ver"]).ok()?;
    Some(Keyword::TargetSet(version))
}

fn parse_shorthand(line: &str) -> Option<Keyword> {
    let re = Regex::new(
        r"(?i)(?:^|[^0-9A-Za-z-])(?P<kw>breaking|major|feat|feature|minor|fix|patch)\s*:\s*(?P<text>\S.*)$",
    )
    .expect("static regex is valid");
    let caps = re.captures(line)?;

    if caps["text"].trim().is_empty() {
        return None;
    }

    match caps["kw"].to_lowercase().as_str() {
        "breaking" | "major" => Some(Keyword::MajorChange),
        "feat" | "feature" | "minor" => Some(Keyword::MinorChange),
        "fix" | "patch" => None,
        _ => None,
    }
}
