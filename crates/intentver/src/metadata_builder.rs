//! Assembly of the ordered build-metadata identifier list for
//! Development-mode snapshots.

use regex::Regex;

use crate::version::Metadata;
use crate::Error;

/// Inputs needed to assemble a snapshot's build metadata, in the fixed
/// canonical order `[pr?, branch, commits, sha, dirty?]`.
#[derive(Debug, Clone)]
pub struct MetadataInputs {
    /// PR number, if supplied. Clamped at zero.
    pub pr_number: Option<i64>,
    /// Raw branch name, or `None` when detached.
    pub branch: Option<String>,
    /// First-parent, non-merge commit count since the base tag.
    pub commits: u32,
    /// Abbreviated basis-commit SHA.
    pub sha: String,
    /// Whether the worktree is dirty.
    pub dirty: bool,
}

/// Build the ordered identifier list and wrap it in a [`Metadata`].
pub fn build(inputs: &MetadataInputs) -> Result<Metadata, Error> {
    let mut identifiers = Vec::new();

    if let Some(pr) = inputs.pr_number {
        let clamped = pr.max(0);
        identifiers.push(format!("pr{clamped}"));
    }

    identifiers.push(format!(
        "branch{}",
        normalise_branch(inputs.branch.as_deref())
    ));
    identifiers.push(format!("commits{}", inputs.commits));
    identifiers.push(format!("sha{}", inputs.sha));

    if inputs.dirty {
        identifiers.push("dirty".to_string());
    }

    Metadata::new(identifiers)
}

/// `lowercase -> replace runs of non-[0-9a-z] with '-' -> trim '-' ->
/// "detached" if empty`.
pub fn normalise_branch(branch: Option<&str>) -> String {
    let Some(branch) = branch else {
        return "detached".to_string();
    };

    let re = Regex::new(r"[^0-9a-z]+").expect("static regex is valid");
    let lowered = branch.to_lowercase();
    let replaced = re.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');

    if trimmed.is_empty() {
        "detached".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Feature/ABC_123!!", "feature-abc-123")]
    #[case("main", "main")]
    #[case("", "detached")]
    #[case("---", "detached")]
    fn normalises_branch_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalise_branch(Some(input)), expected);
    }

    #[test]
    fn detached_when_none() {
        assert_eq!(normalise_branch(None), "detached");
    }

    #[test]
    fn normalisation_is_idempotent() {
        let once = normalise_branch(Some("Feature/ABC_123!!"));
        let twice = normalise_branch(Some(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn canonical_order_with_all_fields() {
        let inputs = MetadataInputs {
            pr_number: Some(42),
            branch: Some("main".to_string()),
            commits: 3,
            sha: "abc1234".to_string(),
            dirty: true,
        };
        let metadata = build(&inputs).unwrap();
        assert_eq!(
            metadata.identifiers(),
            &["pr42", "branchmain", "commits3", "shaabc1234", "dirty"]
        );
    }

    #[test]
    fn fixed_positions_preserved_when_optional_fields_absent() {
        let inputs = MetadataInputs {
            pr_number: None,
            branch: None,
            commits: 0,
            sha: "abc1234".to_string(),
            dirty: false,
        };
        let metadata = build(&inputs).unwrap();
        assert_eq!(
            metadata.identifiers(),
            &["branchdetached", "commits0", "shaabc1234"]
        );
    }

    #[test]
    fn negative_pr_number_clamped_to_zero() {
        let inputs = MetadataInputs {
            pr_number: Some(-7),
            branch: Some("main".to_string()),
            commits: 1,
            sha: "abc1234".to_string(),
            dirty: false,
        };
        let metadata = build(&inputs).unwrap();
        assert_eq!(metadata.identifiers()[0], "pr0");
    }
}
