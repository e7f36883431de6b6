//! Orchestration of the two-mode version resolution pipeline.

use crate::calculator::{compute_base_version, RegressionContext, TargetCalculator};
use crate::directive::extract_keywords;
use crate::git::{Git2Adapter, GitAdapter};
use crate::metadata_builder::{self, MetadataInputs};
use crate::version::{CommitSha, PreRelease, PreReleaseClassifier, Tag, Version};
use crate::Error;

/// Configuration accepted by [`Resolver::execute`], built with chained
/// setters and consumed by [`ResolverConfig::resolve`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    repo: String,
    basis_commit: String,
    pr_number: Option<i64>,
    branch_override: Option<String>,
    sha_length: usize,
    verbose: bool,
}

impl ResolverConfig {
    /// Start a configuration rooted at `repo` (any path inside a
    /// repository's worktree).
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            basis_commit: "HEAD".to_string(),
            pr_number: None,
            branch_override: None,
            sha_length: 12,
            verbose: false,
        }
    }

    /// Revision to resolve. Defaults to `HEAD`.
    pub fn set_basis_commit(mut self, rev: impl Into<String>) -> Self {
        self.basis_commit = rev.into();
        self
    }

    /// PR number to surface as `pr<N>` metadata.
    pub fn set_pr_number(mut self, pr_number: i64) -> Self {
        self.pr_number = Some(pr_number);
        self
    }

    /// Branch name to use in metadata, bypassing Git detection.
    pub fn set_branch_override(mut self, branch: impl Into<String>) -> Self {
        self.branch_override = Some(branch.into());
        self
    }

    /// SHA abbreviation length. Must be in `[7, 40]`.
    pub fn set_sha_length(mut self, length: usize) -> Self {
        self.sha_length = length;
        self
    }

    /// Emit verbose diagnostic log records.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the resolution pipeline and produce the resolved [`Version`].
    pub fn resolve(self) -> Result<Version, Error> {
        Resolver::execute(self)
    }
}

/// Orchestrates Git discovery, keyword extraction and target calculation
/// into a single resolved [`Version`].
pub struct Resolver;

impl Resolver {
    /// Run the full two-mode resolution pipeline against the repository
    /// named in `config`.
    pub fn execute(config: ResolverConfig) -> Result<Version, Error> {
        if !(7..=40).contains(&config.sha_length) {
            log::error!("sha length {} is outside [7, 40]", config.sha_length);
            return Err(Error::InvalidShaLength);
        }

        let git = log_err(Git2Adapter::open(&config.repo))?;

        if config.verbose {
            log::trace!("resolving basis commit `{}`", config.basis_commit);
        }
        let basis_sha = log_err(git.resolve_rev(&config.basis_commit))?;
        let is_clean = log_err(git.is_working_directory_clean())?;
        let branch = config
            .branch_override
            .clone()
            .or_else(|| git.current_branch().ok().flatten());

        let reachable_tags = log_err(git.reachable_tags(&basis_sha))?;
        let all_tags = log_err(git.list_all_tags())?;

        let base_tag = highest_precedence_tag(&reachable_tags);

        if let Some(tag) = &base_tag {
            if tag.commit_sha() == &basis_sha && is_clean {
                if config.verbose {
                    log::trace!("basis commit is exactly at tag `{}`; emitting verbatim", tag.name());
                }
                return Ok(tag.version().clone());
            }
        }

        if config.verbose {
            log::trace!("no exact clean tag match at basis commit; computing a development snapshot");
        }
        Self::resolve_development(&git, &config, &basis_sha, is_clean, branch, &base_tag, &all_tags)
    }

    fn resolve_development(
        git: &Git2Adapter,
        config: &ResolverConfig,
        basis_sha: &CommitSha,
        is_clean: bool,
        branch: Option<String>,
        base_tag: &Option<Tag>,
        all_tags: &[Tag],
    ) -> Result<Version, Error> {
        let base_tag_sha = base_tag.as_ref().map(Tag::commit_sha);

        let commits = log_err(git.commits_since(basis_sha, base_tag_sha))?;
        let commit_count = log_err(git.count_commits_since(basis_sha, base_tag_sha))?;

        let mut keywords = Vec::new();
        for commit in &commits {
            for keyword in extract_keywords(commit.message()) {
                keywords.push((commit.sha().clone(), keyword));
            }
        }

        let reduced_keywords = log_err(apply_ignore_rules(git, &commits, keywords))?;

        let (highest_final_repo_wide, highest_pre_release_repo_wide) =
            repo_wide_highests(all_tags);

        let base_version = compute_base_version(
            base_tag.as_ref().map(Tag::version),
            highest_final_repo_wide,
            highest_pre_release_repo_wide,
        );

        let context = regression_context(
            base_tag.as_ref(),
            highest_final_repo_wide,
            highest_pre_release_repo_wide,
        );

        let on_basis_final_tag_dirty = base_tag
            .as_ref()
            .map(|t| t.commit_sha() == basis_sha && t.version().is_final() && !is_clean)
            .unwrap_or(false);

        let (major, minor, patch) = TargetCalculator::reduce(
            &reduced_keywords,
            &base_version,
            context,
            on_basis_final_tag_dirty,
        );

        let sha = git.abbreviate(basis_sha, config.sha_length);
        let metadata = log_err(metadata_builder::build(&MetadataInputs {
            pr_number: config.pr_number,
            branch,
            commits: commit_count,
            sha,
            dirty: !is_clean,
        }))?;

        let snapshot = PreRelease::new(PreReleaseClassifier::Snapshot, None)
            .expect("Snapshot is always a valid unversioned classifier");

        Ok(Version::new(major, minor, patch, Some(snapshot), Some(metadata)))
    }
}

/// Emit an `Error` log record for a fatal result, then pass it through
/// unchanged. Error records are unconditional — unlike `Verbose` records,
/// they do not depend on `ResolverConfig::verbose`.
fn log_err<T>(result: Result<T, Error>) -> Result<T, Error> {
    if let Err(err) = &result {
        log::error!("{err}");
    }
    result
}

fn highest_precedence_tag(tags: &[Tag]) -> Option<Tag> {
    tags.iter().max_by_key(|t| t.version().clone()).cloned()
}

fn repo_wide_highests(all_tags: &[Tag]) -> (Option<(u32, u32, u32)>, Option<(u32, u32, u32)>) {
    let highest_final = all_tags
        .iter()
        .filter(|t| t.version().is_final())
        .map(|t| (t.version().major(), t.version().minor(), t.version().patch()))
        .max();

    let highest_pre_release = all_tags
        .iter()
        .filter(|t| !t.version().is_final())
        .map(|t| (t.version().major(), t.version().minor(), t.version().patch()))
        .max();

    (highest_final, highest_pre_release)
}

fn regression_context(
    base_tag: Option<&Tag>,
    highest_final_repo_wide: Option<(u32, u32, u32)>,
    highest_pre_release_repo_wide: Option<(u32, u32, u32)>,
) -> RegressionContext {
    match base_tag {
        Some(tag) if tag.version().is_final() => RegressionContext::ReachableFinal {
            core: (tag.version().major(), tag.version().minor(), tag.version().patch()),
        },
        Some(tag) => RegressionContext::ReachablePreRelease {
            core: (tag.version().major(), tag.version().minor(), tag.version().patch()),
        },
        None => match (highest_final_repo_wide, highest_pre_release_repo_wide) {
            (Some(core), _) => RegressionContext::NoReachableRepoFinal { highest_final_core: core },
            (None, Some(core)) => RegressionContext::NoReachableRepoPreReleaseOnly { highest_core: core },
            (None, None) => RegressionContext::NoTagsAtAll,
        },
    }
}

/// Apply the four ignore-directive semantics (self, by-commit, by-range,
/// merged-ancestry) against the per-commit keyword stream, returning the
/// surviving keywords only.
fn apply_ignore_rules(
    git: &Git2Adapter,
    commits: &[crate::version::Commit],
    keywords: Vec<(CommitSha, crate::directive::Keyword)>,
) -> Result<Vec<crate::directive::Keyword>, Error> {
    use crate::directive::Keyword;

    let mut ignored: Vec<CommitSha> = Vec::new();
    let mut ignored_prefixes: Vec<String> = Vec::new();

    for (sha, keyword) in &keywords {
        match keyword {
            Keyword::IgnoreSelf => ignored.push(sha.clone()),
            Keyword::IgnoreCommits(prefixes) => ignored_prefixes.extend(prefixes.iter().cloned()),
            Keyword::IgnoreRange(from, to) => {
                ignored.extend(commits_in_range(commits, from, to));
            }
            Keyword::IgnoreMerged => {
                let is_merge = commits.iter().any(|c| c.sha() == sha && c.is_merge());
                if is_merge {
                    ignored.extend(git.merged_commit_shas(sha)?);
                }
            }
        }
    }

    let is_ignored = |sha: &CommitSha| -> bool {
        ignored.contains(sha) || ignored_prefixes.iter().any(|p| sha.starts_with_prefix(p))
    };

    Ok(keywords
        .into_iter()
        .filter(|(sha, keyword)| {
            !matches!(keyword, Keyword::IgnoreSelf | Keyword::IgnoreMerged) && !is_ignored(sha)
        })
        .map(|(_, keyword)| keyword)
        .collect())
}

/// Commits between `from` and `to` (inclusive), located by SHA prefix
/// within the already-scanned, topologically ordered commit list.
fn commits_in_range(commits: &[crate::version::Commit], from: &str, to: &str) -> Vec<CommitSha> {
    let positions: Vec<usize> = commits
        .iter()
        .enumerate()
        .filter(|(_, c)| c.sha().starts_with_prefix(from) || c.sha().starts_with_prefix(to))
        .map(|(i, _)| i)
        .collect();

    match (positions.iter().min(), positions.iter().max()) {
        (Some(&lo), Some(&hi)) => commits[lo..=hi].iter().map(|c| c.sha().clone()).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parse_version;

    #[test]
    fn resolver_config_rejects_short_sha_length() {
        let config = ResolverConfig::new(".").set_sha_length(3);
        assert!(matches!(Resolver::execute(config), Err(Error::InvalidShaLength)));
    }

    #[test]
    fn resolver_config_rejects_long_sha_length() {
        let config = ResolverConfig::new(".").set_sha_length(41);
        assert!(matches!(Resolver::execute(config), Err(Error::InvalidShaLength)));
    }

    #[test]
    fn log_err_passes_through_ok_and_err_unchanged() {
        let ok: Result<u32, Error> = Ok(7);
        assert_eq!(log_err(ok).unwrap(), 7);

        let err: Result<u32, Error> = Err(Error::InvalidShaLength);
        assert!(matches!(log_err(err), Err(Error::InvalidShaLength)));
    }

    #[test]
    fn highest_precedence_tag_picks_final_over_pre_release_same_core() {
        let sha = CommitSha::new("a".repeat(40)).unwrap();
        let final_tag = Tag::new("v1.0.0", sha.clone(), parse_version("1.0.0").unwrap());
        let pre_tag = Tag::new("v1.0.0-rc.1", sha, parse_version("1.0.0-rc.1").unwrap());
        let highest = highest_precedence_tag(&[pre_tag, final_tag.clone()]).unwrap();
        assert_eq!(highest, final_tag);
    }
}
