//! Read-only Git queries required by the resolver.

use git2::{Repository, Sort, StatusOptions};

use crate::version::{Commit, CommitSha, Tag};
use crate::Error;

/// The Git operations the resolver depends on. Kept as a trait so the
/// resolver can be driven against a real repository or a test double.
pub trait GitAdapter {
    /// Resolve a revision (branch, tag, partial SHA, `HEAD`, ...) to a full
    /// 40-character lowercase commit SHA.
    fn resolve_rev(&self, rev: &str) -> Result<CommitSha, Error>;

    /// Abbreviate a SHA to exactly `length` hex characters.
    fn abbreviate(&self, sha: &CommitSha, length: usize) -> String;

    /// Every annotated tag in the repository, parsed as `Tag` values.
    /// Lightweight tags and non-SemVer names are silently ignored.
    fn list_all_tags(&self) -> Result<Vec<Tag>, Error>;

    /// The subset of `list_all_tags()` whose commit is an ancestor of
    /// `from` (inclusive).
    fn reachable_tags(&self, from: &CommitSha) -> Result<Vec<Tag>, Error>;

    /// True iff no tracked file differs from HEAD and no untracked,
    /// non-ignored files exist.
    fn is_working_directory_clean(&self) -> Result<bool, Error>;

    /// Short branch name, or `None` when HEAD is detached.
    fn current_branch(&self) -> Result<Option<String>, Error>;

    /// Commits reachable from `to` but not reachable from `from_exclusive`
    /// (or all history when absent). Traverses merges: every commit in the
    /// merge graph is yielded.
    fn commits_since(
        &self,
        to: &CommitSha,
        from_exclusive: Option<&CommitSha>,
    ) -> Result<Vec<Commit>, Error>;

    /// First-parent, non-merge count of commits between `to` and
    /// `from_exclusive`.
    fn count_commits_since(
        &self,
        to: &CommitSha,
        from_exclusive: Option<&CommitSha>,
    ) -> Result<u32, Error>;
}

/// `GitAdapter` implemented over a real `git2::Repository`.
pub struct Git2Adapter {
    repo: Repository,
}

impl Git2Adapter {
    /// Open the repository at (or above) `path`. Tolerates being rooted at
    /// any subdirectory within a repository, per `git2::Repository::open`.
    pub fn open(path: &str) -> Result<Self, Error> {
        let repo = Repository::discover(path).map_err(|_| Error::NotAGitRepository {
            path: path.to_string(),
        })?;
        Ok(Self { repo })
    }
}

impl GitAdapter for Git2Adapter {
    fn resolve_rev(&self, rev: &str) -> Result<CommitSha, Error> {
        let object = self.repo.revparse_single(rev)?;
        let commit = object.peel_to_commit()?;
        CommitSha::new(commit.id().to_string())
    }

    fn abbreviate(&self, sha: &CommitSha, length: usize) -> String {
        sha.abbreviate(length)
    }

    fn list_all_tags(&self) -> Result<Vec<Tag>, Error> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|_oid, name_bytes| {
            let Ok(full_ref) = std::str::from_utf8(name_bytes) else {
                return true;
            };
            let Some(short_name) = full_ref.strip_prefix("refs/tags/") else {
                return true;
            };

            let Ok(reference) = self.repo.find_reference(full_ref) else {
                return true;
            };

            // Lightweight tags resolve directly to a commit; annotated tags
            // peel through a tag object first. Only annotated tags count.
            let Ok(tag_obj) = reference.peel_to_tag() else {
                return true;
            };
            let Ok(commit) = tag_obj.target().and_then(|t| t.peel_to_commit()) else {
                return true;
            };

            if let Ok(sha) = CommitSha::new(commit.id().to_string()) {
                if let Some(tag) = Tag::parse(short_name, sha) {
                    tags.push(tag);
                }
            }

            true
        })?;

        Ok(tags)
    }

    fn reachable_tags(&self, from: &CommitSha) -> Result<Vec<Tag>, Error> {
        let from_oid = git2::Oid::from_str(from.as_str())?;
        let all_tags = self.list_all_tags()?;

        let mut reachable = Vec::new();
        for tag in all_tags {
            let tag_oid = git2::Oid::from_str(tag.commit_sha().as_str())?;
            if tag_oid == from_oid || self.repo.graph_descendant_of(from_oid, tag_oid)? {
                reachable.push(tag);
            }
        }

        Ok(reachable)
    }

    fn is_working_directory_clean(&self) -> Result<bool, Error> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut opts))?;
        Ok(statuses.is_empty())
    }

    fn current_branch(&self) -> Result<Option<String>, Error> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(_) => return Ok(None),
        };

        if !head.is_branch() {
            return Ok(None);
        }

        Ok(head.shorthand().map(str::to_string))
    }

    fn commits_since(
        &self,
        to: &CommitSha,
        from_exclusive: Option<&CommitSha>,
    ) -> Result<Vec<Commit>, Error> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.push(git2::Oid::from_str(to.as_str())?)?;
        if let Some(from) = from_exclusive {
            revwalk.hide(git2::Oid::from_str(from.as_str())?)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let sha = CommitSha::new(commit.id().to_string())?;
            let message = commit.message().unwrap_or_default().to_string();
            let is_merge = commit.parent_count() > 1;
            commits.push(Commit::new(sha, message, is_merge));
        }

        Ok(commits)
    }

    fn count_commits_since(
        &self,
        to: &CommitSha,
        from_exclusive: Option<&CommitSha>,
    ) -> Result<u32, Error> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        revwalk.simplify_first_parent()?;
        revwalk.push(git2::Oid::from_str(to.as_str())?)?;
        if let Some(from) = from_exclusive {
            revwalk.hide(git2::Oid::from_str(from.as_str())?)?;
        }

        let mut count = 0u32;
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            if commit.parent_count() > 1 {
                continue;
            }
            count += 1;
        }

        Ok(count)
    }
}

impl Git2Adapter {
    /// The non-first-parent ancestry of a merge commit, i.e. the commits
    /// that `version: ignore-merged` removes. Empty for a non-merge
    /// commit.
    pub fn merged_commit_shas(&self, merge_commit: &CommitSha) -> Result<Vec<CommitSha>, Error> {
        let oid = git2::Oid::from_str(merge_commit.as_str())?;
        let commit = self.repo.find_commit(oid)?;
        if commit.parent_count() < 2 {
            return Ok(Vec::new());
        }

        let first_parent = commit.parent_id(0)?;
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL)?;
        for i in 1..commit.parent_count() {
            revwalk.push(commit.parent_id(i)?)?;
        }
        revwalk.hide(first_parent)?;

        let mut shas = Vec::new();
        for oid in revwalk {
            shas.push(CommitSha::new(oid?.to_string())?);
        }
        Ok(shas)
    }
}
