//! Reduction of keywords, plus a base version, to a target core.

use crate::directive::Keyword;
use crate::version::{CoreNumber, Version};

/// Either end of the `Target Calculator`'s two sub-problems: reducing
/// keywords to a target core, validated against the reachable/repo-wide
/// tag state.
pub struct TargetCalculator;

/// Context the regression validity check needs to judge a candidate
/// target core against.
#[derive(Debug, Clone, Copy)]
pub enum RegressionContext {
    /// The highest reachable tag is a final release.
    ReachableFinal { core: (u32, u32, u32) },
    /// The highest reachable tag is a pre-release.
    ReachablePreRelease { core: (u32, u32, u32) },
    /// No reachable tag, but final tags exist somewhere in the repository.
    NoReachableRepoFinal { highest_final_core: (u32, u32, u32) },
    /// No reachable tag, only pre-release tags exist anywhere.
    NoReachableRepoPreReleaseOnly { highest_core: (u32, u32, u32) },
    /// No tags anywhere in the repository.
    NoTagsAtAll,
}

impl TargetCalculator {
    /// Reduce a keyword stream plus a base version to a target core: an
    /// explicit `target:` directive wins if valid, else the highest
    /// absolute component set, else the highest relative increment, else
    /// the context's default bump. `context` supplies the regression data
    /// the validity rules need; `on_basis_tag_dirty` is true when the
    /// strict-equal exception applies (basis commit is exactly on a
    /// reachable final tag but the worktree is not clean).
    pub fn reduce(
        keywords: &[Keyword],
        base: &Version,
        context: RegressionContext,
        on_basis_final_tag_dirty: bool,
    ) -> (u32, u32, u32) {
        if let Some(core) = Self::highest_valid_target_set(keywords, context, on_basis_final_tag_dirty) {
            return core;
        }

        if let Some(core) = Self::absolute_set_core(keywords, base) {
            return core;
        }

        if let Some(core) = Self::relative_increment_core(keywords, base) {
            return core;
        }

        Self::default_core(context, base)
    }

    /// The highest `target:` directive that survives regression
    /// validation against `context`, if any.
    fn highest_valid_target_set(
        keywords: &[Keyword],
        context: RegressionContext,
        on_basis_final_tag_dirty: bool,
    ) -> Option<(u32, u32, u32)> {
        let candidates: Vec<(u32, u32, u32)> = keywords
            .iter()
            .filter_map(|k| match k {
                Keyword::TargetSet(v) => Some((v.major(), v.minor(), v.patch())),
                _ => None,
            })
            .filter(|core| Self::passes_regression_rules(*core, context, on_basis_final_tag_dirty))
            .collect();

        candidates.into_iter().max()
    }

    /// `_on_basis_final_tag_dirty` covers a dirty worktree sitting exactly
    /// on a final tag: that case is already handled by the strict `>`
    /// comparison below for `ReachableFinal`, so the flag needs no
    /// separate branch here.
    fn passes_regression_rules(
        core: (u32, u32, u32),
        context: RegressionContext,
        _on_basis_final_tag_dirty: bool,
    ) -> bool {
        match context {
            RegressionContext::ReachableFinal { core: base_core } => core > base_core,
            RegressionContext::ReachablePreRelease { core: base_core } => core >= base_core,
            RegressionContext::NoReachableRepoFinal { highest_final_core } => {
                core > highest_final_core
            }
            RegressionContext::NoReachableRepoPreReleaseOnly { highest_core } => {
                core >= highest_core
            }
            RegressionContext::NoTagsAtAll => true,
        }
    }

    /// Highest absolute component set (`version: major: N`, etc.), with
    /// lower components reset to zero when a higher one is also set.
    fn absolute_set_core(keywords: &[Keyword], base: &Version) -> Option<(u32, u32, u32)> {
        let highest_major = keywords
            .iter()
            .filter_map(|k| match k {
                Keyword::MajorSet(n) => Some(n.value()),
                _ => None,
            })
            .max();
        let highest_minor = keywords
            .iter()
            .filter_map(|k| match k {
                Keyword::MinorSet(n) => Some(n.value()),
                _ => None,
            })
            .max();
        let highest_patch = keywords
            .iter()
            .filter_map(|k| match k {
                Keyword::PatchSet(n) => Some(n.value()),
                _ => None,
            })
            .max();

        if highest_major.is_none() && highest_minor.is_none() && highest_patch.is_none() {
            return None;
        }

        let major = highest_major.unwrap_or(base.major());
        // setting major resets minor/patch to 0 unless also explicitly set.
        let minor = highest_minor.unwrap_or(if highest_major.is_some() { 0 } else { base.minor() });
        let patch = highest_patch.unwrap_or(if highest_major.is_some() || highest_minor.is_some() {
            0
        } else {
            base.patch()
        });

        Some((major, minor, patch))
    }

    /// Relative increment (`major:`/`minor:` shorthand), highest
    /// precedence wins.
    fn relative_increment_core(keywords: &[Keyword], base: &Version) -> Option<(u32, u32, u32)> {
        let has_major = keywords.iter().any(|k| matches!(k, Keyword::MajorChange));
        let has_minor = keywords.iter().any(|k| matches!(k, Keyword::MinorChange));

        if has_major {
            let next = base.next_major();
            Some((next.major(), next.minor(), next.patch()))
        } else if has_minor {
            let next = base.next_minor();
            Some((next.major(), next.minor(), next.patch()))
        } else {
            None
        }
    }

    /// Default bump when no directive produced a target core: patch bump
    /// past a reachable final tag, otherwise the base version unchanged.
    fn default_core(context: RegressionContext, base: &Version) -> (u32, u32, u32) {
        match context {
            RegressionContext::ReachableFinal { .. } => {
                let next = base.next_patch();
                (next.major(), next.minor(), next.patch())
            }
            RegressionContext::ReachablePreRelease { .. } => (base.major(), base.minor(), base.patch()),
            _ => (base.major(), base.minor(), base.patch()),
        }
    }
}

/// Compute the base version to bump from, given the reachable base tag
/// (if any) and repo-wide tag state.
pub fn compute_base_version(
    reachable_base: Option<&Version>,
    highest_final_repo_wide: Option<(u32, u32, u32)>,
    highest_pre_release_repo_wide: Option<(u32, u32, u32)>,
) -> Version {
    if let Some(base) = reachable_base {
        return base.clone();
    }

    if let Some((major, _minor, _patch)) = highest_final_repo_wide {
        return Version::from_core(
            CoreNumber::new(major + 1),
            CoreNumber::new(0),
            CoreNumber::new(0),
        );
    }

    if let Some((major, minor, patch)) = highest_pre_release_repo_wide {
        return Version::from_core(CoreNumber::new(major), CoreNumber::new(minor), CoreNumber::new(patch));
    }

    Version::new(0, 1, 0, None, None)
}
