use std::process::Command;
use std::{fs, path::PathBuf};

use git2::build::CheckoutBuilder;
use test_utils::{
    checkout_orphan_branch_with_commit, create_file_and_commit, create_test_git_directory,
    merge_commit,
};

fn execute_test(args: &[&str], temp_dir: &PathBuf) -> (String, String) {
    let cmd = env!("CARGO_BIN_EXE_intentver");
    println!("cmd: {cmd:?}");

    let output = Command::new(cmd)
        .args(args)
        .current_dir(temp_dir)
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    println!("stdout:\n-------\n{stdout}");
    println!("stderr:\n-------\n{stderr}");

    (stdout, stderr)
}

fn cleanup(temp_dir: PathBuf) {
    let result = fs::remove_dir_all(temp_dir);
    println!("remove_dir_all result: {result:?}");
}

/// Scenario 1: annotated tag on a clean HEAD resolves to the tag verbatim.
#[test]
fn concrete_mode_emits_exact_tag() {
    let (temp_dir, _repo) = create_test_git_directory("v1.0.0");

    let (stdout, _stderr) = execute_test(&[], &temp_dir);

    cleanup(temp_dir);
    assert_eq!(stdout.trim(), "1.0.0");
}

/// Scenario 2: a housekeeping commit after the tag, with a dirty worktree,
/// falls back to the default patch bump.
#[test]
fn development_mode_default_patch_bump_on_dirty_worktree() {
    let (temp_dir, repo) = create_test_git_directory("v1.0.0");

    create_file_and_commit(&repo, temp_dir.clone(), "housekeeping", None).unwrap();
    // leave an untracked file so the worktree is dirty
    fs::write(temp_dir.join("untracked.txt"), b"scratch").unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    assert!(stdout.starts_with("1.0.1-snapshot+"), "got {stdout:?}");
    assert!(stdout.contains(".commits1."), "got {stdout:?}");
    assert!(stdout.trim_end().ends_with(".dirty"), "got {stdout:?}");
}

/// Scenario 3: a `target:` directive that regresses below the reachable
/// final tag is rejected by Rule A, falling back to the default patch bump.
#[test]
fn regressive_target_directive_falls_back_to_default() {
    let (temp_dir, repo) = create_test_git_directory("v1.0.0");

    create_file_and_commit(&repo, temp_dir.clone(), "target: 1.0.0", None).unwrap();
    fs::write(temp_dir.join("untracked.txt"), b"scratch").unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    assert!(stdout.starts_with("1.0.1-snapshot+"), "got {stdout:?}");
}

/// Scenario 4: no tag is reachable from the basis commit, but the
/// repository-wide highest final tag is `4.3.0` on another branch; the
/// default bump targets the next major above the repo-wide ceiling.
#[test]
fn no_reachable_tag_bumps_major_above_repo_wide_ceiling() {
    let (temp_dir, repo) = create_test_git_directory("v4.3.0");

    // orphan branch: no ancestry to the v4.3.0 tag, but the tag remains
    // present repository-wide.
    fs::write(temp_dir.join("orphan.txt"), b"fresh history").unwrap();
    checkout_orphan_branch_with_commit(
        &repo,
        "untagged-branch",
        std::path::Path::new("orphan.txt"),
        "chore: start fresh history",
    )
    .unwrap();
    fs::write(temp_dir.join("untracked.txt"), b"scratch").unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    assert!(stdout.starts_with("5.0.0-snapshot+"), "got {stdout:?}");
}

/// Scenario 5: an empty repository with a single dirty commit and no tags
/// at all resolves to the `0.1.0` default.
#[test]
fn untagged_repository_defaults_to_0_1_0() {
    let (temp_dir, repo) = create_test_git_directory("v0.0.0-untagged-marker");
    // create_test_git_directory always tags the seed commit; simulate an
    // untagged repository by deleting every tag before resolving.
    for tag in repo.tag_names(None).unwrap().iter().flatten() {
        repo.tag_delete(tag).unwrap();
    }

    create_file_and_commit(&repo, temp_dir.clone(), "chore: first real commit", None).unwrap();
    fs::write(temp_dir.join("untracked.txt"), b"scratch").unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    assert!(stdout.starts_with("0.1.0-snapshot+"), "got {stdout:?}");
}

/// Scenario 6: a `version: major` directive on commit A is neutralised by
/// an `ignore` directive on commit B naming A's SHA prefix; the default
/// patch bump applies instead, but both commits still count toward the
/// metadata commit count.
#[test]
fn ignore_directive_neutralises_targeted_commit_but_not_its_count() {
    let (temp_dir, repo) = create_test_git_directory("v1.0.0");

    create_file_and_commit(&repo, temp_dir.clone(), "version: major", None).unwrap();
    let commit_a = test_utils::find_last_commit(&repo).unwrap();
    let sha_a = commit_a.id().to_string();
    let prefix_a = &sha_a[..12];

    let ignore_message = format!("chore: cleanup\n\nversion: ignore: {prefix_a}");
    create_file_and_commit(&repo, temp_dir.clone(), &ignore_message, Some("second.txt")).unwrap();
    fs::write(temp_dir.join("untracked.txt"), b"scratch").unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    assert!(stdout.starts_with("1.0.1-snapshot+"), "got {stdout:?}");
    assert!(stdout.contains(".commits2."), "got {stdout:?}");
}

/// A two-parent merge commit whose `ignore-merged` directive suppresses the
/// directives carried by its merged-in ancestry, but has no effect when
/// issued from a non-merge commit.
#[test]
fn ignore_merged_only_applies_to_actual_merge_commits() {
    let (temp_dir, repo) = create_test_git_directory("v1.0.0");

    let main_branch_ref = repo.head().unwrap().name().unwrap().to_string();
    let base_commit = test_utils::find_last_commit(&repo).unwrap();
    let base_oid = base_commit.id();

    repo.branch("side", &base_commit, false).unwrap();
    drop(base_commit);
    repo.set_head("refs/heads/side").unwrap();
    repo.checkout_head(Some(CheckoutBuilder::new().force())).unwrap();

    create_file_and_commit(&repo, temp_dir.clone(), "feat: side work", Some("side.txt")).unwrap();
    let side_commit = test_utils::find_last_commit(&repo).unwrap();
    let side_oid = side_commit.id();
    assert_ne!(base_oid, side_oid);

    repo.set_head(&main_branch_ref).unwrap();
    repo.checkout_head(Some(CheckoutBuilder::new().force())).unwrap();

    merge_commit(&repo, &side_commit, "merge: version: ignore-merged").unwrap();
    fs::write(temp_dir.join("untracked.txt"), b"scratch").unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    // The merged-in `feat:` directive is suppressed, leaving the default
    // patch bump.
    assert!(stdout.starts_with("1.0.1-snapshot+"), "got {stdout:?}");
}

/// `tag_annotated` fixtures are recognised; a lightweight tag at HEAD must
/// never trigger Concrete mode.
#[test]
fn lightweight_tag_is_ignored_by_concrete_mode() {
    let (temp_dir, repo) = create_test_git_directory("v1.0.0");

    create_file_and_commit(&repo, temp_dir.clone(), "chore: next", None).unwrap();
    let commit = test_utils::find_last_commit(&repo).unwrap();
    repo.tag_lightweight("v1.0.1", commit.as_object(), false).unwrap();

    let (stdout, _stderr) = execute_test(&["--extended"], &temp_dir);

    cleanup(temp_dir);
    assert!(stdout.starts_with("1.0.1-snapshot+"), "got {stdout:?}");
}
