mod git_utils;

pub use git_utils::{
    add_and_commit, checkout_orphan_branch_with_commit, create_file_and_commit,
    create_test_git_directory, find_last_commit, merge_commit, tag_annotated,
    update_file_and_commit,
};
