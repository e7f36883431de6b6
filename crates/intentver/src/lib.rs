#![warn(
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::invalid_codeblock_attributes
)]

//! # Intent-based semantic version resolution
//!
//! Computes the single SemVer 2.0.0 string a build should emit,
//! deterministically from repository state plus commit-message
//! directives — "what are we releasing next?" rather than "how far since
//! the last release?".
//!
//! ## Usage
//!
//! ```no_run
//! use intentver::ResolverConfig;
//!
//! # fn main() -> Result<(), intentver::Error> {
//! let version = ResolverConfig::new(".")
//!     .set_basis_commit("HEAD")
//!     .set_sha_length(12)
//!     .resolve()?;
//!
//! println!("{}", version.render_extended());
//! # Ok(())
//! # }
//! ```
//!
//! A repository sitting exactly on a clean, tagged commit resolves to that
//! tag verbatim (Concrete mode); otherwise a `-snapshot+…` development
//! version is computed from commit directives and Git state (Development
//! mode).

mod calculator;
mod directive;
mod error;
mod git;
mod metadata_builder;
mod resolver;
#[cfg(test)]
mod test_utils;
mod version;

pub use error::Error;
pub use resolver::{Resolver, ResolverConfig};
pub use version::{
    parse_version, Commit, CommitSha, CoreNumber, Metadata, PreRelease, PreReleaseClassifier,
    PreReleaseNumber, Tag, Version,
};
