use proc_exit::{Code, Exit};

const EXIT_NOT_A_GIT_REPOSITORY: i32 = 10;
const EXIT_GIT_OPERATION_FAILED: i32 = 11;
const EXIT_INVALID_SHA_LENGTH: i32 = 12;
const EXIT_INVALID_VERSION_FORMAT: i32 = 20;
const EXIT_INVALID_NUMERIC_FIELD: i32 = 21;
const EXIT_UNRECOGNIZED_PRE_RELEASE: i32 = 22;
const EXIT_INVALID_METADATA: i32 = 23;

/// Errors surfaced by version parsing, Git queries and resolution.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The path given to the resolver is not inside a Git repository.
    #[error("`{path}` is not a git repository")]
    NotAGitRepository {
        /// Path supplied to the resolver.
        path: String,
    },

    /// `shaLength` configuration was outside `[7, 40]`.
    #[error("sha length must be between 7 and 40 characters")]
    InvalidShaLength,

    /// A version string did not match the SemVer 2.0.0 grammar.
    #[error("`{input}` is not a valid version")]
    InvalidVersionFormat {
        /// The unparsed input string.
        input: String,
    },

    /// A numeric field overflowed or was otherwise malformed.
    #[error("field `{field}` has invalid numeric value `{value}`")]
    InvalidNumericField {
        /// Name of the offending field.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The pre-release identifier list did not resolve to a known
    /// classifier mapping.
    #[error("unrecognized pre-release identifiers: `{identifiers}`")]
    UnrecognizedPreRelease {
        /// The raw (dot-joined) identifier list.
        identifiers: String,
    },

    /// The build-metadata identifier list was empty or contained an
    /// invalid identifier.
    #[error("invalid build metadata: `{identifiers}`")]
    InvalidMetadata {
        /// The raw (dot-joined) identifier list.
        identifiers: String,
    },

    /// An underlying libgit2 call failed.
    #[error(transparent)]
    Git2(#[from] git2::Error),

    /// A numeric conversion overflowed.
    #[error(transparent)]
    TryFromInt(#[from] std::num::TryFromIntError),
}

impl From<Error> for Exit {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::NotAGitRepository { .. } => EXIT_NOT_A_GIT_REPOSITORY,
            Error::Git2(_) => EXIT_GIT_OPERATION_FAILED,
            Error::InvalidShaLength => EXIT_INVALID_SHA_LENGTH,
            Error::InvalidVersionFormat { .. } => EXIT_INVALID_VERSION_FORMAT,
            Error::InvalidNumericField { .. } => EXIT_INVALID_NUMERIC_FIELD,
            Error::TryFromInt(_) => EXIT_INVALID_NUMERIC_FIELD,
            Error::UnrecognizedPreRelease { .. } => EXIT_UNRECOGNIZED_PRE_RELEASE,
            Error::InvalidMetadata { .. } => EXIT_INVALID_METADATA,
        };
        Exit::new(Code::new(code)).with_message(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_variants_map_to_distinct_exit_codes() {
        let not_repo: Exit = Error::NotAGitRepository {
            path: ".".to_string(),
        }
        .into();
        let bad_sha: Exit = Error::InvalidShaLength.into();
        assert_ne!(format!("{not_repo:?}"), format!("{bad_sha:?}"));
    }
}
