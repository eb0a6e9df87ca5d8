//! Error types for generation configuration.

use thiserror::Error;

/// Reasons a [`GenerationConfig`](crate::GenerationConfig) is rejected.
///
/// All of these are detected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value is missing.
    #[error("--{0} must be provided")]
    Missing(&'static str),

    /// An organization option was given a URL.
    #[error(
        "--{0} expects an organization name, not a URL. Please provide just the organization \
         name (e.g., 'my-org' instead of 'https://github.com/my-org')"
    )]
    OrgIsUrl(&'static str),

    /// More than one source platform is configured.
    #[error("only one source can be configured, found both {0} and {1}")]
    ConflictingSources(&'static str, &'static str),

    /// An option that only makes sense together with another was given alone.
    #[error("--{requires} must be specified when --{option} is specified")]
    Requires {
        /// The option that was given.
        option: &'static str,
        /// The option it depends on.
        requires: &'static str,
    },

    /// Archive storage was pointed at two places at once.
    #[error(
        "the --use-github-storage flag was provided with an AWS S3 Bucket name. \
         Archive cannot be uploaded to both locations"
    )]
    StorageConflict,

    /// A URL option does not parse.
    #[error("--{0} is invalid. Please check URL before trying again")]
    InvalidUrl(&'static str),
}

/// Result type for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;
