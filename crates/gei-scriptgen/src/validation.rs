//! Pre-flight credential checks embedded in the script.

use crate::config::{GenerationConfig, SourceIdentity};
use crate::templates;

/// An environment variable the script checks before migrating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCheck {
    /// `GH_PAT`
    GithubPat,
    /// `ADO_PAT`
    AdoPat,
    /// `BBS_USERNAME`
    BbsUsername,
    /// `BBS_PASSWORD`
    BbsPassword,
    /// `AWS_ACCESS_KEY_ID`
    AwsAccessKeyId,
    /// `AWS_SECRET_ACCESS_KEY`
    AwsSecretAccessKey,
    /// `AZURE_STORAGE_CONNECTION_STRING`
    AzureStorageConnectionString,
}

impl ValidationCheck {
    /// The environment variable this check reads.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::GithubPat => "GH_PAT",
            Self::AdoPat => "ADO_PAT",
            Self::BbsUsername => "BBS_USERNAME",
            Self::BbsPassword => "BBS_PASSWORD",
            Self::AwsAccessKeyId => "AWS_ACCESS_KEY_ID",
            Self::AwsSecretAccessKey => "AWS_SECRET_ACCESS_KEY",
            Self::AzureStorageConnectionString => "AZURE_STORAGE_CONNECTION_STRING",
        }
    }

    /// The PowerShell block that performs the check.
    pub fn block(self) -> &'static str {
        match self {
            Self::GithubPat => templates::VALIDATE_GH_PAT,
            Self::AdoPat => templates::VALIDATE_ADO_PAT,
            Self::BbsUsername => templates::VALIDATE_BBS_USERNAME,
            Self::BbsPassword => templates::VALIDATE_BBS_PASSWORD,
            Self::AwsAccessKeyId => templates::VALIDATE_AWS_ACCESS_KEY_ID,
            Self::AwsSecretAccessKey => templates::VALIDATE_AWS_SECRET_ACCESS_KEY,
            Self::AzureStorageConnectionString => {
                templates::VALIDATE_AZURE_STORAGE_CONNECTION_STRING
            }
        }
    }
}

/// Select the checks for `config`, in emission order.
///
/// `GH_PAT` always comes first, then the source platform's credentials, then
/// blob storage credentials when the target needs them and GitHub storage is
/// not in use.
pub fn validation_checks(config: &GenerationConfig) -> Vec<ValidationCheck> {
    let mut checks = vec![ValidationCheck::GithubPat];

    match config.source_identity() {
        SourceIdentity::AzureDevOps { .. } => checks.push(ValidationCheck::AdoPat),
        SourceIdentity::BitbucketServer { .. } => {
            checks.push(ValidationCheck::BbsUsername);
            checks.push(ValidationCheck::BbsPassword);
        }
        SourceIdentity::Github { .. } => {}
    }

    if !config.use_github_storage && config.blob_credentials_required {
        if config.uses_aws() {
            checks.push(ValidationCheck::AwsAccessKeyId);
            checks.push(ValidationCheck::AwsSecretAccessKey);
        } else {
            checks.push(ValidationCheck::AzureStorageConnectionString);
        }
    }

    checks
}
