//! Fixed PowerShell fragments.
//!
//! Every block starts with a newline so that it sits one blank line below
//! whatever precedes it.

/// Interpreter directive on the first line of every script.
pub const PWSH_SHEBANG: &str = "#!/usr/bin/env pwsh";

/// Runs a script block and exits with its exit code if it failed.
pub const EXEC_FUNCTION_BLOCK: &str = r#"
function Exec {
    param (
        [scriptblock]$ScriptBlock
    )
    & @ScriptBlock
    if ($lastexitcode -ne 0) {
        exit $lastexitcode
    }
}"#;

/// Runs a script block, echoes its output, and returns the `(ID: ...)` value.
pub const EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK: &str = r#"
function ExecAndGetMigrationID {
    param (
        [scriptblock]$ScriptBlock
    )
    $MigrationID = & @ScriptBlock | ForEach-Object {
        Write-Host $_
        $_
    } | Select-String -Pattern "\(ID: (.+)\)" | ForEach-Object { $_.matches.groups[1] }
    return $MigrationID
}"#;

pub const VALIDATE_GH_PAT: &str = r#"
if (-not $env:GH_PAT) {
    Write-Error "GH_PAT environment variable must be set to a valid GitHub Personal Access Token with the appropriate scopes. For more information see https://docs.github.com/en/migrations/using-github-enterprise-importer/preparing-to-migrate-with-github-enterprise-importer/managing-access-for-github-enterprise-importer#creating-a-personal-access-token-for-github-enterprise-importer"
    exit 1
} else {
    Write-Host "GH_PAT environment variable is set and will be used to authenticate to GitHub."
}"#;

pub const VALIDATE_AZURE_STORAGE_CONNECTION_STRING: &str = r#"
if (-not $env:AZURE_STORAGE_CONNECTION_STRING) {
    Write-Error "AZURE_STORAGE_CONNECTION_STRING environment variable must be set to a valid Azure Storage Connection String that will be used to upload the migration archive to Azure Blob Storage."
    exit 1
} else {
    Write-Host "AZURE_STORAGE_CONNECTION_STRING environment variable is set and will be used to upload the migration archive to Azure Blob Storage."
}"#;

pub const VALIDATE_AWS_ACCESS_KEY_ID: &str = r#"
if (-not $env:AWS_ACCESS_KEY_ID) {
    Write-Error "AWS_ACCESS_KEY_ID environment variable must be set to a valid AWS Access Key ID that will be used to upload the migration archive to AWS S3."
    exit 1
} else {
    Write-Host "AWS_ACCESS_KEY_ID environment variable is set and will be used to upload the migration archive to AWS S3."
}"#;

pub const VALIDATE_AWS_SECRET_ACCESS_KEY: &str = r#"
if (-not $env:AWS_SECRET_ACCESS_KEY) {
    Write-Error "AWS_SECRET_ACCESS_KEY environment variable must be set to a valid AWS Secret Access Key that will be used to upload the migration archive to AWS S3."
    exit 1
} else {
    Write-Host "AWS_SECRET_ACCESS_KEY environment variable is set and will be used to upload the migration archive to AWS S3."
}"#;

pub const VALIDATE_ADO_PAT: &str = r#"
if (-not $env:ADO_PAT) {
    Write-Error "ADO_PAT environment variable must be set to a valid Azure DevOps Personal Access Token."
    exit 1
} else {
    Write-Host "ADO_PAT environment variable is set and will be used to authenticate to Azure DevOps."
}"#;

pub const VALIDATE_BBS_USERNAME: &str = r#"
if (-not $env:BBS_USERNAME) {
    Write-Error "BBS_USERNAME environment variable must be set."
    exit 1
} else {
    Write-Host "BBS_USERNAME environment variable is set and will be used to authenticate to Bitbucket Server."
}"#;

pub const VALIDATE_BBS_PASSWORD: &str = r#"
if (-not $env:BBS_PASSWORD) {
    Write-Error "BBS_PASSWORD environment variable must be set."
    exit 1
} else {
    Write-Host "BBS_PASSWORD environment variable is set and will be used to authenticate to Bitbucket Server."
}"#;
