//! Whole-script output.

use gei_scriptgen::templates::{
    EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK, EXEC_FUNCTION_BLOCK, VALIDATE_ADO_PAT,
    VALIDATE_AWS_ACCESS_KEY_ID, VALIDATE_AWS_SECRET_ACCESS_KEY, VALIDATE_BBS_PASSWORD,
    VALIDATE_BBS_USERNAME, VALIDATE_GH_PAT,
};
use gei_scriptgen::{ExecutionMode, GenerationConfig, ScriptGenerator};
use gei_types::{Repository, Visibility};
use pretty_assertions::assert_eq;

fn repos() -> Vec<Repository> {
    vec![
        Repository::new("api", Visibility::Public),
        Repository::new("web", Visibility::Internal),
    ]
}

#[test]
fn test_sequential_github_script() {
    let config = GenerationConfig::github("source", "target")
        .with_mode(ExecutionMode::Sequential)
        .with_cli_version("1.2.3");

    let script = ScriptGenerator::new(config).generate(&repos());

    let expected = [
        "#!/usr/bin/env pwsh\n",
        "\n",
        "# =========== Created with CLI version 1.2.3 ===========\n",
        EXEC_FUNCTION_BLOCK,
        "\n",
        VALIDATE_GH_PAT,
        "\n",
        "# =========== Organization: source ===========\n",
        r#"Exec { gh gei migrate-repo --github-source-org "source" --source-repo "api" --github-target-org "target" --target-repo "api" --target-repo-visibility public }"#,
        "\n",
        r#"Exec { gh gei migrate-repo --github-source-org "source" --source-repo "web" --github-target-org "target" --target-repo "web" --target-repo-visibility internal }"#,
        "\n",
    ]
    .concat();

    assert_eq!(script, expected);
}

#[test]
fn test_sequential_with_logs() {
    let config = GenerationConfig {
        download_migration_logs: true,
        ..GenerationConfig::azure_devops("contoso", "Payments", "target")
            .with_mode(ExecutionMode::Sequential)
            .with_cli_version("1.2.3")
    };

    let script = ScriptGenerator::new(config).generate(&[Repository::private("ledger")]);

    let expected = [
        "#!/usr/bin/env pwsh\n",
        "\n",
        "# =========== Created with CLI version 1.2.3 ===========\n",
        EXEC_FUNCTION_BLOCK,
        "\n",
        VALIDATE_GH_PAT,
        "\n",
        VALIDATE_ADO_PAT,
        "\n",
        "# =========== Organization: contoso ===========\n",
        r#"Exec { gh ado2gh migrate-repo --ado-org "contoso" --ado-team-project "Payments" --ado-repo "ledger" --github-target-org "target" --target-repo "ledger" --target-repo-visibility private }"#,
        "\n",
        r#"Exec { gh ado2gh download-logs --github-target-org "target" --target-repo "ledger" }"#,
        "\n",
    ]
    .concat();

    assert_eq!(script, expected);
}

#[test]
fn test_parallel_github_script() {
    let config = GenerationConfig::github("source", "target").with_cli_version("1.2.3");

    let script = ScriptGenerator::new(config).generate(&repos());

    let expected = [
        "#!/usr/bin/env pwsh\n",
        "\n",
        "# =========== Created with CLI version 1.2.3 ===========\n",
        EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK,
        "\n",
        VALIDATE_GH_PAT,
        "\n",
        "\n",
        "$Succeeded = 0\n",
        "$Failed = 0\n",
        "$RepoMigrations = [ordered]@{}\n",
        "\n",
        "# =========== Organization: source ===========\n",
        "\n",
        "# === Queuing repo migrations ===\n",
        r#"$MigrationID = ExecAndGetMigrationID { gh gei migrate-repo --github-source-org "source" --source-repo "api" --github-target-org "target" --target-repo "api" --queue-only --target-repo-visibility public }"#,
        "\n",
        "$RepoMigrations[\"api\"] = $MigrationID\n",
        "\n",
        r#"$MigrationID = ExecAndGetMigrationID { gh gei migrate-repo --github-source-org "source" --source-repo "web" --github-target-org "target" --target-repo "web" --queue-only --target-repo-visibility internal }"#,
        "\n",
        "$RepoMigrations[\"web\"] = $MigrationID\n",
        "\n",
        "\n",
        "# =========== Waiting for all migrations to finish for Organization: source ===========\n",
        "\n",
        r#"if ($RepoMigrations["api"]) { gh gei wait-for-migration --migration-id $RepoMigrations["api"] }"#,
        "\n",
        r#"if ($RepoMigrations["api"] -and $lastexitcode -eq 0) { $Succeeded++ } else { $Failed++ }"#,
        "\n",
        "\n",
        r#"if ($RepoMigrations["web"]) { gh gei wait-for-migration --migration-id $RepoMigrations["web"] }"#,
        "\n",
        r#"if ($RepoMigrations["web"] -and $lastexitcode -eq 0) { $Succeeded++ } else { $Failed++ }"#,
        "\n",
        "\n",
        "\n",
        "Write-Host =============== Summary ===============\n",
        "Write-Host Total number of successful migrations: $Succeeded\n",
        "Write-Host Total number of failed migrations: $Failed\n",
        "\n",
        "if ($Failed -ne 0) {\n",
        "    exit 1\n",
        "}\n",
        "\n",
        "\n",
    ]
    .concat();

    assert_eq!(script, expected);
}

#[test]
fn test_parallel_bbs_with_aws_and_logs() {
    let config = GenerationConfig {
        aws_bucket_name: Some("archives".to_string()),
        blob_credentials_required: true,
        download_migration_logs: true,
        target_api_url: Some("https://api.target.com".to_string()),
        ..GenerationConfig::bitbucket_server("https://bbs.local", "PRJ", "target")
            .with_cli_version("1.2.3")
    };

    let script = ScriptGenerator::new(config).generate(&[Repository::private("repo")]);

    let expected = [
        "#!/usr/bin/env pwsh\n",
        "\n",
        "# =========== Created with CLI version 1.2.3 ===========\n",
        EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK,
        "\n",
        VALIDATE_GH_PAT,
        "\n",
        VALIDATE_BBS_USERNAME,
        "\n",
        VALIDATE_BBS_PASSWORD,
        "\n",
        VALIDATE_AWS_ACCESS_KEY_ID,
        "\n",
        VALIDATE_AWS_SECRET_ACCESS_KEY,
        "\n",
        "\n",
        "$Succeeded = 0\n",
        "$Failed = 0\n",
        "$RepoMigrations = [ordered]@{}\n",
        "\n",
        "# =========== Organization: PRJ ===========\n",
        "\n",
        "# === Queuing repo migrations ===\n",
        r#"$MigrationID = ExecAndGetMigrationID { gh bbs2gh migrate-repo --target-api-url "https://api.target.com" --bbs-server-url "https://bbs.local" --bbs-project "PRJ" --bbs-repo "repo" --github-target-org "target" --target-repo "repo" --aws-bucket-name "archives" --queue-only --target-repo-visibility private }"#,
        "\n",
        "$RepoMigrations[\"repo\"] = $MigrationID\n",
        "\n",
        "\n",
        "# =========== Waiting for all migrations to finish for Organization: PRJ ===========\n",
        "\n",
        r#"if ($RepoMigrations["repo"]) { gh bbs2gh wait-for-migration --target-api-url "https://api.target.com" --migration-id $RepoMigrations["repo"] }"#,
        "\n",
        r#"if ($RepoMigrations["repo"] -and $lastexitcode -eq 0) { $Succeeded++ } else { $Failed++ }"#,
        "\n",
        r#"gh bbs2gh download-logs --target-api-url "https://api.target.com" --github-target-org "target" --target-repo "repo""#,
        "\n",
        "\n",
        "\n",
        "Write-Host =============== Summary ===============\n",
        "Write-Host Total number of successful migrations: $Succeeded\n",
        "Write-Host Total number of failed migrations: $Failed\n",
        "\n",
        "if ($Failed -ne 0) {\n",
        "    exit 1\n",
        "}\n",
        "\n",
        "\n",
    ]
    .concat();

    assert_eq!(script, expected);
}
