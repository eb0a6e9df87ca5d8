//! Property tests for script structure.

use gei_scriptgen::{
    validation_checks, ExecutionMode, GenerationConfig, ScriptGenerator, ValidationCheck,
};
use gei_types::{Repository, Visibility};
use proptest::prelude::*;

fn visibility_strategy() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Public),
        Just(Visibility::Private),
        Just(Visibility::Internal),
    ]
}

fn repo_strategy() -> impl Strategy<Value = Repository> {
    ("[a-z][a-z0-9._-]{0,20}", visibility_strategy())
        .prop_map(|(name, visibility)| Repository::new(name, visibility))
}

fn repos_strategy() -> impl Strategy<Value = Vec<Repository>> {
    prop::collection::vec(repo_strategy(), 0..40)
}

/// Source platform, storage options and toggles.
fn config_strategy() -> impl Strategy<Value = GenerationConfig> {
    (
        0..3u8,
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(source, ghes, aws, github_storage, blob_required, logs, verbose)| {
                let base = match source {
                    0 => GenerationConfig::github("source", "target"),
                    1 => GenerationConfig::azure_devops("contoso", "Payments", "target"),
                    _ => GenerationConfig::bitbucket_server("https://bbs.local", "PRJ", "target"),
                };

                GenerationConfig {
                    ghes_api_url: ghes.then(|| "https://ghes.local/api/v3".to_string()),
                    aws_bucket_name: aws.then(|| "bucket".to_string()),
                    use_github_storage: github_storage,
                    blob_credentials_required: blob_required,
                    download_migration_logs: logs,
                    verbose,
                    ..base.with_cli_version("9.9.9")
                }
            },
        )
}

fn lines_with_prefix<'a>(script: &'a str, prefix: &str) -> Vec<&'a str> {
    script.lines().filter(|l| l.starts_with(prefix)).collect()
}

fn target_repo(line: &str) -> Option<&str> {
    let rest = line.split("--target-repo \"").nth(1)?;
    rest.split('"').next()
}

proptest! {
    /// Property: sequential scripts run one line per repository, or two with logs
    #[test]
    fn prop_sequential_invocations(repos in repos_strategy(), logs in any::<bool>()) {
        let config = GenerationConfig {
            download_migration_logs: logs,
            ..GenerationConfig::github("source", "target").with_mode(ExecutionMode::Sequential)
        };
        let script = ScriptGenerator::new(config).generate(&repos);

        let migrations = lines_with_prefix(&script, "Exec { gh gei migrate-repo");
        let downloads = lines_with_prefix(&script, "Exec { gh gei download-logs");

        prop_assert_eq!(migrations.len(), repos.len());
        prop_assert_eq!(downloads.len(), if logs { repos.len() } else { 0 });
        prop_assert_eq!(lines_with_prefix(&script, "Exec { ").len(), migrations.len() + downloads.len());
        prop_assert!(!script.contains("Summary"));

        for (line, repo) in migrations.iter().zip(&repos) {
            prop_assert_eq!(target_repo(line), Some(repo.name.as_str()));
        }
    }

    /// Property: parallel scripts queue everything before waiting on anything
    #[test]
    fn prop_parallel_phases(repos in repos_strategy(), logs in any::<bool>()) {
        let config = GenerationConfig {
            download_migration_logs: logs,
            ..GenerationConfig::github("source", "target")
        };
        let script = ScriptGenerator::new(config).generate(&repos);
        let lines: Vec<&str> = script.lines().collect();

        let queued: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.starts_with("$MigrationID = ExecAndGetMigrationID { "))
            .map(|(i, _)| i)
            .collect();
        let waited: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.starts_with("if ($RepoMigrations[") && l.contains("wait-for-migration"))
            .map(|(i, _)| i)
            .collect();
        let tallies = lines
            .iter()
            .filter(|l| l.ends_with("{ $Succeeded++ } else { $Failed++ }"))
            .count();

        prop_assert_eq!(queued.len(), repos.len());
        prop_assert_eq!(waited.len(), repos.len());
        prop_assert_eq!(tallies, repos.len());

        if let (Some(last_queued), Some(first_waited)) = (queued.last(), waited.first()) {
            prop_assert!(last_queued < first_waited);
        }

        for ((q, w), repo) in queued.iter().zip(&waited).zip(&repos) {
            prop_assert_eq!(target_repo(lines[*q]), Some(repo.name.as_str()));
            let key = format!("$RepoMigrations[\"{}\"]", repo.name);
            prop_assert!(lines[*w].contains(&key));
        }

        prop_assert!(
            script.ends_with("if ($Failed -ne 0) {\n    exit 1\n}\n\n\n"),
            "script must end with the failure exit block"
        );
    }

    /// Property: identical inputs give identical scripts
    #[test]
    fn prop_generation_is_deterministic(
        config in config_strategy(),
        repos in repos_strategy(),
        sequential in any::<bool>(),
    ) {
        let mode = if sequential { ExecutionMode::Sequential } else { ExecutionMode::Parallel };
        let generator = ScriptGenerator::new(config.with_mode(mode));

        prop_assert_eq!(generator.generate(&repos), generator.generate(&repos));
    }

    /// Property: checks keep their fixed relative order and never repeat
    #[test]
    fn prop_validation_order(config in config_strategy()) {
        const ORDER: [ValidationCheck; 7] = [
            ValidationCheck::GithubPat,
            ValidationCheck::AdoPat,
            ValidationCheck::BbsUsername,
            ValidationCheck::BbsPassword,
            ValidationCheck::AwsAccessKeyId,
            ValidationCheck::AwsSecretAccessKey,
            ValidationCheck::AzureStorageConnectionString,
        ];

        let checks = validation_checks(&config);
        prop_assert_eq!(checks.first(), Some(&ValidationCheck::GithubPat));

        let positions: Vec<usize> = checks
            .iter()
            .map(|c| ORDER.iter().position(|o| o == c).unwrap_or(usize::MAX))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let blob_checks = checks
            .iter()
            .filter(|c| matches!(
                c,
                ValidationCheck::AwsAccessKeyId
                    | ValidationCheck::AwsSecretAccessKey
                    | ValidationCheck::AzureStorageConnectionString
            ))
            .count();
        let expected = match (config.use_github_storage, config.blob_credentials_required) {
            (false, true) if config.uses_aws() => 2,
            (false, true) => 1,
            _ => 0,
        };
        prop_assert_eq!(blob_checks, expected);
    }
}
