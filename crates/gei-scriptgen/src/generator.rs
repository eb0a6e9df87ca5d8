//! Sequential and parallel migration scripts.

use gei_types::Repository;
use tracing::info;

use crate::command::CommandBuilder;
use crate::config::{ExecutionMode, GenerationConfig};
use crate::script::ScriptBuilder;
use crate::templates::{EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK, EXEC_FUNCTION_BLOCK, PWSH_SHEBANG};
use crate::validation::validation_checks;

/// Generates a PowerShell migration script from a configuration and an
/// ordered repository list.
///
/// Generation is pure: it never fails and never touches the configuration.
/// Repositories appear in the script in the order they were given.
#[derive(Debug, Clone)]
pub struct ScriptGenerator {
    config: GenerationConfig,
}

impl ScriptGenerator {
    /// Create a generator for `config`.
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate the script text.
    pub fn generate(&self, repos: &[Repository]) -> String {
        let script = self.build(repos);

        info!(
            mode = ?self.config.mode,
            repos = repos.len(),
            "Generated migration script"
        );

        script.render()
    }

    /// Build the script without rendering it.
    pub fn build(&self, repos: &[Repository]) -> ScriptBuilder {
        match self.config.mode {
            ExecutionMode::Sequential => self.sequential(repos),
            ExecutionMode::Parallel => self.parallel(repos),
        }
    }

    fn preamble(&self, script: &mut ScriptBuilder, helper: &'static str) {
        script
            .statement(PWSH_SHEBANG)
            .blank()
            .banner(format_args!(
                "Created with CLI version {}",
                self.config.cli_version
            ))
            .block(helper);

        for check in validation_checks(&self.config) {
            script.block(check.block());
        }
    }

    fn sequential(&self, repos: &[Repository]) -> ScriptBuilder {
        let commands = CommandBuilder::new(&self.config);
        let mut script = ScriptBuilder::new();

        self.preamble(&mut script, EXEC_FUNCTION_BLOCK);
        script.banner(format_args!("Organization: {}", self.config.source_org));

        for repo in repos {
            script.invocation(format!("Exec {{ {} }}", commands.migrate_repo(repo, true)));

            if self.config.download_migration_logs {
                script.invocation(format!("Exec {{ {} }}", commands.download_logs(&repo.name)));
            }
        }

        script
    }

    fn parallel(&self, repos: &[Repository]) -> ScriptBuilder {
        let commands = CommandBuilder::new(&self.config);
        let mut script = ScriptBuilder::new();

        self.preamble(&mut script, EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK);
        script
            .blank()
            .statement("$Succeeded = 0")
            .statement("$Failed = 0")
            .statement("$RepoMigrations = [ordered]@{}")
            .blank()
            .banner(format_args!("Organization: {}", self.config.source_org))
            .blank()
            .comment("# === Queuing repo migrations ===");

        for repo in repos {
            script
                .invocation(format!(
                    "$MigrationID = ExecAndGetMigrationID {{ {} }}",
                    commands.migrate_repo(repo, false)
                ))
                .statement(format!(
                    "$RepoMigrations[\"{}\"] = $MigrationID",
                    repo.name
                ))
                .blank();
        }

        script.blank().banner(format_args!(
            "Waiting for all migrations to finish for Organization: {}",
            self.config.source_org
        ));
        script.blank();

        for repo in repos {
            let name = &repo.name;
            script
                .invocation(format!(
                    "if ($RepoMigrations[\"{name}\"]) {{ {} }}",
                    commands.wait_for_migration(name)
                ))
                .statement(format!(
                    "if ($RepoMigrations[\"{name}\"] -and $lastexitcode -eq 0) {{ $Succeeded++ }} else {{ $Failed++ }}"
                ));

            if self.config.download_migration_logs {
                script.invocation(commands.download_logs(name));
            }

            script.blank();
        }

        script
            .blank()
            .statement("Write-Host =============== Summary ===============")
            .statement("Write-Host Total number of successful migrations: $Succeeded")
            .statement("Write-Host Total number of failed migrations: $Failed")
            .blank()
            .statement("if ($Failed -ne 0) {")
            .statement("    exit 1")
            .statement("}")
            .blank()
            .blank();

        script
    }
}

/// Generate a script in one call.
pub fn generate(config: &GenerationConfig, repos: &[Repository]) -> String {
    ScriptGenerator::new(config.clone()).generate(repos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Fragment;

    fn repos(names: &[&str]) -> Vec<Repository> {
        names.iter().map(|n| Repository::private(*n)).collect()
    }

    #[test]
    fn test_sequential_invocations_in_order() {
        let config = GenerationConfig::github("source", "target").with_mode(ExecutionMode::Sequential);
        let script = ScriptGenerator::new(config).build(&repos(&["a", "b", "c"]));

        let invocations: Vec<&str> = script.invocations().collect();
        assert_eq!(invocations.len(), 3);
        assert!(invocations[0].contains(r#"--source-repo "a""#));
        assert!(invocations[2].contains(r#"--source-repo "c""#));
        assert!(invocations.iter().all(|i| i.starts_with("Exec { ")));
    }

    #[test]
    fn test_sequential_with_logs_doubles_invocations() {
        let config = GenerationConfig {
            download_migration_logs: true,
            ..GenerationConfig::github("source", "target").with_mode(ExecutionMode::Sequential)
        };
        let script = ScriptGenerator::new(config).build(&repos(&["a", "b"]));

        let invocations: Vec<&str> = script.invocations().collect();
        assert_eq!(invocations.len(), 4);
        assert!(invocations[1].contains("download-logs"));
        assert!(invocations[3].contains(r#"--target-repo "b""#));
    }

    #[test]
    fn test_sequential_has_no_summary() {
        let config = GenerationConfig::github("source", "target").with_mode(ExecutionMode::Sequential);
        let text = ScriptGenerator::new(config).generate(&repos(&["a"]));

        assert!(!text.contains("Summary"));
        assert!(!text.contains("ExecAndGetMigrationID"));
    }

    #[test]
    fn test_parallel_phases() {
        let config = GenerationConfig::github("source", "target");
        let script = ScriptGenerator::new(config).build(&repos(&["a", "b"]));

        let invocations: Vec<&str> = script.invocations().collect();
        assert_eq!(invocations.len(), 4);
        assert!(invocations[0].starts_with("$MigrationID = ExecAndGetMigrationID"));
        assert!(invocations[1].contains(r#"--target-repo "b""#));
        assert!(invocations[2].starts_with(r#"if ($RepoMigrations["a"])"#));
        assert!(invocations[3].starts_with(r#"if ($RepoMigrations["b"])"#));
    }

    #[test]
    fn test_validation_blocks_follow_helper() {
        let config = GenerationConfig::azure_devops("contoso", "Payments", "target");
        let script = ScriptGenerator::new(config).build(&repos(&["a"]));

        let fragments = script.fragments();
        assert_eq!(fragments[3], Fragment::Block(EXEC_AND_GET_MIGRATION_ID_FUNCTION_BLOCK));
        assert!(matches!(fragments[4], Fragment::Block(b) if b.contains("$env:GH_PAT")));
        assert!(matches!(fragments[5], Fragment::Block(b) if b.contains("$env:ADO_PAT")));
        assert_eq!(fragments[6], Fragment::Blank);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let config = GenerationConfig::github("source", "target");
        let repos = repos(&["a", "b"]);
        assert_eq!(generate(&config, &repos), generate(&config, &repos));
    }
}
