//! # GEI Script Generation
//!
//! Turns a [`GenerationConfig`] and an ordered list of repositories into a
//! reviewable PowerShell migration script.
//!
//! Two shapes are produced:
//!
//! - [`ExecutionMode::Sequential`]: each repository is migrated to completion
//!   before the next, and the first failure aborts the script.
//! - [`ExecutionMode::Parallel`]: every migration is queued first, then the
//!   script waits for each one and prints a success/failure summary.
//!
//! ## Example
//!
//! ```rust
//! use gei_scriptgen::{ExecutionMode, GenerationConfig, ScriptGenerator};
//! use gei_types::Repository;
//!
//! let config = GenerationConfig::github("source-org", "target-org")
//!     .with_mode(ExecutionMode::Sequential)
//!     .with_cli_version("1.0.0");
//!
//! let script = ScriptGenerator::new(config).generate(&[Repository::private("api")]);
//! assert!(script.starts_with("#!/usr/bin/env pwsh\n"));
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod script;
pub mod templates;
pub mod validation;

pub use command::CommandBuilder;
pub use config::{
    ExecutionMode, GenerationConfig, SourceIdentity, ADO2GH_COMMAND, BBS2GH_COMMAND, GEI_COMMAND,
};
pub use error::{ConfigError, Result};
pub use generator::{generate, ScriptGenerator};
pub use script::{Fragment, ScriptBuilder};
pub use validation::{validation_checks, ValidationCheck};
