//! # GEI Sources
//!
//! Inventory fetchers that turn a source platform's listing endpoints into
//! one ordered list of [`gei_types::Repository`] records.
//!
//! Each platform pages differently:
//!
//! - [`GithubClient`] requests fixed-size pages by number and stops at the
//!   first short page.
//! - [`BbsClient`] follows `start`/`limit` cursors until `isLastPage`.
//! - [`AdoClient`] reads a `value` envelope, filters out disabled
//!   repositories, and can search team projects for a GitHub service
//!   connection.
//!
//! All of them issue their requests through a shared [`gei_http::HttpClient`],
//! so retry and cancellation behave the same on every platform.

use async_trait::async_trait;
use gei_types::VersionInfo;

pub mod ado;
pub mod bbs;
pub mod error;
pub mod github;
pub mod pagination;
mod request;

pub use ado::{AdoClient, AdoRepository, ServiceEndpoint, TeamProject};
pub use bbs::{BbsClient, BbsProject, BbsRepository};
pub use error::{Result, SourceError};
pub use github::GithubClient;
pub use pagination::{StartLimitPage, ValueList};

/// A server that reports its release version.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Fetch the server version.
    async fn version(&self) -> Result<VersionInfo>;
}

#[async_trait]
impl VersionSource for GithubClient {
    async fn version(&self) -> Result<VersionInfo> {
        self.get_version().await
    }
}

