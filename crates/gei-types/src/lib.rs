//! Common types used throughout `gei`.
//!
//! These are the values that flow from a source inventory fetcher into the
//! script generator: the repositories to migrate and the version metadata
//! reported by a GitHub Enterprise Server instance.

mod repository;
mod version;

pub use repository::{Repository, Visibility};
pub use version::VersionInfo;

/// The GHES release from which migrations no longer need caller-supplied
/// blob storage credentials.
pub const GHES_BLOB_CREDENTIALS_CUTOFF: (u32, u32, u32) = (3, 8, 0);
