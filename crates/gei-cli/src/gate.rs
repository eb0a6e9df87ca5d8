//! GHES version gate for blob storage credentials.

use gei_sources::VersionSource;
use gei_types::GHES_BLOB_CREDENTIALS_CUTOFF;
use tracing::info;

/// Decide whether the script must check for blob storage credentials.
///
/// Only GHES sources need them, and only before 3.8.0. A server whose
/// version cannot be read is treated as needing them.
pub async fn blob_credentials_required(
    ghes_api_url: Option<&str>,
    source: &dyn VersionSource,
) -> bool {
    if ghes_api_url.map_or(true, str::is_empty) {
        return false;
    }

    info!("Using GitHub Enterprise Server - verifying server version");

    match source.version().await {
        Ok(version) if !version.version.is_empty() => {
            info!(version = %version, "GitHub Enterprise Server version detected");
            let (major, minor, patch) = GHES_BLOB_CREDENTIALS_CUTOFF;
            !version.is_at_least(major, minor, patch)
        }
        Ok(_) | Err(_) => {
            info!("Unable to parse the version number, defaulting to using CLI for blob storage uploads");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gei_sources::SourceError;
    use gei_types::VersionInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedVersion {
        version: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl FixedVersion {
        fn new(version: Option<&'static str>) -> Self {
            Self {
                version,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl VersionSource for FixedVersion {
        async fn version(&self) -> gei_sources::Result<VersionInfo> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.version
                .map(VersionInfo::new)
                .ok_or_else(|| SourceError::Unsupported("no version".to_string()))
        }
    }

    const GHES: Option<&str> = Some("https://ghes.example.com/api/v3");

    #[tokio::test]
    async fn test_github_com_never_requires() {
        let source = FixedVersion::new(Some("3.0.0"));
        assert!(!blob_credentials_required(None, &source).await);
        assert!(!blob_credentials_required(Some(""), &source).await);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_new_ghes_does_not_require() {
        let source = FixedVersion::new(Some("3.8.0"));
        assert!(!blob_credentials_required(GHES, &source).await);

        let source = FixedVersion::new(Some("3.12.4"));
        assert!(!blob_credentials_required(GHES, &source).await);
    }

    #[tokio::test]
    async fn test_old_ghes_requires() {
        let source = FixedVersion::new(Some("3.7.9"));
        assert!(blob_credentials_required(GHES, &source).await);
    }

    #[tokio::test]
    async fn test_unknown_version_requires() {
        assert!(blob_credentials_required(GHES, &FixedVersion::new(None)).await);
        assert!(blob_credentials_required(GHES, &FixedVersion::new(Some(""))).await);
        assert!(blob_credentials_required(GHES, &FixedVersion::new(Some("3.8"))).await);
    }
}
