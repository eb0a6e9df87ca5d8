//! Server version metadata.

use serde::{Deserialize, Serialize};

/// Version reported by a source platform's metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Raw version string, e.g. `3.9.2`.
    pub version: String,
}

impl VersionInfo {
    /// Creates a new version record.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Returns the first three dot-separated numeric components.
    ///
    /// Returns `None` when there are fewer than three components or any of
    /// the first three is not a number. Components past the third are ignored.
    pub fn components(&self) -> Option<(u32, u32, u32)> {
        let mut parts = self.version.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        Some((major, minor, patch))
    }

    /// Checks whether this version is at least `major.minor.patch`.
    ///
    /// A version that cannot be parsed is never "at least" anything.
    pub fn is_at_least(&self, major: u32, minor: u32, patch: u32) -> bool {
        self.components()
            .is_some_and(|found| found >= (major, minor, patch))
    }
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least_exact() {
        assert!(VersionInfo::new("3.8.0").is_at_least(3, 8, 0));
    }

    #[test]
    fn test_at_least_older() {
        assert!(!VersionInfo::new("3.7.9").is_at_least(3, 8, 0));
        assert!(!VersionInfo::new("2.22.15").is_at_least(3, 8, 0));
    }

    #[test]
    fn test_at_least_newer() {
        assert!(VersionInfo::new("3.9.0").is_at_least(3, 8, 0));
        assert!(VersionInfo::new("4.0.0").is_at_least(3, 8, 0));
        assert!(VersionInfo::new("3.8.12").is_at_least(3, 8, 0));
    }

    #[test]
    fn test_malformed_is_not_at_least() {
        assert!(!VersionInfo::new("3.8").is_at_least(3, 8, 0));
        assert!(!VersionInfo::new("").is_at_least(0, 0, 0));
        assert!(!VersionInfo::new("three.eight.zero").is_at_least(3, 8, 0));
        assert!(!VersionInfo::new("3.8.0-rc1").is_at_least(3, 8, 0));
    }

    #[test]
    fn test_extra_components_ignored() {
        let version = VersionInfo::new("3.10.1.4");
        assert_eq!(version.components(), Some((3, 10, 1)));
        assert!(version.is_at_least(3, 8, 0));
    }
}
