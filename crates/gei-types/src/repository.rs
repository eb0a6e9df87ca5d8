//! Repository types for migration planning.

use serde::{Deserialize, Serialize};

/// Visibility of a repository on the target organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Public repository.
    Public,
    /// Private repository.
    #[default]
    Private,
    /// Internal (enterprise-visible) repository.
    Internal,
}

impl Visibility {
    /// Parses a visibility as reported by a source API.
    ///
    /// Matching is case-insensitive. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "internal" => Some(Self::Internal),
            _ => None,
        }
    }

    /// Returns the flag value understood by `--target-repo-visibility`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A repository discovered on a source platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name (or slug) on the source platform.
    pub name: String,
    /// Visibility the migrated repository should receive.
    pub visibility: Visibility,
}

impl Repository {
    /// Creates a new repository record.
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
        }
    }

    /// Creates a private repository record.
    pub fn private(name: impl Into<String>) -> Self {
        Self::new(name, Visibility::Private)
    }
}
