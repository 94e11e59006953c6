//! Common types for the version layer

use crate::version::semver::SemanticVersion;

/// All listed versions of one package, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCatalog {
    pub package_name: String,
    /// Strictly decreasing; never contains two equal versions.
    pub versions: Vec<SemanticVersion>,
}

impl VersionCatalog {
    /// Build a catalog from versions already ordered newest first.
    ///
    /// Out-of-order entries are moved into place with a stable sort and
    /// duplicates are dropped, keeping the first occurrence.
    pub fn new(package_name: impl Into<String>, mut versions: Vec<SemanticVersion>) -> Self {
        versions.sort_by(|a, b| b.cmp(a));
        versions.dedup();

        Self {
            package_name: package_name.into(),
            versions,
        }
    }

    /// Build a catalog from versions in registry emission order (oldest first).
    pub fn from_oldest_first(
        package_name: impl Into<String>,
        mut versions: Vec<SemanticVersion>,
    ) -> Self {
        versions.reverse();
        Self::new(package_name, versions)
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// The newest listed version.
    pub fn latest(&self) -> Option<&SemanticVersion> {
        self.versions.first()
    }
}
