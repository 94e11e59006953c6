//! Upgrade target resolution for declared packages

use crate::parser::types::DeclaredPackage;
use crate::version::semver::SemanticVersion;
use crate::version::types::VersionCatalog;

/// Resolved upgrade targets for one declared package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStatus {
    pub declared: DeclaredPackage,
    /// Newest version on the same major and release track as the current one,
    /// or the current version when there is none
    pub wanted_version: SemanticVersion,
    /// Newest version without a prerelease label
    pub stable_version: Option<SemanticVersion>,
    /// Newest listed version
    pub latest_version: Option<SemanticVersion>,
}

/// How far a package is behind, from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// No upgrade available on the current major
    UpToDate,
    /// A newer version exists on the current major
    MinorUpgrade,
    /// A release is available for the prerelease currently in use
    StabilizationAvailable,
    /// A stable version with a higher major exists
    MajorUpgrade,
}

impl PackageStatus {
    /// Classify the status. Checks run in priority order, so a newer stable
    /// major wins even when a same-major upgrade exists too.
    pub fn severity(&self) -> Severity {
        let current = &self.declared.current_version;

        if self
            .stable_version
            .as_ref()
            .is_some_and(|stable| stable.major() > current.major())
        {
            return Severity::MajorUpgrade;
        }

        if *current < self.wanted_version {
            if current.is_prerelease() && !self.wanted_version.is_prerelease() {
                return Severity::StabilizationAvailable;
            }
            return Severity::MinorUpgrade;
        }

        Severity::UpToDate
    }
}

/// Resolve wanted, stable and latest versions of `declared` from `catalog`.
///
/// `catalog.versions` is newest first, so the first match for each target is
/// the best one.
pub fn resolve_status(declared: &DeclaredPackage, catalog: &VersionCatalog) -> PackageStatus {
    let current = &declared.current_version;

    let mut latest: Option<&SemanticVersion> = None;
    let mut stable: Option<&SemanticVersion> = None;
    let mut wanted: Option<&SemanticVersion> = None;

    for version in &catalog.versions {
        if latest.is_none() {
            latest = Some(version);
        }

        if stable.is_none() && !version.is_prerelease() {
            stable = Some(version);
        }

        // A prerelease consumer may move to anything on its major; a release
        // consumer only to other releases.
        if wanted.is_none()
            && version.major() == current.major()
            && (current.is_prerelease() || !version.is_prerelease())
        {
            wanted = Some(version);
        }

        if latest.is_some() && stable.is_some() && wanted.is_some() {
            break;
        }
    }

    PackageStatus {
        declared: declared.clone(),
        wanted_version: wanted.unwrap_or(current).clone(),
        stable_version: stable.cloned(),
        latest_version: latest.cloned(),
    }
}
