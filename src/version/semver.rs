//! Semantic version type used throughout the catalog and status resolution

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::Version;

use crate::version::error::VersionError;

/// A parsed semantic version.
///
/// Ordering follows SemVer 2.0 precedence: a release sorts above any
/// prerelease of the same `major.minor.patch`, and prerelease labels are
/// compared identifier by identifier. Build metadata is kept for display
/// but ignored by equality, ordering and hashing.
#[derive(Debug, Clone)]
pub struct SemanticVersion(Version);

impl SemanticVersion {
    /// Parse a version string such as `1.2.3` or `3.2.1-alpha.2`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        Version::parse(input.trim())
            .map(Self)
            .map_err(|e| VersionError::InvalidFormat {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The prerelease label, if any (e.g. `alpha.2`).
    pub fn prerelease(&self) -> Option<&str> {
        if self.0.pre.is_empty() {
            None
        } else {
            Some(self.0.pre.as_str())
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.0.pre.is_empty()
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_precedence(&other.0)
    }
}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.major.hash(state);
        self.0.minor.hash(state);
        self.0.patch.hash(state);
        self.0.pre.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[rstest]
    #[case("1.2.3", 1, 2, 3, None)]
    #[case("3.2.1-alpha", 3, 2, 1, Some("alpha"))]
    #[case("0.0.1-rc.1", 0, 0, 1, Some("rc.1"))]
    #[case(" 10.20.30 ", 10, 20, 30, None)]
    fn parse_extracts_components(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: u64,
        #[case] patch: u64,
        #[case] pre: Option<&str>,
    ) {
        let version = v(input);
        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.patch(), patch);
        assert_eq!(version.prerelease(), pre);
        assert_eq!(version.is_prerelease(), pre.is_some());
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("1.2")]
    #[case("1.2.3.4")]
    #[case("v1.2.3")]
    #[case("not-a-version")]
    fn parse_rejects_malformed_input(#[case] input: &str) {
        let err = SemanticVersion::parse(input).unwrap_err();
        assert!(matches!(err, VersionError::InvalidFormat { .. }));
    }

    #[rstest]
    #[case("1.0.0-alpha", "1.0.0-alpha.1")]
    #[case("1.0.0-alpha.1", "1.0.0-alpha.beta")]
    #[case("1.0.0-alpha.beta", "1.0.0-beta")]
    #[case("1.0.0-beta", "1.0.0-beta.2")]
    #[case("1.0.0-beta.2", "1.0.0-beta.11")]
    #[case("1.0.0-beta.11", "1.0.0-rc.1")]
    #[case("1.0.0-rc.1", "1.0.0")]
    #[case("1.9.0", "1.10.0")]
    #[case("1.10.0", "2.0.0-alpha")]
    fn ordering_follows_semver_precedence(#[case] lower: &str, #[case] higher: &str) {
        assert!(v(lower) < v(higher), "{lower} should be lower than {higher}");
    }

    #[test]
    fn build_metadata_is_ignored_for_equality() {
        assert_eq!(v("1.0.0+build.1"), v("1.0.0+build.2"));
        assert_eq!(v("1.0.0+build.1").cmp(&v("1.0.0")), Ordering::Equal);
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("3.2.1-alpha")]
    #[case("1.0.0-rc.1+build.5")]
    fn display_round_trips(#[case] input: &str) {
        let version = v(input);
        assert_eq!(version.to_string(), input);
        assert_eq!(v(&version.to_string()), version);
    }
}
