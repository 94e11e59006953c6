//! Report aggregation across all declared packages
//!
//! Fetches one catalog per distinct package name, resolves every declared
//! package against it and flags packages pinned to different versions in
//! different projects.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use futures::future::try_join_all;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::FETCH_STAGGER_DELAY_MS;
use crate::parser::types::DeclaredPackage;
use crate::version::checker::{PackageStatus, Severity, resolve_status};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::semver::SemanticVersion;
use crate::version::types::VersionCatalog;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to fetch versions of {package}: {source}")]
    Registry {
        package: String,
        source: RegistryError,
    },
}

/// One line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub status: PackageStatus,
    /// The same package is pinned to different versions across projects
    pub inconsistent: bool,
}

/// Display tier of a row; inconsistency outranks the computed severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTier {
    Severity(Severity),
    Inconsistent,
}

impl ReportRow {
    pub fn tier(&self) -> RowTier {
        if self.inconsistent {
            RowTier::Inconsistent
        } else {
            RowTier::Severity(self.status.severity())
        }
    }
}

/// Distinct package names in ordinal order
pub fn distinct_package_names(packages: &[DeclaredPackage]) -> Vec<&str> {
    packages
        .iter()
        .map(|p| p.name.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fetch one catalog per name.
///
/// Fetches run in parallel with staggered start times to avoid rate limiting.
/// The first failure fails the whole batch.
async fn fetch_catalogs(
    registry: &dyn Registry,
    names: &[&str],
) -> Result<HashMap<String, VersionCatalog>, ReportError> {
    let futures = names.iter().enumerate().map(|(i, name)| {
        let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
        async move {
            sleep(delay).await;
            debug!("Fetching catalog for {}", name);
            registry
                .fetch_catalog(name)
                .await
                .map(|catalog| (name.to_string(), catalog))
                .map_err(|source| {
                    error!("Failed to fetch versions of {}: {}", name, source);
                    ReportError::Registry {
                        package: name.to_string(),
                        source,
                    }
                })
        }
    });

    Ok(try_join_all(futures).await?.into_iter().collect())
}

/// Names pinned to more than one distinct version
fn inconsistent_names(packages: &[DeclaredPackage]) -> HashSet<&str> {
    let mut versions: HashMap<&str, BTreeSet<&SemanticVersion>> = HashMap::new();
    for package in packages {
        versions
            .entry(package.name.as_str())
            .or_default()
            .insert(&package.current_version);
    }

    versions
        .into_iter()
        .filter(|(_, versions)| versions.len() > 1)
        .map(|(name, _)| name)
        .collect()
}

/// Build the report rows for `packages`, sorted by package then project.
///
/// Any registry failure aborts the report; there are no partial results.
pub async fn build_report(
    registry: &dyn Registry,
    packages: &[DeclaredPackage],
) -> Result<Vec<ReportRow>, ReportError> {
    if packages.is_empty() {
        return Ok(Vec::new());
    }

    let names = distinct_package_names(packages);
    info!(
        "Resolving {} distinct packages from {} references",
        names.len(),
        packages.len()
    );

    let catalogs = fetch_catalogs(registry, &names).await?;
    let inconsistent = inconsistent_names(packages);

    let mut rows: Vec<ReportRow> = packages
        .iter()
        .map(|package| {
            // fetch_catalogs returned one entry per distinct name or failed
            let catalog = &catalogs[package.name.as_str()];
            ReportRow {
                status: resolve_status(package, catalog),
                inconsistent: inconsistent.contains(package.name.as_str()),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        let (a, b) = (&a.status.declared, &b.status.declared);
        a.name.cmp(&b.name).then_with(|| a.project.cmp(&b.project))
    });

    Ok(rows)
}
