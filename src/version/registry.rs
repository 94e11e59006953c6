//! Registry trait for fetching package version catalogs

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::VersionCatalog;

/// Trait for fetching package version catalogs from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches every listed version of a package
    ///
    /// # Arguments
    /// * `package_name` - The package id as declared in the manifest (e.g., "Newtonsoft.Json")
    ///
    /// # Returns
    /// * `Ok(VersionCatalog)` - Listed versions, ordered from newest to oldest
    /// * `Err(RegistryError)` - If any part of the catalog cannot be fetched or parsed
    async fn fetch_catalog(&self, package_name: &str) -> Result<VersionCatalog, RegistryError>;
}
