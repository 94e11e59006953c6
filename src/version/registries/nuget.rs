//! NuGet registration API implementation
//!
//! A package's registration index lists catalog pages. Small packages have
//! their entries inlined in the index; larger ones reference external page
//! documents by `@id` that must be fetched separately.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::version::error::RegistryError;
use crate::version::progress::{ProgressEvent, ProgressSender};
use crate::version::registry::Registry;
use crate::version::semver::SemanticVersion;
use crate::version::types::VersionCatalog;

/// Registration index (`{base}/{id}/index.json`)
#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    /// Canonical URL of this index as published by the registry
    #[serde(rename = "@id")]
    id: Option<String>,
    items: Vec<RegistrationPage>,
}

/// One catalog page, either inline (`items` present) or external (`@id` only)
#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: Option<String>,
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
struct RegistrationLeaf {
    #[serde(rename = "catalogEntry")]
    catalog_entry: CatalogEntry,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    version: String,
    #[serde(default = "listed_when_absent", deserialize_with = "deserialize_listed")]
    listed: bool,
}

fn listed_when_absent() -> bool {
    true
}

/// Accepts `true`/`false` and their string forms; anything else is unlisted.
fn deserialize_listed<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(listed) => listed,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Registry implementation for the NuGet registration API
pub struct NuGetRegistry {
    client: reqwest::Client,
    base_url: String,
    progress: Option<ProgressSender>,
}

impl NuGetRegistry {
    /// Creates a new NuGetRegistry with a custom base URL and default settings
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        Self::from_config(&RegistryConfig {
            base_url: base_url.to_string(),
            ..RegistryConfig::default()
        })
    }

    /// Creates a new NuGetRegistry from configuration.
    ///
    /// Requests bypass any system proxy and bind to an IPv4 local address,
    /// since the IPv6 endpoints of api.nuget.org do not always resolve.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .no_proxy()
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            progress: None,
        })
    }

    /// Publish a [`ProgressEvent`] on `sender` after each completed catalog
    pub fn with_progress(mut self, sender: ProgressSender) -> Self {
        self.progress = Some(sender);
        self
    }

    fn index_url(&self, lower_name: &str) -> String {
        format!("{}/{}/index.json", self.base_url, lower_name)
    }

    /// Page ids under the package's published registration root are rebased
    /// onto the configured base URL; anything else is fetched as given.
    ///
    /// `registration_root` is the index `@id` without its `index.json` file
    /// name, e.g. `https://api.nuget.org/v3/registration3/serilog/`.
    fn page_url(
        &self,
        lower_name: &str,
        registration_root: Option<&str>,
        page_id: &str,
    ) -> String {
        match registration_root.and_then(|root| page_id.strip_prefix(root)) {
            Some(rest) => format!("{}/{}/{}", self.base_url, lower_name, rest),
            None => page_id.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RegistryError> {
        debug!("Fetching NuGet resource: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| warn!("NuGet registry request failed: {}", e))?;

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse NuGet response from {}: {}", url, e);
            RegistryError::MalformedResponse {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Resolve a page to its entries, fetching it when it is external
    async fn page_entries(
        &self,
        lower_name: &str,
        index_url: &str,
        registration_root: Option<&str>,
        page: RegistrationPage,
    ) -> Result<Vec<RegistrationLeaf>, RegistryError> {
        match (page.items, page.id) {
            (Some(items), _) => Ok(items),
            (None, Some(id)) => {
                let url = self.page_url(lower_name, registration_root, &id);
                let external: RegistrationPage = self.get_json(&url).await?;
                external
                    .items
                    .ok_or_else(|| RegistryError::MalformedResponse {
                        url,
                        reason: "catalog page has no items".to_string(),
                    })
            }
            (None, None) => Err(RegistryError::MalformedResponse {
                url: index_url.to_string(),
                reason: "catalog page has neither items nor @id".to_string(),
            }),
        }
    }
}

/// Strip the file name from an index `@id`, keeping the trailing slash
fn registration_root(index_id: &str) -> Option<&str> {
    let index_id = index_id.split('#').next().unwrap_or(index_id);
    index_id
        .strip_suffix("index.json")
        .filter(|root| root.ends_with('/'))
}

/// Listed entries whose version parses; everything else is skipped
fn listed_versions(package_name: &str, leaves: Vec<RegistrationLeaf>) -> Vec<SemanticVersion> {
    leaves
        .into_iter()
        .filter(|leaf| leaf.catalog_entry.listed)
        .filter_map(
            |leaf| match SemanticVersion::parse(&leaf.catalog_entry.version) {
                Ok(version) => Some(version),
                Err(e) => {
                    debug!("Skipping version of {}: {}", package_name, e);
                    None
                }
            },
        )
        .collect()
}

#[async_trait::async_trait]
impl Registry for NuGetRegistry {
    async fn fetch_catalog(&self, package_name: &str) -> Result<VersionCatalog, RegistryError> {
        let lower_name = package_name.to_lowercase();
        let index_url = self.index_url(&lower_name);

        let index: RegistrationIndex = self.get_json(&index_url).await?;
        let page_count = index.items.len();
        let root = index.id.as_deref().and_then(registration_root);

        // Inline pages resolve immediately; external ones are fetched concurrently.
        // Results keep the order in which pages are declared in the index.
        let pages = try_join_all(
            index
                .items
                .into_iter()
                .map(|page| self.page_entries(&lower_name, &index_url, root, page)),
        )
        .await?;

        // Registry emits oldest first
        let versions: Vec<SemanticVersion> = pages
            .into_iter()
            .flat_map(|leaves| listed_versions(package_name, leaves))
            .collect();

        let catalog = VersionCatalog::from_oldest_first(package_name, versions);

        info!(
            "Fetched {} listed versions of {} from {} catalog pages",
            catalog.len(),
            package_name,
            page_count
        );

        if let Some(progress) = &self.progress {
            let _ = progress.send(ProgressEvent::CatalogFetched {
                package_name: package_name.to_string(),
                version_count: catalog.len(),
            });
        }

        Ok(catalog)
    }
}
