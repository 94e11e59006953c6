//! Registry test utilities

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use nuget_status::version::error::RegistryError;
use nuget_status::version::registry::Registry;
use nuget_status::version::semver::SemanticVersion;
use nuget_status::version::types::VersionCatalog;

/// Mock registry for testing
pub struct MockRegistry {
    versions: HashMap<String, Vec<String>>,
    requested: Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            versions: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Register versions of a package, newest first
    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.versions.insert(
            package.to_string(),
            versions.into_iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    /// Package names requested so far, sorted
    pub fn requested(&self) -> Vec<String> {
        let mut requested = self.requested.lock().unwrap().clone();
        requested.sort();
        requested
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_catalog(&self, package_name: &str) -> Result<VersionCatalog, RegistryError> {
        self.requested
            .lock()
            .unwrap()
            .push(package_name.to_string());

        match self.versions.get(package_name) {
            Some(versions) => Ok(VersionCatalog::new(
                package_name,
                versions
                    .iter()
                    .map(|v| SemanticVersion::parse(v).unwrap())
                    .collect(),
            )),
            None => Err(RegistryError::MalformedResponse {
                url: format!("mock://{}", package_name.to_lowercase()),
                reason: "package not registered in mock".to_string(),
            }),
        }
    }
}

/// Create a temporary source tree with the given project files
pub fn create_project_tree(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (relative, content) in files {
        write_file(temp_dir.path(), relative, content);
    }
    temp_dir
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Build a minimal SDK-style project file referencing `packages`
pub fn project_file(packages: &[(&str, &str)]) -> String {
    let references: String = packages
        .iter()
        .map(|(name, version)| {
            format!(
                "    <PackageReference Include=\"{}\" Version=\"{}\" />\n",
                name, version
            )
        })
        .collect();

    format!(
        "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <ItemGroup>\n{}  </ItemGroup>\n</Project>\n",
        references
    )
}
