//! Common types for parsers

use std::path::Path;

use crate::version::semver::SemanticVersion;

/// A package reference found in one project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredPackage {
    /// Package id (e.g., "Newtonsoft.Json")
    pub name: String,
    /// Version pinned in the project file
    pub current_version: SemanticVersion,
    /// Project the reference belongs to (file stem of the project file)
    pub project: String,
}

impl DeclaredPackage {
    pub fn new(
        name: impl Into<String>,
        current_version: SemanticVersion,
        project: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            current_version,
            project: project.into(),
        }
    }
}

/// Returns true for `.csproj` and `.fsproj` files
pub fn is_project_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "csproj" | "fsproj"))
}

/// Project label for a project file: its file name without extension
pub fn project_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
