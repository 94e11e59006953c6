//! Parser for MSBuild project files (.csproj, .fsproj)
//!
//! Package references are picked up line by line, which covers the common
//! single-line form:
//!
//! ```xml
//! <PackageReference Include="Newtonsoft.Json" Version="13.0.3" />
//! ```

use std::path::Path;

use regex::Regex;
use tracing::warn;

use crate::parser::traits::{ParseError, ParsedManifest, Parser};
use crate::parser::types::{DeclaredPackage, is_project_file, project_label};
use crate::version::semver::SemanticVersion;

/// Lines containing this marker are treated as package references
const PACKAGE_REFERENCE_MARKER: &str = "PackageReference Include=";

pub struct ProjectFileParser {
    /// Regex for a package reference: `Include="name" Version="1.2.3"`
    reference_re: Regex,
}

impl ProjectFileParser {
    pub fn new() -> Self {
        Self {
            reference_re: Regex::new(r#"Include="(.+?)" Version="(.+?)""#)
                .expect("package reference regex is valid"),
        }
    }
}

impl Default for ProjectFileParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for ProjectFileParser {
    fn can_parse(&self, path: &Path) -> bool {
        is_project_file(path)
    }

    fn parse(&self, path: &Path, content: &str) -> ParsedManifest {
        let project = project_label(path);
        let display_path = path.display().to_string();
        let mut manifest = ParsedManifest::default();

        for line in content
            .lines()
            .filter(|line| line.contains(PACKAGE_REFERENCE_MARKER))
        {
            let Some(captures) = self.reference_re.captures(line) else {
                warn!("Unexpected package reference in {}: {}", display_path, line);
                manifest.anomalies.push(ParseError::UnexpectedContent {
                    path: display_path.clone(),
                    line: line.trim().to_string(),
                });
                continue;
            };

            let name = &captures[1];
            let version = &captures[2];

            match SemanticVersion::parse(version) {
                Ok(current_version) => manifest.packages.push(DeclaredPackage::new(
                    name,
                    current_version,
                    project.clone(),
                )),
                Err(source) => {
                    warn!(
                        "Skipping {} in {}: invalid version {}",
                        name, display_path, version
                    );
                    manifest.anomalies.push(ParseError::InvalidVersion {
                        path: display_path.clone(),
                        name: name.to_string(),
                        version: version.to_string(),
                        source,
                    });
                }
            }
        }

        manifest
    }
}
