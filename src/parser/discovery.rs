//! Project file discovery

use std::path::Path;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::parser::traits::{ParseError, ParsedManifest, Parser};

/// Parse every file under `root` (recursively) that `parser` can handle.
///
/// Files are visited in file-name order. Unreadable files and malformed
/// package references are collected as anomalies; they never stop the scan.
pub fn scan_directory(root: &Path, parser: &dyn Parser) -> ParsedManifest {
    let mut result = ParsedManifest::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root, e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !parser.can_parse(path) {
            continue;
        }

        debug!("Scanning project file {:?}", path);

        match std::fs::read_to_string(path) {
            Ok(content) => {
                let parsed = parser.parse(path, &content);
                result.packages.extend(parsed.packages);
                result.anomalies.extend(parsed.anomalies);
            }
            Err(source) => {
                warn!("Failed to read {:?}: {}", path, source);
                result.anomalies.push(ParseError::Read {
                    path: path.display().to_string(),
                    source,
                });
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::project_file::ProjectFileParser;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn scan_directory_collects_packages_from_nested_project_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "src/Web/Web.csproj",
            r#"<PackageReference Include="Serilog" Version="3.1.1" />"#,
        );
        write(
            root,
            "src/Core/Core.fsproj",
            r#"<PackageReference Include="FSharp.Core" Version="8.0.100" />"#,
        );
        write(
            root,
            "src/Web/appsettings.json",
            r#"<PackageReference Include="Ignored" Version="1.0.0" />"#,
        );

        let result = scan_directory(root, &ProjectFileParser::new());

        let found: Vec<(&str, &str)> = result
            .packages
            .iter()
            .map(|p| (p.name.as_str(), p.project.as_str()))
            .collect();
        assert_eq!(found, vec![("FSharp.Core", "Core"), ("Serilog", "Web")]);
        assert!(result.anomalies.is_empty());
    }

    #[test]
    fn scan_directory_keeps_going_after_anomalies() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(
            root,
            "A/A.csproj",
            r#"<PackageReference Include="Polly" Version="latest" />"#,
        );
        write(
            root,
            "B/B.csproj",
            r#"<PackageReference Include="Dapper" Version="2.1.28" />"#,
        );

        let result = scan_directory(root, &ProjectFileParser::new());

        assert_eq!(result.packages.len(), 1);
        assert_eq!(result.packages[0].name, "Dapper");
        assert_eq!(result.anomalies.len(), 1);
    }

    #[test]
    fn scan_directory_returns_nothing_for_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let result = scan_directory(temp_dir.path(), &ProjectFileParser::new());

        assert!(result.packages.is_empty());
        assert!(result.anomalies.is_empty());
    }
}
