//! Parser trait definition

use std::path::Path;

use crate::parser::types::DeclaredPackage;
use crate::version::error::VersionError;

/// Trait for parsing project files
pub trait Parser: Send + Sync {
    /// Check if this parser can handle the given path
    fn can_parse(&self, path: &Path) -> bool;

    /// Parse the content and extract declared packages.
    ///
    /// Malformed references do not abort parsing; they are returned as
    /// anomalies next to the packages that did parse.
    fn parse(&self, path: &Path, content: &str) -> ParsedManifest;
}

/// Result of parsing one project file
#[derive(Debug, Default)]
pub struct ParsedManifest {
    pub packages: Vec<DeclaredPackage>,
    pub anomalies: Vec<ParseError>,
}

/// Error type for parsing operations
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A package reference line that does not have the expected shape
    #[error("Unexpected content in file {path}: {line}")]
    UnexpectedContent { path: String, line: String },

    /// A package reference whose version does not parse
    #[error("Failed to parse package in file {path}: name={name} version={version} ({source})")]
    InvalidVersion {
        path: String,
        name: String,
        version: String,
        source: VersionError,
    },

    /// The file could not be read
    #[error("Failed to read file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}
