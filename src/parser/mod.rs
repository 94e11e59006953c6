//! Project file parsing and discovery

pub mod discovery;
pub mod project_file;
pub mod traits;
pub mod types;

pub use discovery::scan_directory;
pub use project_file::ProjectFileParser;
