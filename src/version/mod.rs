//! Version management layer for package status reporting
//!
//! This module provides the core functionality for fetching package version
//! catalogs from the NuGet registry and resolving upgrade targets.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│   Catalog   │────▶│   Checker   │
//! │  (fetch)    │     │ (versions)  │     │  (resolve)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │  Registries │                         │   Semver    │
//! │   (nuget)   │                         │(version cmp)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Wanted/stable/latest resolution and severity classification
//! - [`registry`]: Registry trait for fetching catalogs from remote sources
//! - [`registries`]: Concrete registry implementations (NuGet)
//! - [`progress`]: Progress events published while catalogs are fetched
//! - [`error`]: Error types for version parsing and registry operations
//! - [`semver`]: The `SemanticVersion` type
//! - [`types`]: Common types like `VersionCatalog`

pub mod checker;
pub mod error;
pub mod progress;
pub mod registries;
pub mod registry;
pub mod semver;
pub mod types;
