//! Registry implementations for fetching package version catalogs

pub mod nuget;

pub use nuget::NuGetRegistry;
