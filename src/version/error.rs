use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format '{input}': {reason}")]
    InvalidFormat { input: String, reason: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport failure, timeout or non-success status
    #[error("Registry unavailable: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("Malformed registry response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}
