//! Progress events emitted while catalogs are fetched
//!
//! The registry client only publishes events; rendering them is up to
//! whoever holds the receiving end of the channel.

use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// All catalog pages of a package were fetched and merged
    CatalogFetched {
        package_name: String,
        version_count: usize,
    },
}

pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Create a progress channel. The receiver sees the end of the stream once
/// every sender (including clones held by registries) has been dropped.
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}
