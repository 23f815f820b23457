//! Remote wiki abstraction and the Confluence Cloud implementation.
//!
//! This module provides:
//! - `Remote` trait for abstracting the target wiki server
//! - `ConfluenceRemote` implementation speaking the Cloud REST API
//! - Types for shortcut items and captured API responses

pub mod confluence;

use serde::Serialize;
use thiserror::Error;

/// A sidebar shortcut queued for batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutItem {
    /// Display text; `None` lets the target supply its own.
    pub title: Option<String>,
    /// Fully-qualified link target.
    pub url: String,
    /// Always `None` on creation; the server assigns ids.
    pub id: Option<String>,
}

/// Captured outcome of a single HTTP call.
///
/// Any HTTP status lands here as a value; only transport-level failures
/// (connection refused, TLS, DNS) use the error channel. Callers branch
/// on `status` instead of catching.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Failure modes of the remote lookups and writes.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Unable to locate space id for key \"{key}\": {detail}")]
    SpaceLookup { key: String, detail: String },

    #[error("Unable to locate page URL for \"{title}\" in space {space_id}: {detail}")]
    PageLookup {
        space_id: String,
        title: String,
        detail: String,
    },

    #[error("Unable to resolve container space key \"{key}\": {source}")]
    ContainerSpace {
        key: String,
        source: Box<RemoteError>,
    },

    #[error("{context} failed with status {status}: {body}")]
    Api {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("{context}: {detail}")]
    Transport {
        context: &'static str,
        detail: String,
    },
}

/// Trait for the target wiki server.
pub trait Remote {
    /// Resolve a space key to the space's id. Requires exactly one match.
    fn resolve_space_id(&self, key: &str) -> Result<String, RemoteError>;

    /// Resolve a page to its fully-qualified web URL. Requires exactly
    /// one match for the space/title pair.
    fn resolve_page_url(&self, space_id: &str, title: &str) -> Result<String, RemoteError>;

    /// Replace the shortcut list of a space with `items`. This overwrites
    /// whatever shortcuts the space currently has.
    fn push_shortcuts(&self, space_key: &str, items: &[ShortcutItem]) -> Result<(), RemoteError>;

    /// Create a page template.
    fn create_template(&self, name: &str, content: &str) -> Result<(), RemoteError>;
}
