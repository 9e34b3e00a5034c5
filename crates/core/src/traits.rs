//! Storage trait definitions
//!
//! [`ObjectStore`] is the interface the oss commands talk to, and [`RemoteFs`]
//! is the interface the directory-tree transfer walks. Both keep the command
//! layer decoupled from the SDKs and can be replaced by fakes in tests.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;

/// A bucket listing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Human-readable size
    pub size_human: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag as reported by the store, quotes stripped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size, humansize::BINARY),
            last_modified: None,
            etag: None,
        }
    }

    /// Size in KiB, truncated
    pub fn size_kib(&self) -> u64 {
        self.size_bytes / 1024
    }
}

/// Result of a list operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether more objects match than were returned
    pub truncated: bool,
}

/// Options for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Prefix to filter by
    pub prefix: Option<String>,

    /// Maximum number of keys to return
    pub max_keys: Option<i32>,
}

/// Operations against a single bucket
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload the local file at `path` under `key`
    async fn put_file(&self, key: &str, path: &Path) -> Result<ObjectInfo>;

    /// Download `key` into the local file at `path`, returning the number of bytes written
    async fn get_to_file(&self, key: &str, path: &Path) -> Result<u64>;

    /// Delete `key`
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// List one page of objects
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult>;
}

/// A directory entry on the remote side of a tree transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Base name of the entry
    pub name: String,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl RemoteEntry {
    /// Directory entry
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// File entry
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }
}

/// Readable remote file handle
pub type RemoteReader = Box<dyn AsyncRead + Send + Unpin>;

/// Writable remote file handle
pub type RemoteWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Filesystem operations on the remote host of a tree transfer
///
/// Paths are always `/`-separated strings regardless of the local platform.
#[async_trait]
pub trait RemoteFs: Send + Sync {
    /// Create a single directory
    async fn create_dir(&self, path: &str) -> Result<()>;

    /// Whether `path` is a directory; fails when it cannot be stat'ed
    async fn is_dir(&self, path: &str) -> Result<bool>;

    /// List a directory in the order the server returns it
    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteEntry>>;

    /// Open a file for reading
    async fn open(&self, path: &str) -> Result<RemoteReader>;

    /// Create or truncate a file for writing
    async fn create(&self, path: &str) -> Result<RemoteWriter>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_info_new() {
        let info = ObjectInfo::new("conf/app.toml", 2048);
        assert_eq!(info.key, "conf/app.toml");
        assert_eq!(info.size_bytes, 2048);
        assert!(info.size_human.contains("KiB"));
    }

    #[test]
    fn test_size_kib_truncates() {
        assert_eq!(ObjectInfo::new("a", 0).size_kib(), 0);
        assert_eq!(ObjectInfo::new("a", 1023).size_kib(), 0);
        assert_eq!(ObjectInfo::new("a", 1024).size_kib(), 1);
        assert_eq!(ObjectInfo::new("a", 5000).size_kib(), 4);
    }

    #[test]
    fn test_remote_entry_constructors() {
        assert!(RemoteEntry::dir("logs").is_dir);
        assert!(!RemoteEntry::file("a.txt").is_dir);
    }
}
