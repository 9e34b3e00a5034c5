//! kit-core: Core library for the oss and sftp tools
//!
//! This crate provides the pieces both tools share:
//! - Error types and the parameter/fatal split
//! - Environment-driven configuration for the object storage client
//! - Parsing of `user:password@host/path` transfer targets
//! - The ObjectStore and RemoteFs traits
//! - Recursive directory-tree transfer
//!
//! Nothing here depends on a storage or SSH SDK; the adapters live in
//! kit-oss and kit-sftp.

pub mod config;
pub mod error;
pub mod target;
pub mod traits;
pub mod transfer;

pub use config::OssConfig;
pub use error::{Error, Result};
pub use target::TransferTarget;
#[cfg(any(test, feature = "mock"))]
pub use traits::MockObjectStore;
pub use traits::{
    ListOptions, ListResult, ObjectInfo, ObjectStore, RemoteEntry, RemoteFs, RemoteReader,
    RemoteWriter,
};
pub use transfer::{TransferEvent, TransferSummary, TreeTransfer};
