//! Recursive directory-tree transfer
//!
//! Walks a local tree and mirrors it onto a [`RemoteFs`] (upload), or walks a
//! remote tree and mirrors it onto the local filesystem (download). The walk is
//! sequential and depth-first: each directory is created before its children
//! are visited, and siblings are visited in whatever order the directory
//! listing returns them. The first error aborts the whole transfer.
//!
//! A file is always written to `<destination dir>/<base name of source>`, so
//! the destination of a single-file transfer names a directory.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::traits::RemoteFs;

type BoxFuture<'b, T> = Pin<Box<dyn Future<Output = T> + Send + 'b>>;

/// Progress notifications emitted while a tree is transferred
///
/// Paths are reported from the local side in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// A file was copied completely
    FileCopied {
        local: String,
        remote: String,
        bytes: u64,
    },
    /// All entries of a directory were copied
    DirectoryFinished { path: String },
}

/// Totals for a finished transfer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferSummary {
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
}

/// Callback invoked for every [`TransferEvent`]
pub type Observer<'a> = &'a (dyn Fn(&TransferEvent) + Send + Sync);

/// A single upload or download between the local filesystem and a [`RemoteFs`]
pub struct TreeTransfer<'a, F: RemoteFs + ?Sized> {
    fs: &'a F,
    observer: Option<Observer<'a>>,
    summary: TransferSummary,
}

impl<'a, F: RemoteFs + ?Sized> TreeTransfer<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            observer: None,
            summary: TransferSummary::default(),
        }
    }

    /// Receive an event for every copied file and finished directory
    pub fn with_observer(mut self, observer: Observer<'a>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Copy a local file or directory tree to `remote`
    ///
    /// For a directory, `remote` is created (an existing directory is fine) and
    /// receives the directory's contents. For a file, `remote` is the directory
    /// the file is placed in.
    pub async fn upload(mut self, local: &Path, remote: &str) -> Result<TransferSummary> {
        let metadata = tokio::fs::metadata(local).await.map_err(|e| {
            tracing::debug!(path = %local.display(), error = %e, "stat failed");
            Error::NotFound(format!("path not found: {}", local.display()))
        })?;

        if metadata.is_dir() {
            self.ensure_remote_dir(remote).await?;
            self.upload_dir(local, remote).await?;
        } else {
            self.upload_file(local, remote).await?;
        }

        tracing::info!(
            files = self.summary.files,
            bytes = self.summary.bytes,
            "upload finished"
        );
        Ok(self.summary)
    }

    /// Copy a remote file or directory tree into the local directory `local`
    ///
    /// `local` is created with all missing parents first.
    pub async fn download(mut self, remote: &str, local: &Path) -> Result<TransferSummary> {
        let is_dir = self.fs.is_dir(remote).await.map_err(|e| {
            tracing::debug!(path = remote, error = %e, "remote stat failed");
            Error::NotFound(format!("path not found: {remote}"))
        })?;

        tokio::fs::create_dir_all(local).await?;

        if is_dir {
            self.download_dir(remote, local).await?;
        } else {
            self.download_file(remote, local).await?;
        }

        tracing::info!(
            files = self.summary.files,
            bytes = self.summary.bytes,
            "download finished"
        );
        Ok(self.summary)
    }

    fn upload_dir<'b>(&'b mut self, local: &'b Path, remote: &'b str) -> BoxFuture<'b, Result<()>> {
        Box::pin(async move {
            let mut entries = tokio::fs::read_dir(local).await?;

            while let Some(entry) = entries.next_entry().await? {
                let local_child = entry.path();
                let name = utf8_file_name(&local_child)?;

                if entry.file_type().await?.is_dir() {
                    let remote_child = join_remote(remote, name);
                    self.ensure_remote_dir(&remote_child).await?;
                    self.upload_dir(&local_child, &remote_child).await?;
                } else {
                    self.upload_file(&local_child, remote).await?;
                }
            }

            self.summary.directories += 1;
            self.emit(TransferEvent::DirectoryFinished {
                path: local.display().to_string(),
            });
            Ok(())
        })
    }

    async fn upload_file(&mut self, local: &Path, remote_dir: &str) -> Result<()> {
        let name = utf8_file_name(local)?;
        let target = join_remote(remote_dir, name);

        let mut source = tokio::fs::File::open(local).await?;
        let mut sink = self.fs.create(&target).await?;
        let bytes = tokio::io::copy(&mut source, &mut sink).await?;
        sink.shutdown().await?;

        tracing::debug!(source = %local.display(), target = %target, bytes, "uploaded file");
        self.record_file(local.display().to_string(), target, bytes);
        Ok(())
    }

    fn download_dir<'b>(
        &'b mut self,
        remote: &'b str,
        local: &'b Path,
    ) -> BoxFuture<'b, Result<()>> {
        Box::pin(async move {
            for entry in self.fs.read_dir(remote).await? {
                if entry.name == "." || entry.name == ".." {
                    continue;
                }

                let remote_child = join_remote(remote, &entry.name);
                if entry.is_dir {
                    let local_child = local.join(&entry.name);
                    ensure_local_dir(&local_child).await?;
                    self.download_dir(&remote_child, &local_child).await?;
                } else {
                    self.download_file(&remote_child, local).await?;
                }
            }

            self.summary.directories += 1;
            self.emit(TransferEvent::DirectoryFinished {
                path: local.display().to_string(),
            });
            Ok(())
        })
    }

    async fn download_file(&mut self, remote: &str, local_dir: &Path) -> Result<()> {
        let name = remote_base_name(remote)
            .ok_or_else(|| Error::InvalidParameter(format!("no file name in {remote}")))?;
        let target = local_dir.join(name);

        let mut source = self.fs.open(remote).await?;
        let mut sink = tokio::fs::File::create(&target).await?;
        let bytes = tokio::io::copy(&mut source, &mut sink).await?;
        sink.flush().await?;

        tracing::debug!(source = remote, target = %target.display(), bytes, "downloaded file");
        self.record_file(target.display().to_string(), remote.to_string(), bytes);
        Ok(())
    }

    /// Create a remote directory, tolerating one that already exists
    ///
    /// SFTP v3 reports an existing directory as a generic failure, so the path
    /// is stat'ed before the error is given up on.
    async fn ensure_remote_dir(&self, path: &str) -> Result<()> {
        match self.fs.create_dir(path).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.fs.is_dir(path).await.unwrap_or(false) {
                    tracing::info!(path, "remote directory already exists");
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }

    fn record_file(&mut self, local: String, remote: String, bytes: u64) {
        self.summary.files += 1;
        self.summary.bytes += bytes;
        self.emit(TransferEvent::FileCopied {
            local,
            remote,
            bytes,
        });
    }

    fn emit(&self, event: TransferEvent) {
        if let Some(observer) = self.observer {
            observer(&event);
        }
    }
}

async fn ensure_local_dir(path: &Path) -> Result<()> {
    match tokio::fs::create_dir(path).await {
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::info!(path = %path.display(), "local directory already exists");
            Ok(())
        }
        other => Ok(other?),
    }
}

/// Base name of a local path, which must be valid UTF-8 to be named remotely
fn utf8_file_name(path: &Path) -> Result<&str> {
    let name = path
        .file_name()
        .ok_or_else(|| Error::InvalidParameter(format!("no file name in {}", path.display())))?;
    name.to_str().ok_or_else(|| {
        Error::InvalidParameter(format!("file name is not valid UTF-8: {}", path.display()))
    })
}

/// Join a child name onto a `/`-separated remote path
pub fn join_remote(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Last component of a `/`-separated remote path
pub fn remote_base_name(path: &str) -> Option<&str> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}
