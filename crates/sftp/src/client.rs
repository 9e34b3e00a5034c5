//! SFTP client
//!
//! Opens a password-authenticated SSH session, starts the `sftp` subsystem on
//! it and exposes the result as a [`RemoteFs`] for tree transfers.
//! The remote sshd needs an sftp subsystem configured, e.g.
//! `Subsystem sftp internal-sftp`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use russh::client::{self, Handle};
use russh_sftp::client::SftpSession;

use kit_core::{Error, RemoteEntry, RemoteFs, RemoteReader, RemoteWriter, Result, TransferTarget};

use crate::handler::AcceptAnyHostKey;

/// Time allowed for TCP connect plus SSH handshake
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default SSH port
pub const DEFAULT_PORT: u16 = 22;

/// An SFTP session together with the SSH connection carrying it
pub struct SftpClient {
    session: Handle<AcceptAnyHostKey>,
    sftp: SftpSession,
}

impl SftpClient {
    /// Connect to `host:port` and authenticate with a password
    pub async fn connect(user: &str, password: &str, host: &str, port: u16) -> Result<Self> {
        let addr = format!("{host}:{port}");
        tracing::debug!(%addr, user, "connecting");

        let config = Arc::new(client::Config::default());
        let mut session = tokio::time::timeout(
            CONNECT_TIMEOUT,
            client::connect(config, addr.as_str(), AcceptAnyHostKey),
        )
        .await
        .map_err(|_| {
            Error::Network(format!(
                "connection to {addr} timed out after {}s",
                CONNECT_TIMEOUT.as_secs()
            ))
        })?
        .map_err(|e| Error::Network(format!("SSH handshake with {addr} failed: {e}")))?;

        let auth = session
            .authenticate_password(user, password)
            .await
            .map_err(|e| Error::Network(format!("SSH authentication with {addr} failed: {e}")))?;

        if !auth.success() {
            return Err(Error::Auth(format!("password rejected for {user}@{host}")));
        }

        let channel = session
            .channel_open_session()
            .await
            .map_err(|e| Error::Network(format!("failed to open SSH channel: {e}")))?;

        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| Error::Network(format!("failed to request sftp subsystem: {e}")))?;

        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| Error::Network(format!("SFTP handshake failed: {e}")))?;

        tracing::info!(%addr, user, "SFTP session established");
        Ok(Self { session, sftp })
    }

    /// Connect to the host named by a parsed transfer target
    pub async fn connect_target(target: &TransferTarget, port: u16) -> Result<Self> {
        Self::connect(&target.user, &target.password, &target.host, port).await
    }

    /// End the SFTP session and disconnect
    pub async fn close(self) -> Result<()> {
        drop(self.sftp);
        self.session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(|e| Error::Network(format!("disconnect failed: {e}")))
    }
}

fn map_sftp_error(err: russh_sftp::client::error::Error, path: &str) -> Error {
    let message = err.to_string();
    if message.contains("No such file") || message.contains("NoSuchFile") {
        Error::NotFound(path.to_string())
    } else if message.contains("Permission denied") || message.contains("PermissionDenied") {
        Error::Auth(format!("{path}: {message}"))
    } else {
        Error::Network(format!("{path}: {message}"))
    }
}

#[async_trait]
impl RemoteFs for SftpClient {
    async fn create_dir(&self, path: &str) -> Result<()> {
        self.sftp
            .create_dir(path)
            .await
            .map_err(|e| map_sftp_error(e, path))
    }

    async fn is_dir(&self, path: &str) -> Result<bool> {
        let metadata = self
            .sftp
            .metadata(path)
            .await
            .map_err(|e| map_sftp_error(e, path))?;
        Ok(metadata.is_dir())
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteEntry>> {
        let entries = self
            .sftp
            .read_dir(path)
            .await
            .map_err(|e| map_sftp_error(e, path))?;

        Ok(entries
            .map(|entry| RemoteEntry {
                is_dir: entry.metadata().is_dir(),
                name: entry.file_name(),
            })
            .collect())
    }

    async fn open(&self, path: &str) -> Result<RemoteReader> {
        let file = self
            .sftp
            .open(path)
            .await
            .map_err(|e| map_sftp_error(e, path))?;
        Ok(Box::new(file))
    }

    async fn create(&self, path: &str) -> Result<RemoteWriter> {
        let file = self
            .sftp
            .create(path)
            .await
            .map_err(|e| map_sftp_error(e, path))?;
        Ok(Box::new(file))
    }
}
