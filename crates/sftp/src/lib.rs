//! kit-sftp: SSH/SFTP adapter for the sftp tool
//!
//! Implements the RemoteFs trait from kit-core on top of russh and
//! russh-sftp. It is the only crate that directly depends on SSH.

pub mod client;
pub mod handler;

pub use client::{CONNECT_TIMEOUT, DEFAULT_PORT, SftpClient};
pub use handler::AcceptAnyHostKey;
