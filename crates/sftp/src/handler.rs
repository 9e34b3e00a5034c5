//! SSH client event handler

use russh::client::Handler;
use russh::keys::{HashAlg, PublicKey};

/// Client handler that trusts every server host key.
///
/// No known_hosts lookup or fingerprint pinning takes place, so the
/// connection is open to man-in-the-middle attacks. The fingerprint is
/// logged at debug level for manual inspection.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAnyHostKey;

impl Handler for AcceptAnyHostKey {
    type Error = russh::Error;

    async fn check_server_key(&mut self, server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        let fingerprint = server_public_key.fingerprint(HashAlg::Sha256);
        tracing::debug!(%fingerprint, "accepting server host key without verification");
        Ok(true)
    }
}
