//! opskit CLI library
//!
//! Shared by the `oss` and `sftp` binaries and exported for tests.

use std::future::Future;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod commands;
pub mod exit_code;
pub mod output;

use exit_code::ExitCode;

/// Install the tracing subscriber
///
/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// controls the filter unless `--debug` forces debug level.
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Run a command to completion, or stop it on Ctrl+C
///
/// An interrupted command is dropped where it stands, which closes its
/// open files and sessions.
pub async fn run_interruptible<F>(command: F) -> ExitCode
where
    F: Future<Output = ExitCode>,
{
    tokio::select! {
        code = command => code,
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupted by Ctrl+C");
            ExitCode::Interrupted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completed_command_keeps_exit_code() {
        let code = run_interruptible(async { ExitCode::NotFound }).await;
        assert_eq!(code, ExitCode::NotFound);
    }
}
