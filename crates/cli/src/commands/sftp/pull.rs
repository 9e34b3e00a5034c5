//! pull command - Download a remote file or directory tree
//!
//! The local destination is created if it does not exist and always names
//! the directory the remote entry is copied into.

use std::path::PathBuf;

use clap::Args;
use kit_core::{Result, TransferEvent, TransferSummary, TransferTarget, TreeTransfer};
use kit_sftp::{DEFAULT_PORT, SftpClient};
use serde::Serialize;

use super::print_event;
use crate::commands::report_error;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Download a file or directory
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Remote file or directory to download
    #[arg(long, value_name = "user:password@host/path")]
    pub src: String,

    /// Local directory to download into
    #[arg(long, value_name = "path")]
    pub dst: PathBuf,

    /// SSH port of the remote host
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Debug, Serialize)]
struct PullOutput {
    source: String,
    destination: String,
    #[serde(flatten)]
    summary: TransferSummary,
}

async fn run(
    args: &PullArgs,
    target: &TransferTarget,
    formatter: &Formatter,
    spinner: &ProgressBar,
) -> Result<TransferSummary> {
    let client = SftpClient::connect_target(target, args.port).await?;
    spinner.set_message(&format!("Downloading from {target}"));

    let observer = |event: &TransferEvent| print_event(event, formatter, spinner);
    let result = TreeTransfer::new(&client)
        .with_observer(&observer)
        .download(&target.path, &args.dst)
        .await;

    if let Err(e) = client.close().await {
        tracing::warn!(error = %e, "failed to close SFTP session cleanly");
    }
    result
}

/// Execute the pull command
pub async fn execute(args: &PullArgs, formatter: &Formatter) -> ExitCode {
    let target = match TransferTarget::parse(&args.src) {
        Ok(t) => t,
        Err(e) => return report_error(&e, formatter),
    };

    let spinner = ProgressBar::spinner(formatter.config(), &format!("Connecting to {}", target.host));
    let result = run(args, &target, formatter, &spinner).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            if formatter.is_json() {
                formatter.json(&PullOutput {
                    source: target.to_string(),
                    destination: args.dst.display().to_string(),
                    summary,
                });
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, formatter),
    }
}
