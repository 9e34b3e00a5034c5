//! push command - Upload a local file or directory tree

use std::path::PathBuf;

use clap::Args;
use kit_core::{Result, TransferEvent, TransferSummary, TransferTarget, TreeTransfer};
use kit_sftp::{DEFAULT_PORT, SftpClient};
use serde::Serialize;

use super::print_event;
use crate::commands::report_error;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Upload a file or directory
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Local file or directory to upload
    #[arg(long, value_name = "path")]
    pub src: PathBuf,

    /// Remote directory to upload into
    #[arg(long, value_name = "user:password@host/path")]
    pub dst: String,

    /// SSH port of the remote host
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Debug, Serialize)]
struct PushOutput {
    source: String,
    destination: String,
    #[serde(flatten)]
    summary: TransferSummary,
}

async fn run(
    args: &PushArgs,
    target: &TransferTarget,
    formatter: &Formatter,
    spinner: &ProgressBar,
) -> Result<TransferSummary> {
    let client = SftpClient::connect_target(target, args.port).await?;
    spinner.set_message(&format!("Uploading to {target}"));

    let observer = |event: &TransferEvent| print_event(event, formatter, spinner);
    let result = TreeTransfer::new(&client)
        .with_observer(&observer)
        .upload(&args.src, &target.path)
        .await;

    if let Err(e) = client.close().await {
        tracing::warn!(error = %e, "failed to close SFTP session cleanly");
    }
    result
}

/// Execute the push command
pub async fn execute(args: &PushArgs, formatter: &Formatter) -> ExitCode {
    let target = match TransferTarget::parse(&args.dst) {
        Ok(t) => t,
        Err(e) => return report_error(&e, formatter),
    };

    let spinner = ProgressBar::spinner(formatter.config(), &format!("Connecting to {}", target.host));
    let result = run(args, &target, formatter, &spinner).await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            if formatter.is_json() {
                formatter.json(&PushOutput {
                    source: args.src.display().to_string(),
                    destination: target.to_string(),
                    summary,
                });
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, formatter),
    }
}
