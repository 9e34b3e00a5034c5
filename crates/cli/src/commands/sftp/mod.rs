//! sftp - recursive file transfer over SSH
//!
//! Copies a local file or directory tree to a remote host, or a remote one
//! back, addressing the remote side as `user:password@host/path`.

use clap::{Parser, Subcommand};
use kit_core::TransferEvent;

use super::completions::{self, CompletionsArgs};
use super::GlobalArgs;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

mod pull;
mod push;

/// sftp - recursive file transfer over SSH
#[derive(Parser, Debug)]
#[command(name = "sftp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file or directory: sftp push --src <path> --dst user:password@host/path
    Push(push::PushArgs),

    /// Download a file or directory: sftp pull --src user:password@host/path --dst <path>
    Pull(pull::PullArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(cli.global.output_config());

    match cli.command {
        Commands::Push(args) => push::execute(&args, &formatter).await,
        Commands::Pull(args) => pull::execute(&args, &formatter).await,
        Commands::Completions(args) => completions::execute::<Cli>(args),
    }
}

/// Progress line printed for a transfer event
fn event_line(event: &TransferEvent) -> String {
    match event {
        TransferEvent::FileCopied { local, .. } => format!("{local} copy file finished!"),
        TransferEvent::DirectoryFinished { path } => format!("{path} copy directory finished!"),
    }
}

/// Print a transfer event above the spinner
fn print_event(event: &TransferEvent, formatter: &Formatter, spinner: &ProgressBar) {
    if formatter.is_json() {
        return;
    }
    spinner.suspend(|| formatter.println(&event_line(event)));
}
