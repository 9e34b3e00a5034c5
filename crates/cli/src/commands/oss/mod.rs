//! oss - bucket object storage tool
//!
//! Pushes, pulls, deletes and lists objects in the bucket named by `OSS_HOST`,
//! and prints image-resize query templates.

use clap::{Parser, Subcommand};
use kit_core::{ObjectStore, OssConfig};
use kit_oss::OssClient;

use super::completions::{self, CompletionsArgs};
use super::{GlobalArgs, report_error};
use crate::exit_code::ExitCode;
use crate::output::Formatter;

mod delete;
mod list;
mod pull;
mod push;
mod scale;

/// oss - bucket object storage tool
///
/// Credentials are read from OSS_HOST, OSS_SECRET_ID and OSS_SECRET_KEY.
#[derive(Parser, Debug)]
#[command(name = "oss")]
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
    /// Upload a local file: oss push --name common/test.txt --path common/test.txt
    Push(push::PushArgs),

    /// Download an object: oss pull --name common/test.txt --path common/test.txt
    Pull(pull::PullArgs),

    /// Delete an object: oss delete --name common/test.txt
    Delete(delete::DeleteArgs),

    /// List up to 10 objects under a prefix: oss list --prefix conf
    List(list::ListArgs),

    /// Print image-resize query templates
    Scale,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(cli.global.output_config());

    match cli.command {
        Commands::Scale => scale::execute(&formatter),
        Commands::Completions(args) => completions::execute::<Cli>(args),
        command => {
            let config = OssConfig::from_env();
            let client = match OssClient::new(&config).await {
                Ok(c) => c,
                Err(e) => return report_error(&e, &formatter),
            };
            dispatch(command, &client, &config, &formatter).await
        }
    }
}

/// Run a command against an already constructed store
pub async fn dispatch(
    command: Commands,
    store: &dyn ObjectStore,
    config: &OssConfig,
    formatter: &Formatter,
) -> ExitCode {
    match command {
        Commands::Push(args) => push::execute(&args, store, config, formatter).await,
        Commands::Pull(args) => pull::execute(&args, store, formatter).await,
        Commands::Delete(args) => delete::execute(&args, store, formatter).await,
        Commands::List(args) => list::execute(&args, store, formatter).await,
        Commands::Scale => scale::execute(formatter),
        Commands::Completions(args) => completions::execute::<Cli>(args),
    }
}
