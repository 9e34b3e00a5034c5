//! pull command - Download an object to a local file

use std::path::PathBuf;

use clap::Args;
use kit_core::{ObjectStore, Result};
use serde::Serialize;

use crate::commands::report_error;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Download an object
#[derive(Args, Debug)]
pub struct PullArgs {
    /// Object key to download
    #[arg(long, value_name = "common/test.txt")]
    pub name: String,

    /// Local file to write
    #[arg(long, value_name = "common/test.txt")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub(super) struct PullOutput {
    pub key: String,
    pub path: String,
    pub size_bytes: u64,
}

pub(super) async fn run(args: &PullArgs, store: &dyn ObjectStore) -> Result<PullOutput> {
    let bytes = store.get_to_file(&args.name, &args.path).await?;
    Ok(PullOutput {
        key: args.name.clone(),
        path: args.path.display().to_string(),
        size_bytes: bytes,
    })
}

/// Execute the pull command
///
/// Prints nothing on success unless JSON output is requested.
pub async fn execute(args: &PullArgs, store: &dyn ObjectStore, formatter: &Formatter) -> ExitCode {
    let spinner = ProgressBar::spinner(formatter.config(), &format!("Downloading {}", args.name));
    let result = run(args, store).await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, formatter),
    }
}
