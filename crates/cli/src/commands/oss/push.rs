//! push command - Upload a local file
//!
//! Uploads the file at `--path` under the key `--name` and prints the public
//! URL the object is served from.

use std::path::PathBuf;

use clap::Args;
use kit_core::{ObjectStore, OssConfig, Result};
use serde::Serialize;

use crate::commands::report_error;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Upload a local file
#[derive(Args, Debug)]
pub struct PushArgs {
    /// Object key to store the file under
    #[arg(long, value_name = "common/test.txt")]
    pub name: String,

    /// Local file to upload
    #[arg(long, value_name = "common/test.txt")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
pub(super) struct PushOutput {
    pub key: String,
    pub url: String,
    pub size_bytes: u64,
    pub size_human: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

pub(super) async fn run(
    args: &PushArgs,
    store: &dyn ObjectStore,
    config: &OssConfig,
) -> Result<PushOutput> {
    let info = store.put_file(&args.name, &args.path).await?;
    Ok(PushOutput {
        url: config.public_url(&args.name),
        key: info.key,
        size_bytes: info.size_bytes,
        size_human: info.size_human,
        etag: info.etag,
    })
}

/// Execute the push command
pub async fn execute(
    args: &PushArgs,
    store: &dyn ObjectStore,
    config: &OssConfig,
    formatter: &Formatter,
) -> ExitCode {
    let spinner = ProgressBar::spinner(formatter.config(), &format!("Uploading {}", args.name));
    let result = run(args, store, config).await;
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                formatter.println(&output.url);
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, formatter),
    }
}
