//! delete command - Remove a single object

use clap::Args;
use kit_core::{ObjectStore, Result};
use serde::Serialize;

use crate::commands::report_error;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Delete an object
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Object key to delete
    #[arg(long, value_name = "common/test.txt")]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DeleteOutput {
    pub status: &'static str,
    pub deleted: String,
}

pub(super) async fn run(args: &DeleteArgs, store: &dyn ObjectStore) -> Result<DeleteOutput> {
    store.delete_object(&args.name).await?;
    Ok(DeleteOutput {
        status: "success",
        deleted: args.name.clone(),
    })
}

/// Execute the delete command
///
/// Prints nothing on success unless JSON output is requested.
pub async fn execute(args: &DeleteArgs, store: &dyn ObjectStore, formatter: &Formatter) -> ExitCode {
    match run(args, store).await {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, formatter),
    }
}
