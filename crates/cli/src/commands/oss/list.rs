//! list command - List objects under a prefix
//!
//! Only the first page of at most [`MAX_KEYS`] objects is fetched. Longer
//! listings are cut off; JSON output reports this through `truncated`.

use clap::Args;
use kit_core::{ListOptions, ObjectInfo, ObjectStore, Result};
use serde::Serialize;

use crate::commands::report_error;
use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Number of objects requested from the store
pub const MAX_KEYS: usize = 10;

/// List objects
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list keys starting with this prefix
    #[arg(long, value_name = "conf", default_value = "")]
    pub prefix: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ListOutput {
    pub items: Vec<ObjectInfo>,
    pub truncated: bool,
}

pub(super) async fn run(args: &ListArgs, store: &dyn ObjectStore) -> Result<ListOutput> {
    let options = ListOptions {
        prefix: (!args.prefix.is_empty()).then(|| args.prefix.clone()),
        max_keys: Some(MAX_KEYS as i32),
    };
    let result = store.list_objects(options).await?;

    let matching: Vec<ObjectInfo> = result
        .items
        .into_iter()
        .filter(|item| item.key.starts_with(&args.prefix))
        .collect();
    let truncated = result.truncated || matching.len() > MAX_KEYS;

    Ok(ListOutput {
        items: matching.into_iter().take(MAX_KEYS).collect(),
        truncated,
    })
}

/// Human-readable line for one entry
pub(super) fn entry_line(item: &ObjectInfo) -> String {
    format!("{}, {} KB", item.key, item.size_kib())
}

/// Execute the list command
pub async fn execute(args: &ListArgs, store: &dyn ObjectStore, formatter: &Formatter) -> ExitCode {
    match run(args, store).await {
        Ok(output) => {
            if formatter.is_json() {
                formatter.json(&output);
            } else {
                for item in &output.items {
                    formatter.println(&entry_line(item));
                }
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, formatter),
    }
}
