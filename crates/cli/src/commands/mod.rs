//! CLI command definitions and execution
//!
//! Both binaries share the global flags, error reporting and the completions
//! command defined here. Tool-specific commands live in `oss` and `sftp`.

use clap::Args;
use kit_core::Error;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod completions;
pub mod oss;
pub mod sftp;

/// Flags accepted by every command of both tools
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress spinner
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,
}

impl GlobalArgs {
    /// Output configuration derived from the flags
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            json: self.json,
            no_color: self.no_color,
            no_progress: self.no_progress,
            quiet: self.quiet,
        }
    }
}

/// Print a failed command's error and pick its exit code
///
/// Parameter errors are the user's to fix and are only printed. Everything
/// else aborted the command midway and is also logged with full detail.
pub fn report_error(err: &Error, formatter: &Formatter) -> ExitCode {
    let code = ExitCode::from(err);
    if !err.is_usage() {
        tracing::debug!(error = ?err, exit_code = %code, "command aborted");
    }
    formatter.error(&err.to_string());
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_from_flags() {
        let global = GlobalArgs {
            json: true,
            quiet: true,
            ..Default::default()
        };
        let config = global.output_config();
        assert!(config.json);
        assert!(config.quiet);
        assert!(!config.no_color);
        assert!(!config.no_progress);
    }

    #[test]
    fn test_report_error_exit_codes() {
        let formatter = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        let code = report_error(&Error::InvalidParameter("dst".into()), &formatter);
        assert_eq!(code, ExitCode::UsageError);

        let code = report_error(&Error::Auth("denied".into()), &formatter);
        assert_eq!(code, ExitCode::AuthError);
    }
}
