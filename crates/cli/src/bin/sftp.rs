//! sftp - recursive file transfer over SSH

use clap::Parser;
use opskit::commands::sftp::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    opskit::init_tracing(cli.global.debug);

    let exit_code = opskit::run_interruptible(sftp::execute(cli)).await;

    std::process::exit(exit_code.as_i32());
}
