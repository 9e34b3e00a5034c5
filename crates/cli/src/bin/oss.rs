//! oss - bucket object storage tool
//!
//! Pushes, pulls, deletes and lists objects in the bucket configured through
//! OSS_HOST, OSS_SECRET_ID and OSS_SECRET_KEY.

use clap::Parser;
use opskit::commands::oss::{self, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    opskit::init_tracing(cli.global.debug);

    let exit_code = opskit::run_interruptible(oss::execute(cli)).await;

    std::process::exit(exit_code.as_i32());
}
