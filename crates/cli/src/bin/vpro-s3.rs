//! vpro-s3 - create an S3 bucket

use clap::Parser;
use vpro_cli::commands::bucket::{self, BucketCli};

#[tokio::main]
async fn main() {
    let cli = BucketCli::parse();
    vpro_cli::init_tracing(cli.common.debug);

    let exit_code = bucket::execute(cli).await;
    tracing::debug!(%exit_code, "Exiting");
    std::process::exit(exit_code.as_i32());
}
