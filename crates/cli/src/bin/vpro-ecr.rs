//! vpro-ecr - create an ECR image repository

use clap::Parser;
use vpro_cli::commands::repository::{self, RepositoryCli};

#[tokio::main]
async fn main() {
    let cli = RepositoryCli::parse();
    vpro_cli::init_tracing(cli.common.debug);

    let exit_code = repository::execute(cli).await;
    tracing::debug!(%exit_code, "Exiting");
    std::process::exit(exit_code.as_i32());
}
