//! vpro-ecr - Create an image repository
//!
//! Creates one ECR repository and prints its URI.

use clap::Parser;
use serde::Serialize;
use vpro_aws::EcrRegistry;
use vpro_core::{Config, RepositoryConfig, RepositoryInfo, RepositoryProvisioner, TagMutability};

use super::CommonArgs;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// vpro-ecr - create an ECR image repository
///
/// With no arguments, creates the repository named in the config file
/// (default "vpro-app-image" in us-east-1).
#[derive(Parser, Debug)]
#[command(name = "vpro-ecr")]
#[command(author, version, about, long_about = None)]
pub struct RepositoryCli {
    /// Repository name (overrides the config file)
    #[arg(long)]
    pub name: Option<String>,

    /// Region to create the repository in (overrides the config file)
    #[arg(long)]
    pub region: Option<String>,

    /// Scan images for vulnerabilities on push
    #[arg(long)]
    pub scan_on_push: bool,

    /// Make image tags immutable
    #[arg(long)]
    pub immutable_tags: bool,

    /// Resource tag to attach, may be repeated
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl RepositoryCli {
    /// Resolve the repository to create: flags, then config file, then defaults
    pub fn resolve(&self, config: &Config) -> RepositoryConfig {
        let mut repository = config.repository_config();

        if let Some(name) = &self.name {
            repository.name = name.clone();
        }
        if let Some(region) = &self.region {
            repository.region = region.clone();
        }
        if self.scan_on_push {
            repository.scan_on_push = true;
        }
        if self.immutable_tags {
            repository.tag_mutability = Some(TagMutability::Immutable);
        }
        repository.tags.extend(self.tags.iter().cloned());

        repository
    }
}

#[derive(Debug, Serialize)]
struct RepositoryOutput<'a> {
    status: &'static str,
    #[serde(flatten)]
    repository: &'a RepositoryInfo,
}

/// Execute vpro-ecr
pub async fn execute(cli: RepositoryCli) -> ExitCode {
    let config = match cli.common.load_config() {
        Ok(config) => config,
        Err(e) => {
            Formatter::new(cli.common.output_config(None))
                .error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from(&e);
        }
    };

    let formatter = Formatter::new(cli.common.output_config(Some(&config)));
    let repository = cli.resolve(&config);
    tracing::debug!(?repository, "Resolved repository config");

    let registry = EcrRegistry::new(&repository.region, &cli.common.client_options(&config)).await;
    let provisioner = RepositoryProvisioner::new(registry);

    let spinner = Spinner::start(
        formatter.config(),
        &format!("Creating ECR repository {}...", repository.name),
    );
    let result = provisioner.provision(&repository).await;
    spinner.finish_and_clear();

    match result {
        Ok(info) => {
            if formatter.is_json() {
                formatter.json(&RepositoryOutput {
                    status: "success",
                    repository: &info,
                });
            } else {
                formatter.success(&format!(
                    "ECR repository {} created with URI: {}",
                    info.name, info.uri
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!(
                "Failed to create ECR repository '{}': {e}",
                repository.name
            ));
            ExitCode::from(&e)
        }
    }
}

/// Parse a `KEY=VALUE` tag argument
fn parse_tag(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid tag '{raw}': expected KEY=VALUE"))?;

    if key.is_empty() {
        return Err(format!("invalid tag '{raw}': key cannot be empty"));
    }

    Ok((key.to_string(), value.to_string()))
}
