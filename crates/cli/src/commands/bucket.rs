//! vpro-s3 - Create a bucket
//!
//! Creates one S3 bucket and confirms it by name.

use clap::Parser;
use serde::Serialize;
use vpro_aws::S3Storage;
use vpro_core::{BucketConfig, BucketInfo, BucketProvisioner, Config};

use super::CommonArgs;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Spinner};

/// vpro-s3 - create an S3 bucket
///
/// With no arguments, creates the bucket named in the config file
/// (default "vprostate" in us-east-1). Bucket names are global, so the
/// name must not be taken by any account.
#[derive(Parser, Debug)]
#[command(name = "vpro-s3")]
#[command(author, version, about, long_about = None)]
pub struct BucketCli {
    /// Bucket name (overrides the config file)
    #[arg(long)]
    pub name: Option<String>,

    /// Region to create the bucket in (overrides the config file)
    #[arg(long)]
    pub region: Option<String>,

    /// Enable object locking on the bucket
    #[arg(long)]
    pub object_lock: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl BucketCli {
    /// Resolve the bucket to create: flags, then config file, then defaults
    pub fn resolve(&self, config: &Config) -> BucketConfig {
        let mut bucket = config.bucket_config();

        if let Some(name) = &self.name {
            bucket.name = name.clone();
        }
        if let Some(region) = &self.region {
            bucket.region = region.clone();
        }
        if self.object_lock {
            bucket.object_lock = true;
        }

        bucket
    }
}

#[derive(Debug, Serialize)]
struct BucketOutput<'a> {
    status: &'static str,
    #[serde(flatten)]
    bucket: &'a BucketInfo,
}

/// Execute vpro-s3
pub async fn execute(cli: BucketCli) -> ExitCode {
    let config = match cli.common.load_config() {
        Ok(config) => config,
        Err(e) => {
            Formatter::new(cli.common.output_config(None))
                .error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from(&e);
        }
    };

    let formatter = Formatter::new(cli.common.output_config(Some(&config)));
    let bucket = cli.resolve(&config);
    tracing::debug!(?bucket, "Resolved bucket config");

    let storage = S3Storage::new(&bucket.region, &cli.common.client_options(&config)).await;
    let provisioner = BucketProvisioner::new(storage);

    let spinner = Spinner::start(
        formatter.config(),
        &format!("Creating S3 bucket {}...", bucket.name),
    );
    let result = provisioner.provision(&bucket).await;
    spinner.finish_and_clear();

    match result {
        Ok(info) => {
            if formatter.is_json() {
                formatter.json(&BucketOutput {
                    status: "success",
                    bucket: &info,
                });
            } else {
                formatter.success(&format!("S3 bucket {} created", info.name));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Failed to create S3 bucket '{}': {e}", bucket.name));
            ExitCode::from(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_uses_defaults() {
        let cli = BucketCli::try_parse_from(["vpro-s3"]).unwrap();
        let bucket = cli.resolve(&Config::default());
        assert_eq!(bucket, BucketConfig::default());
        assert_eq!(bucket.name, "vprostate");
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut config = Config::default();
        config.bucket.name = Some("from-file".to_string());
        config.defaults.region = "eu-central-1".to_string();

        let cli = BucketCli::try_parse_from(["vpro-s3", "--name", "vpro-eu-state", "--object-lock"])
            .unwrap();
        let bucket = cli.resolve(&config);

        assert_eq!(bucket.name, "vpro-eu-state");
        assert_eq!(bucket.region, "eu-central-1");
        assert!(bucket.object_lock);
    }

    #[test]
    fn test_common_flags_parse() {
        let cli = BucketCli::try_parse_from([
            "vpro-s3",
            "--json",
            "--quiet",
            "--profile",
            "dev",
            "--debug",
        ])
        .unwrap();
        assert!(cli.common.json);
        assert!(cli.common.quiet);
        assert!(cli.common.debug);
        assert_eq!(cli.common.profile.as_deref(), Some("dev"));
    }

    #[test]
    fn test_json_output_shape() {
        let info = BucketInfo::new("vprostate", "us-east-1");
        let value = serde_json::to_value(BucketOutput {
            status: "success",
            bucket: &info,
        })
        .unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["name"], "vprostate");
        assert!(value.get("location").is_none());
    }
}
