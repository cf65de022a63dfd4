//! Command definitions and execution
//!
//! Each binary parses its own top-level arguments (`repository::RepositoryCli`,
//! `bucket::BucketCli`) and shares the options in `CommonArgs`.

use std::path::PathBuf;

use clap::Args;
use vpro_aws::sdk::ClientOptions;
use vpro_core::{Config, ConfigManager, Result};

use crate::output::OutputConfig;

pub mod bucket;
pub mod repository;

/// Options accepted by both tools
#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Configuration file (defaults to $VPRO_CONFIG_DIR/config.toml or ~/.config/vpro/config.toml)
    #[arg(long, env = "VPRO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Named profile from the shared AWS config/credentials files
    #[arg(long)]
    pub profile: Option<String>,

    /// Endpoint override, e.g. a local emulator
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Disable the progress spinner
    #[arg(long, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

impl CommonArgs {
    /// Load the configuration file named by `--config`, or the default one
    ///
    /// A named file must exist; only the default location may be absent.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => ConfigManager::with_path(path.clone()).load_required(),
            None => ConfigManager::new()?.load(),
        }
    }

    /// Output settings; `--json` or `output = "json"` in the file select JSON
    pub fn output_config(&self, config: Option<&Config>) -> OutputConfig {
        OutputConfig {
            json: self.json || config.is_some_and(Config::json_output),
            no_color: self.no_color,
            no_progress: self.no_progress,
            quiet: self.quiet,
        }
    }

    /// SDK connection options; flags win over the config file
    pub fn client_options(&self, config: &Config) -> ClientOptions {
        ClientOptions {
            profile: self
                .profile
                .clone()
                .or_else(|| config.defaults.profile.clone()),
            endpoint_url: self
                .endpoint_url
                .clone()
                .or_else(|| config.defaults.endpoint_url.clone()),
        }
    }
}
