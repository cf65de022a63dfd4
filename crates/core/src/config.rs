//! Configuration management
//!
//! This module handles loading, saving, and migrating the vpro configuration file.
//! The configuration file is stored in TOML format at ~/.config/vpro/config.toml,
//! or under `$VPRO_CONFIG_DIR` when that variable is set.
//!
//! Changes to schema_version require migration support.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resource::{
    BucketConfig, DEFAULT_BUCKET_NAME, DEFAULT_REGION, DEFAULT_REPOSITORY_NAME, RepositoryConfig,
    TagMutability,
};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "VPRO_CONFIG_DIR";

/// Default output format
const DEFAULT_OUTPUT: &str = "human";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,

    /// Image repository settings
    #[serde(default)]
    pub repository: RepositorySection,

    /// Bucket settings
    #[serde(default)]
    pub bucket: BucketSection,
}

/// Settings shared by both tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Region used when a resource section does not name one
    #[serde(default = "default_region")]
    pub region: String,

    /// Output format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Named profile from the shared AWS config/credentials files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Endpoint override, e.g. a local emulator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            region: default_region(),
            output: default_output(),
            profile: None,
            endpoint_url: None,
        }
    }
}

/// `[repository]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default)]
    pub scan_on_push: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_mutability: Option<TagMutability>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// `[bucket]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default)]
    pub object_lock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
            repository: RepositorySection::default(),
            bucket: BucketSection::default(),
        }
    }
}

impl Config {
    /// Whether JSON output is configured as the default
    pub fn json_output(&self) -> bool {
        self.defaults.output == "json"
    }

    /// Resolve the repository to create from the file's settings
    pub fn repository_config(&self) -> RepositoryConfig {
        let section = &self.repository;
        RepositoryConfig {
            name: section
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_REPOSITORY_NAME.to_string()),
            region: section
                .region
                .clone()
                .unwrap_or_else(|| self.defaults.region.clone()),
            scan_on_push: section.scan_on_push,
            tag_mutability: section.tag_mutability,
            tags: section.tags.clone(),
        }
    }

    /// Resolve the bucket to create from the file's settings
    pub fn bucket_config(&self) -> BucketConfig {
        let section = &self.bucket;
        BucketConfig {
            name: section
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_BUCKET_NAME.to_string()),
            region: section
                .region
                .clone()
                .unwrap_or_else(|| self.defaults.region.clone()),
            object_lock: section.object_lock,
        }
    }

    fn validate(&self) -> Result<()> {
        match self.defaults.output.as_str() {
            "human" | "json" => Ok(()),
            other => Err(Error::Config(format!(
                "Unknown output format '{other}', expected \"human\" or \"json\""
            ))),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// `$VPRO_CONFIG_DIR` takes precedence over the platform config directory.
    pub fn new() -> Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(Self {
                config_path: PathBuf::from(dir).join("config.toml"),
            });
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("vpro").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// If the schema version doesn't match, attempts migration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade vpro.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        config.validate()?;
        tracing::debug!(path = %self.config_path.display(), "Loaded config");
        Ok(config)
    }

    /// Load a configuration file the user named explicitly
    ///
    /// Unlike [`ConfigManager::load`], a missing file is an error rather than
    /// a fallback to the built-in defaults.
    pub fn load_required(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Err(Error::Config(format!(
                "configuration file '{}' not found",
                self.config_path.display()
            )));
        }
        self.load()
    }

    /// Save configuration to disk
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.config_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        Ok(())
    }

    /// Migrate configuration from older schema version
    fn migrate(&self, mut config: Config) -> Result<Config> {
        // Version 0 files predate the schema field; their layout is identical.
        tracing::debug!(
            from = config.schema_version,
            to = SCHEMA_VERSION,
            "Migrating config"
        );
        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let manager = ConfigManager::with_path(config_path);
        (manager, temp_dir)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert_eq!(config.defaults.output, "human");
        assert_eq!(config.defaults.region, "us-east-1");
        assert!(config.defaults.profile.is_none());
        assert!(!config.json_output());
    }

    #[test]
    fn test_default_config_matches_builtin_resources() {
        let config = Config::default();
        assert_eq!(config.repository_config(), RepositoryConfig::default());
        assert_eq!(config.bucket_config(), BucketConfig::default());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _temp_dir) = temp_config_manager();

        let mut config = Config::default();
        config.bucket.name = Some("vpro-artifacts".to_string());
        config.repository.tags.insert("team".into(), "platform".into());

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.bucket.name.as_deref(), Some("vpro-artifacts"));
        assert_eq!(loaded.repository.tags.len(), 1);
    }

    #[test]
    fn test_section_region_falls_back_to_defaults() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            r#"
            schema_version = 1

            [defaults]
            region = "eu-central-1"

            [repository]
            name = "team/app"
            region = "eu-west-1"
            scan_on_push = true

            [bucket]
            name = "vpro-eu-state"
            "#,
        )
        .unwrap();

        let config = manager.load().unwrap();
        let repository = config.repository_config();
        assert_eq!(repository.name, "team/app");
        assert_eq!(repository.region, "eu-west-1");
        assert!(repository.scan_on_push);

        let bucket = config.bucket_config();
        assert_eq!(bucket.name, "vpro-eu-state");
        assert_eq!(bucket.region, "eu-central-1");
    }

    #[test]
    fn test_old_schema_is_migrated() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(manager.config_path(), "schema_version = 0\n").unwrap();

        let config = manager.load().unwrap();
        assert_eq!(config.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_schema_version_too_new() {
        let (manager, _temp_dir) = temp_config_manager();

        let content = format!(
            r#"
            schema_version = {}
            "#,
            SCHEMA_VERSION + 1
        );
        std::fs::write(manager.config_path(), content).unwrap();

        let result = manager.load();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("newer than supported")
        );
    }

    #[test]
    fn test_unknown_output_format_rejected() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "schema_version = 1\n[defaults]\noutput = \"yaml\"\n",
        )
        .unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let (manager, _temp_dir) = temp_config_manager();
        let config = manager.load().unwrap();
        assert_eq!(config.bucket_config(), BucketConfig::default());
    }

    #[test]
    fn test_missing_named_file_is_config_error() {
        let (manager, _temp_dir) = temp_config_manager();

        let err = manager.load_required().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("not found"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_named_file_is_loaded() {
        let (manager, _temp_dir) = temp_config_manager();
        std::fs::write(
            manager.config_path(),
            "schema_version = 1\n[bucket]\nname = \"vpro-eu-state\"\n",
        )
        .unwrap();

        let config = manager.load_required().unwrap();
        assert_eq!(config.bucket_config().name, "vpro-eu-state");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (manager, _temp_dir) = temp_config_manager();
        manager.save(&Config::default()).unwrap();

        let mode = std::fs::metadata(manager.config_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);

        let reloaded = manager.load().unwrap();
        assert_eq!(reloaded.schema_version, SCHEMA_VERSION);
    }
}
