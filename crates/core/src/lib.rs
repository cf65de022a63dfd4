//! vpro-core: Core library for the vpro provisioning tools
//!
//! This crate provides the SDK-independent parts of the tools:
//! - Configuration file handling
//! - Repository and bucket configuration values
//! - Local name and region pre-validation
//! - Service traits for the registry and object storage
//! - The repository and bucket provisioners
//!
//! Nothing here depends on the AWS SDK, so the provisioners can be driven
//! by test doubles of the service traits.

pub mod config;
pub mod error;
pub mod provision;
pub mod resource;
pub mod traits;
pub mod validate;

pub use config::{Config, ConfigManager, Defaults};
pub use error::{Error, ProviderError, Result};
pub use provision::{BucketProvisioner, RepositoryProvisioner};
pub use resource::{BucketConfig, BucketInfo, RepositoryConfig, RepositoryInfo, TagMutability};
pub use traits::{RegistryService, StorageService};
