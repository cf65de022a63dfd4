//! Service trait definitions
//!
//! These traits define the provider calls the provisioners depend on.
//! They keep the core decoupled from the AWS SDK and let tests swap in mocks.

use async_trait::async_trait;

use crate::error::Result;
use crate::resource::{BucketConfig, BucketInfo, RepositoryConfig, RepositoryInfo};

/// A container image registry service
///
/// Implementations are bound to the region they were created for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryService: Send + Sync {
    /// Create an image repository and return what the registry reported
    async fn create_repository(&self, config: &RepositoryConfig) -> Result<RepositoryInfo>;
}

/// An object storage service
///
/// Implementations are bound to the region they were created for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Create a bucket
    async fn create_bucket(&self, config: &BucketConfig) -> Result<BucketInfo>;
}
