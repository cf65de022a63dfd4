//! Repository and bucket provisioners
//!
//! Each provisioner performs a single creation request against an injected
//! service. There is no retry and no rollback: the first error is returned
//! to the caller unchanged.

use crate::error::Result;
use crate::resource::{BucketConfig, BucketInfo, RepositoryConfig, RepositoryInfo};
use crate::traits::{RegistryService, StorageService};
use crate::validate::{validate_bucket_name, validate_region, validate_repository_name};

/// Creates container image repositories
pub struct RepositoryProvisioner<R> {
    registry: R,
}

impl<R: RegistryService> RepositoryProvisioner<R> {
    /// Create a provisioner backed by the given registry service
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Create the repository described by `config`
    ///
    /// The name and region are checked locally first; a rejected name never
    /// reaches the registry. Not idempotent: creating an existing repository
    /// fails with `ProviderError::Conflict`.
    pub async fn provision(&self, config: &RepositoryConfig) -> Result<RepositoryInfo> {
        validate_region(&config.region)?;
        validate_repository_name(&config.name)?;

        tracing::info!(
            repository = %config.name,
            region = %config.region,
            "Creating image repository"
        );

        let info = self.registry.create_repository(config).await?;

        tracing::info!(repository = %info.name, uri = %info.uri, "Image repository created");
        Ok(info)
    }
}

/// Creates object storage buckets
pub struct BucketProvisioner<S> {
    storage: S,
}

impl<S: StorageService> BucketProvisioner<S> {
    /// Create a provisioner backed by the given storage service
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create the bucket described by `config`
    ///
    /// Bucket names are global across the provider, so a name owned by any
    /// other account fails with `ProviderError::Conflict`.
    pub async fn provision(&self, config: &BucketConfig) -> Result<BucketInfo> {
        validate_region(&config.region)?;
        validate_bucket_name(&config.name)?;

        tracing::info!(bucket = %config.name, region = %config.region, "Creating bucket");

        let info = self.storage.create_bucket(config).await?;

        tracing::info!(bucket = %info.name, "Bucket created");
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::{Error, ProviderError};
    use crate::traits::{MockRegistryService, MockStorageService};

    fn ecr_uri(region: &str, name: &str) -> String {
        format!("123456789012.dkr.ecr.{region}.amazonaws.com/{name}")
    }

    #[tokio::test]
    async fn test_repository_uri_contains_name() {
        let mut registry = MockRegistryService::new();
        registry
            .expect_create_repository()
            .times(1)
            .returning(|config| {
                Ok(RepositoryInfo::new(
                    &config.name,
                    ecr_uri(&config.region, &config.name),
                ))
            });

        let provisioner = RepositoryProvisioner::new(registry);
        let info = provisioner
            .provision(&RepositoryConfig::new("vpro-app-image", "us-east-1"))
            .await
            .unwrap();

        assert_eq!(
            info.uri,
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/vpro-app-image"
        );
        assert!(info.uri.contains("vpro-app-image"));
    }

    #[tokio::test]
    async fn test_repository_duplicate_name_conflicts() {
        let mut registry = MockRegistryService::new();
        let mut existing = HashSet::new();
        registry
            .expect_create_repository()
            .times(2)
            .returning(move |config| {
                if existing.insert(config.name.clone()) {
                    Ok(RepositoryInfo::new(
                        &config.name,
                        ecr_uri(&config.region, &config.name),
                    ))
                } else {
                    Err(ProviderError::from_service_code(
                        "RepositoryAlreadyExistsException",
                        format!("The repository with name '{}' already exists", config.name),
                    )
                    .into())
                }
            });

        let provisioner = RepositoryProvisioner::new(registry);
        let config = RepositoryConfig::default();

        assert!(provisioner.provision(&config).await.is_ok());
        let err = provisioner.provision(&config).await.unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Conflict(_))));
        assert_eq!(err.exit_code(), 6);
    }

    #[tokio::test]
    async fn test_repository_empty_name_never_reaches_registry() {
        let mut registry = MockRegistryService::new();
        registry.expect_create_repository().never();

        let provisioner = RepositoryProvisioner::new(registry);
        let err = provisioner
            .provision(&RepositoryConfig::new("", "us-east-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Provider(ProviderError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_repository_invalid_region_never_reaches_registry() {
        let mut registry = MockRegistryService::new();
        registry.expect_create_repository().never();

        let provisioner = RepositoryProvisioner::new(registry);
        let err = provisioner
            .provision(&RepositoryConfig::new("vpro-app-image", "Mars"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Provider(ProviderError::Region(_))));
    }

    #[tokio::test]
    async fn test_repository_auth_error_propagates() {
        let mut registry = MockRegistryService::new();
        registry.expect_create_repository().returning(|_| {
            Err(ProviderError::from_service_code(
                "UnrecognizedClientException",
                "The security token included in the request is invalid.",
            )
            .into())
        });

        let provisioner = RepositoryProvisioner::new(registry);
        let err = provisioner
            .provision(&RepositoryConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Provider(ProviderError::Auth(_))));
        assert!(err.to_string().contains("security token"));
    }

    #[tokio::test]
    async fn test_repository_config_passed_through() {
        let mut registry = MockRegistryService::new();
        registry
            .expect_create_repository()
            .withf(|config| {
                config.scan_on_push
                    && config.tags.get("team").map(String::as_str) == Some("platform")
            })
            .returning(|config| {
                Ok(RepositoryInfo::new(
                    &config.name,
                    ecr_uri(&config.region, &config.name),
                ))
            });

        let mut config = RepositoryConfig::new("team/app", "eu-west-1");
        config.scan_on_push = true;
        config.tags.insert("team".into(), "platform".into());

        let info = RepositoryProvisioner::new(registry)
            .provision(&config)
            .await
            .unwrap();
        assert_eq!(info.uri, "123456789012.dkr.ecr.eu-west-1.amazonaws.com/team/app");
    }

    #[tokio::test]
    async fn test_bucket_success_returns_configured_name() {
        let mut storage = MockStorageService::new();
        storage
            .expect_create_bucket()
            .times(1)
            .returning(|config| Ok(BucketInfo::new(&config.name, &config.region)));

        let provisioner = BucketProvisioner::new(storage);
        let info = provisioner
            .provision(&BucketConfig::new("vprostate", "us-east-1"))
            .await
            .unwrap();

        assert_eq!(info.name, "vprostate");
        assert_eq!(info.region, "us-east-1");
        assert!(info.location.is_none());
    }

    #[tokio::test]
    async fn test_bucket_taken_by_other_account_conflicts() {
        let mut storage = MockStorageService::new();
        storage.expect_create_bucket().returning(|_| {
            Err(ProviderError::from_service_code(
                "BucketAlreadyExists",
                "The requested bucket name is not available.",
            )
            .into())
        });

        let err = BucketProvisioner::new(storage)
            .provision(&BucketConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Provider(ProviderError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_bucket_empty_name_never_reaches_storage() {
        let mut storage = MockStorageService::new();
        storage.expect_create_bucket().never();

        let err = BucketProvisioner::new(storage)
            .provision(&BucketConfig::new("", "us-east-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Provider(ProviderError::InvalidName(_))));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_bucket_network_error_propagates() {
        let mut storage = MockStorageService::new();
        storage
            .expect_create_bucket()
            .returning(|_| Err(ProviderError::Network("dispatch failure".into()).into()));

        let err = BucketProvisioner::new(storage)
            .provision(&BucketConfig::new("vprostate", "eu-west-1"))
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), 3);
    }
}
