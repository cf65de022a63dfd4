//! ECR registry implementation
//!
//! Wraps aws-sdk-ecr and implements the RegistryService trait from vpro-core.

use async_trait::async_trait;
use aws_sdk_ecr::types::{ImageScanningConfiguration, ImageTagMutability, Repository, Tag};

use vpro_core::{
    ProviderError, RegistryService, RepositoryConfig, RepositoryInfo, Result, TagMutability,
};

use crate::error::provider_error;
use crate::sdk::{ClientOptions, load_sdk_config};

/// ECR client wrapper bound to one region
pub struct EcrRegistry {
    inner: aws_sdk_ecr::Client,
    region: String,
}

impl EcrRegistry {
    /// Create a registry client for a region
    pub async fn new(region: &str, options: &ClientOptions) -> Self {
        let config = load_sdk_config(region, options).await;
        Self::from_client(aws_sdk_ecr::Client::new(&config), region)
    }

    /// Wrap an already configured client
    pub fn from_client(inner: aws_sdk_ecr::Client, region: impl Into<String>) -> Self {
        Self {
            inner,
            region: region.into(),
        }
    }

    /// Get the underlying aws-sdk-ecr client
    pub fn inner(&self) -> &aws_sdk_ecr::Client {
        &self.inner
    }

    /// Region this client creates repositories in
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl RegistryService for EcrRegistry {
    async fn create_repository(&self, config: &RepositoryConfig) -> Result<RepositoryInfo> {
        let mut request = self.inner.create_repository().repository_name(&config.name);

        if config.scan_on_push {
            request = request.image_scanning_configuration(
                ImageScanningConfiguration::builder()
                    .scan_on_push(true)
                    .build(),
            );
        }

        if let Some(mutability) = config.tag_mutability {
            request = request.image_tag_mutability(match mutability {
                TagMutability::Mutable => ImageTagMutability::Mutable,
                TagMutability::Immutable => ImageTagMutability::Immutable,
            });
        }

        for (key, value) in &config.tags {
            let tag = Tag::builder()
                .key(key)
                .value(value)
                .build()
                .map_err(|e| ProviderError::Service {
                    code: None,
                    message: format!("invalid tag '{key}': {e}"),
                })?;
            request = request.tags(tag);
        }

        tracing::debug!(
            repository = %config.name,
            region = %self.region,
            "Sending CreateRepository"
        );

        let response = request.send().await.map_err(provider_error)?;

        let repository = response.repository().ok_or_else(|| ProviderError::Service {
            code: None,
            message: format!(
                "CreateRepository for '{}' returned no repository",
                config.name
            ),
        })?;

        repository_info(repository, &config.name).map_err(Into::into)
    }
}

/// Convert the SDK repository shape, requiring a URI
fn repository_info(
    repository: &Repository,
    requested_name: &str,
) -> std::result::Result<RepositoryInfo, ProviderError> {
    let uri = repository
        .repository_uri()
        .ok_or_else(|| ProviderError::Service {
            code: None,
            message: format!("repository '{requested_name}' was created without a URI"),
        })?;

    let mut info = RepositoryInfo::new(
        repository.repository_name().unwrap_or(requested_name),
        uri,
    );
    info.arn = repository.repository_arn().map(str::to_string);
    info.registry_id = repository.registry_id().map(str::to_string);
    if let Some(created) = repository.created_at() {
        info.created_at = i32::try_from(created.subsec_nanos())
            .ok()
            .and_then(|nanos| jiff::Timestamp::new(created.secs(), nanos).ok());
    }

    Ok(info)
}
