//! S3 storage implementation
//!
//! Wraps aws-sdk-s3 and implements the StorageService trait from vpro-core.

use async_trait::async_trait;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use vpro_core::{BucketConfig, BucketInfo, Result, StorageService};

use crate::error::provider_error;
use crate::sdk::{ClientOptions, load_sdk_config};

/// Region in which S3 expects no location constraint
const LEGACY_REGION: &str = "us-east-1";

/// S3 client wrapper bound to one region
pub struct S3Storage {
    inner: aws_sdk_s3::Client,
    region: String,
}

impl S3Storage {
    /// Create a storage client for a region
    ///
    /// Path-style addressing is used when an endpoint override is set, since
    /// emulators rarely serve virtual-hosted bucket names.
    pub async fn new(region: &str, options: &ClientOptions) -> Self {
        let config = load_sdk_config(region, options).await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(options.endpoint_url.is_some())
            .build();

        Self::from_client(aws_sdk_s3::Client::from_conf(s3_config), region)
    }

    /// Wrap an already configured client
    pub fn from_client(inner: aws_sdk_s3::Client, region: impl Into<String>) -> Self {
        Self {
            inner,
            region: region.into(),
        }
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Region this client creates buckets in
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl StorageService for S3Storage {
    async fn create_bucket(&self, config: &BucketConfig) -> Result<BucketInfo> {
        let mut request = self.inner.create_bucket().bucket(&config.name);

        if let Some(bucket_config) = bucket_configuration(&config.region) {
            request = request.create_bucket_configuration(bucket_config);
        }

        if config.object_lock {
            request = request.object_lock_enabled_for_bucket(true);
        }

        tracing::debug!(bucket = %config.name, region = %self.region, "Sending CreateBucket");

        let response = request.send().await.map_err(provider_error)?;

        let mut info = BucketInfo::new(&config.name, &config.region);
        info.location = response.location().map(str::to_string);
        Ok(info)
    }
}

/// Location constraint for a bucket outside the legacy region
///
/// S3 rejects an explicit `us-east-1` constraint, so none is sent there.
fn bucket_configuration(region: &str) -> Option<CreateBucketConfiguration> {
    if region == LEGACY_REGION {
        return None;
    }

    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}
