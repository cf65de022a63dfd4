//! Resource configuration and results
//!
//! A `RepositoryConfig` or `BucketConfig` describes the one resource a tool
//! creates; `RepositoryInfo` and `BucketInfo` describe what the provider
//! reported back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Region used when neither the command line nor the config file names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default image repository name
pub const DEFAULT_REPOSITORY_NAME: &str = "vpro-app-image";

/// Default bucket name
pub const DEFAULT_BUCKET_NAME: &str = "vprostate";

/// Image tag mutability setting for a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMutability {
    Mutable,
    Immutable,
}

/// Configuration for a container image repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository name, unique within the account and region
    pub name: String,

    /// Region the repository is created in
    pub region: String,

    /// Scan images for vulnerabilities when they are pushed
    #[serde(default)]
    pub scan_on_push: bool,

    /// Tag mutability; the provider default applies when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_mutability: Option<TagMutability>,

    /// Resource tags attached at creation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl RepositoryConfig {
    /// Create a repository config with required fields
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            scan_on_push: false,
            tag_mutability: None,
            tags: BTreeMap::new(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REPOSITORY_NAME, DEFAULT_REGION)
    }
}

/// Configuration for an object storage bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Bucket name, unique across the whole provider
    pub name: String,

    /// Region the bucket is created in
    pub region: String,

    /// Enable object lock on the new bucket
    #[serde(default)]
    pub object_lock: bool,
}

impl BucketConfig {
    /// Create a bucket config with required fields
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            object_lock: false,
        }
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_NAME, DEFAULT_REGION)
    }
}

/// A repository as reported by the registry service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Repository name
    pub name: String,

    /// Provider-assigned URI, e.g. `<account>.dkr.ecr.<region>.amazonaws.com/<name>`
    pub uri: String,

    /// Resource ARN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// Registry (account) identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,

    /// Creation time reported by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<jiff::Timestamp>,
}

impl RepositoryInfo {
    /// Create a repository info with name and URI only
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            arn: None,
            registry_id: None,
            created_at: None,
        }
    }
}

/// A bucket as reported by the storage service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Region the bucket was requested in
    pub region: String,

    /// Location header returned by the service, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl BucketInfo {
    /// Create a bucket info without a reported location
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            location: None,
        }
    }
}
