//! vpro-aws: AWS SDK adapter for the vpro provisioning tools
//!
//! This crate implements the `RegistryService` and `StorageService` traits
//! from vpro-core using aws-sdk-ecr and aws-sdk-s3. It is the only crate
//! that directly depends on the AWS SDK.

pub mod ecr;
pub mod error;
pub mod s3;
pub mod sdk;

pub use ecr::EcrRegistry;
pub use s3::S3Storage;
pub use sdk::{ClientOptions, load_sdk_config};
