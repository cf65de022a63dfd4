//! Shared SDK configuration loading

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Connection options applied to every client
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Named profile from the shared config/credentials files
    pub profile: Option<String>,

    /// Endpoint override, e.g. a local emulator
    pub endpoint_url: Option<String>,
}

/// Load SDK configuration for a region
///
/// Credentials come from the default provider chain (environment, shared
/// files, container or instance roles), optionally narrowed to a profile.
pub async fn load_sdk_config(region: &str, options: &ClientOptions) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    if let Some(profile) = &options.profile {
        loader = loader.profile_name(profile);
    }

    if let Some(endpoint) = &options.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    tracing::debug!(
        region,
        profile = options.profile.as_deref(),
        endpoint = options.endpoint_url.as_deref(),
        "Loading SDK config"
    );

    loader.load().await
}
