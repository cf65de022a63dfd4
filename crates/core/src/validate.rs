//! Local name and region checks
//!
//! The provider is the authority on naming rules. These checks reject names
//! that are certain to fail so the tools exit before making a network call.

use crate::error::ProviderError;

/// Check that a region looks like a provider region identifier (`us-east-1`)
pub fn validate_region(region: &str) -> Result<(), ProviderError> {
    if region.is_empty() {
        return Err(ProviderError::Region("region cannot be empty".into()));
    }

    let well_formed = region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && region.contains('-')
        && !region.starts_with('-')
        && !region.contains("--")
        && region.ends_with(|c: char| c.is_ascii_digit());

    if !well_formed {
        return Err(ProviderError::Region(format!(
            "'{region}' is not a valid region identifier"
        )));
    }

    Ok(())
}

/// Check an image repository name
///
/// Names are one or more `/`-separated components of lowercase letters and
/// digits, optionally joined by single `.`, `_` or `-` separators.
pub fn validate_repository_name(name: &str) -> Result<(), ProviderError> {
    if name.is_empty() {
        return Err(ProviderError::InvalidName(
            "repository name cannot be empty".into(),
        ));
    }

    if name.len() < 2 || name.len() > 256 {
        return Err(ProviderError::InvalidName(format!(
            "repository name '{name}' must be between 2 and 256 characters"
        )));
    }

    for component in name.split('/') {
        if !is_repository_component(component) {
            return Err(ProviderError::InvalidName(format!(
                "repository name '{name}' must consist of lowercase letters, digits and single '.', '_', '-' or '/' separators"
            )));
        }
    }

    Ok(())
}

fn is_repository_component(component: &str) -> bool {
    let is_sep = |c: char| matches!(c, '.' | '_' | '-');
    let mut prev_sep = true;

    for c in component.chars() {
        if is_sep(c) {
            if prev_sep {
                return false;
            }
            prev_sep = true;
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            prev_sep = false;
        } else {
            return false;
        }
    }

    // Empty components and trailing separators both leave prev_sep set
    !prev_sep
}

/// Check an object storage bucket name
pub fn validate_bucket_name(name: &str) -> Result<(), ProviderError> {
    let invalid = |reason: &str| -> Result<(), ProviderError> {
        Err(ProviderError::InvalidName(format!(
            "bucket name '{name}' {reason}"
        )))
    };

    if name.is_empty() {
        return Err(ProviderError::InvalidName(
            "bucket name cannot be empty".into(),
        ));
    }

    if name.len() < 3 || name.len() > 63 {
        return invalid("must be between 3 and 63 characters");
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return invalid("may only contain lowercase letters, digits, '.' and '-'");
    }

    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if !name.starts_with(alnum) || !name.ends_with(alnum) {
        return invalid("must begin and end with a letter or digit");
    }

    if name.contains("..") {
        return invalid("must not contain adjacent periods");
    }

    if name.parse::<std::net::Ipv4Addr>().is_ok() {
        return invalid("must not be formatted as an IP address");
    }

    if name.starts_with("xn--") || name.starts_with("sthree-") {
        return invalid("uses a reserved prefix");
    }

    if name.ends_with("-s3alias") || name.ends_with("--ol-s3") {
        return invalid("uses a reserved suffix");
    }

    Ok(())
}
