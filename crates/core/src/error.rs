//! Error types for vpro-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for vpro-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by, or on behalf of, the cloud provider
///
/// Covers everything that can go wrong around the single provisioning call:
/// bad credentials, name collisions, bad names, unknown or unreachable regions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Credentials missing, invalid, expired, or lacking permission
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A resource with this name already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The resource name violates the provider's naming rules
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// A request parameter other than the name was rejected (tags, settings)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The region is not a valid region identifier or is rejected by the service
    #[error("Invalid region: {0}")]
    Region(String),

    /// The service could not be reached (DNS, connect, timeout, bad response)
    #[error("Network error: {0}")]
    Network(String),

    /// Any other service-side error
    #[error("{}", service_message(.code, .message))]
    Service {
        code: Option<String>,
        message: String,
    },
}

fn service_message(code: &Option<String>, message: &str) -> String {
    match code {
        Some(code) => format!("{code}: {message}"),
        None => message.to_string(),
    }
}

impl ProviderError {
    /// Classify a service error by its error code
    ///
    /// Codes come from both the ECR (JSON protocol, `*Exception` suffix) and
    /// S3 (REST-XML protocol) error shapes.
    pub fn from_service_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            "RepositoryAlreadyExistsException"
            | "BucketAlreadyExists"
            | "BucketAlreadyOwnedByYou"
            | "OperationAborted" => Self::Conflict(message),

            "AccessDenied"
            | "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidClientTokenId"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"
            | "ExpiredTokenException"
            | "MissingAuthenticationToken" => Self::Auth(message),

            "InvalidBucketName" => Self::InvalidName(message),

            "InvalidParameterException"
            | "InvalidTagParameterException"
            | "TooManyTagsException" => Self::InvalidParameter(message),

            "IllegalLocationConstraintException"
            | "InvalidLocationConstraint"
            | "AuthorizationHeaderMalformed"
            | "PermanentRedirect" => Self::Region(message),

            _ => Self::Service {
                code: Some(code.to_string()),
                message,
            },
        }
    }
}

/// Error types for vpro-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Error reported by the cloud provider
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::TomlParse(_) => 2, // UsageError
            Error::Provider(err) => match err {
                ProviderError::InvalidName(_)
                | ProviderError::InvalidParameter(_)
                | ProviderError::Region(_) => 2, // UsageError
                ProviderError::Network(_) => 3,                                // NetworkError
                ProviderError::Auth(_) => 4,                                   // AuthError
                ProviderError::Conflict(_) => 6,                               // Conflict
                ProviderError::Service { .. } => 1,
            },
            _ => 1, // GeneralError
        }
    }
}
