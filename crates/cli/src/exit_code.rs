//! Exit code definitions for the vpro tools
//!
//! Scripts rely on these values; changing one is a breaking change.

/// Exit codes shared by `vpro-ecr` and `vpro-s3`.
///
/// These codes follow a consistent convention to allow scripts and automation
/// to handle different error scenarios appropriately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Resource created
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid name or region, bad flag, bad config file
    UsageError = 2,

    /// Service unreachable: DNS failure, connection reset, timeout
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// A resource with the requested name already exists
    Conflict = 6,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            6 => Some(Self::Conflict),
            _ => None,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Resource created",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments, name, region or configuration",
            Self::NetworkError => "Network error",
            Self::AuthError => "Authentication or permission failure",
            Self::Conflict => "Resource name already taken",
        }
    }
}

impl From<&vpro_core::Error> for ExitCode {
    fn from(err: &vpro_core::Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
