//! Unified error handling for prhandler.
//!
//! Every failure the tool can hit falls into one of four categories, each a
//! `thiserror` enum wrapped by [`PrHandlerError`]:
//!
//! - [`UsageError`]: conflicting or missing flags, missing token
//! - [`ParseError`]: a pull request URL that cannot be decomposed
//! - [`RemoteError`]: authentication, permission, lookup or network failures
//! - [`ConfigError`]: malformed logging or output settings
//!
//! All of them are fatal and map to exit code 1.
//!
//! ## Example
//!
//! ```rust
//! use prhandler::error::{PrHandlerError, UsageError};
//!
//! let err: PrHandlerError = UsageError::ConflictingActions.into();
//! assert_eq!(err.exit_code().code(), 1);
//! ```

use thiserror::Error;

/// Location where users create a personal access token.
pub const TOKEN_HELP: &str = "Get yours from https://dev.azure.com/<organization>/_usersSettings/tokens (User settings > Personal access tokens)";

/// The main error type for prhandler.
#[derive(Error, Debug)]
pub enum PrHandlerError {
    /// The command line was used incorrectly.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The pull request URL could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The Azure DevOps service rejected or failed a request.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A configuration value was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PrHandlerError {
    /// Exit code the process should terminate with for this error.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::Failure
    }

    /// Optional follow-up line printed after the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PrHandlerError::Usage(UsageError::MissingToken) => Some(TOKEN_HELP),
            _ => None,
        }
    }
}

/// Command-line usage errors. Detected before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// Both or neither of `--approve` / `--reset` were given.
    #[error("You must specify either --approve or --reset (but not both)")]
    ConflictingActions,

    /// No token argument and no `ADO_PAT` variable.
    #[error("PAT is required. Set ADO_PAT environment variable or provide it as argument.")]
    MissingToken,

    /// Argument parsing failed.
    #[error("{0}")]
    InvalidArguments(String),
}

/// Errors raised while decomposing a pull request URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not an absolute URL.
    #[error("Invalid pull request URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Reason reported by the URL parser.
        message: String,
    },

    /// The host is neither `dev.azure.com` nor `{org}.visualstudio.com`.
    #[error("Unsupported host '{host}': expected dev.azure.com or <organization>.visualstudio.com")]
    UnsupportedHost {
        /// The rejected host.
        host: String,
    },

    /// A required path segment is absent.
    #[error("'{segment}' not found in pull request URL path '{path}'")]
    MissingSegment {
        /// Name of the missing segment.
        segment: &'static str,
        /// The URL path that was searched.
        path: String,
    },

    /// The segment after `pullrequest` is not a positive integer.
    #[error("Invalid pull request id '{value}': expected a positive integer")]
    InvalidPullRequestId {
        /// The rejected segment.
        value: String,
    },
}

/// Errors from the Azure DevOps service or the transport beneath it.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The token was rejected (401, or a 203 sign-in redirect).
    #[error("Unauthorized: invalid or expired Personal Access Token")]
    Unauthorized,

    /// The requested resource was not found (404).
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource.
        resource: String,
    },

    /// The service answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The Azure DevOps SDK reported a failure.
    #[error("{operation} failed: {message}")]
    Sdk {
        /// What was being attempted.
        operation: &'static str,
        /// Message reported by the SDK.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Failed to parse API response: {message}")]
    InvalidResponse {
        /// Description of the parse failure.
        message: String,
    },
}

/// Errors from resolving configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A value was provided but could not be interpreted.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Name of the setting.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// The vote was submitted.
    Success = 0,

    /// Usage, parse, authentication or remote failure.
    Failure = 1,
}

impl ExitCode {
    /// Returns the numeric exit code value.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

/// Type alias for Results using PrHandlerError.
pub type PrHandlerResult<T> = std::result::Result<T, PrHandlerError>;
