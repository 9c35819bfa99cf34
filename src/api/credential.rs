//! PAT-based credential for Azure DevOps.
//!
//! Azure DevOps accepts a Personal Access Token as the password of HTTP Basic
//! authentication with an empty user name. This module hands the token to the
//! `azure_devops_rust_api` SDK and to plain `reqwest` requests in that form.

use azure_devops_rust_api::Credential;
use secrecy::{ExposeSecret, SecretString};

/// PAT-based credential for Azure DevOps authentication.
///
/// The PAT is stored as a `SecretString` and only exposed when a request is
/// authorized.
///
/// # Example
///
/// ```rust
/// use prhandler::api::PatCredential;
/// use secrecy::SecretString;
///
/// let credential = PatCredential::new(SecretString::from("your-pat-token".to_string()));
/// assert!(format!("{credential:?}").contains("[REDACTED]"));
/// ```
#[derive(Clone)]
pub struct PatCredential {
    pat: SecretString,
}

impl PatCredential {
    /// Creates a new PAT credential from a SecretString.
    pub fn new(pat: SecretString) -> Self {
        Self { pat }
    }

    /// Credential for the SDK clients.
    pub fn to_sdk_credential(&self) -> Credential {
        Credential::from_pat(self.pat.expose_secret().to_string())
    }

    /// Adds `Authorization: Basic base64(":" + pat)` to a request.
    pub fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth("", Some(self.pat.expose_secret()))
    }
}

impl std::fmt::Debug for PatCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatCredential")
            .field("pat", &"[REDACTED]")
            .finish()
    }
}
