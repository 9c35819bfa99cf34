//! Traits for Azure DevOps API operations.
//!
//! These traits abstract the two remote calls a vote needs so the vote flow
//! can be exercised against mock implementations in tests.

use std::time::Duration;

use async_trait::async_trait;
use azure_devops_rust_api::git;
use azure_devops_rust_api::git::models as git_models;
use reqwest::{StatusCode, header::ACCEPT};
use serde::Deserialize;
use tracing::debug;

use super::credential::PatCredential;
use crate::error::RemoteError;
use crate::models::ReviewerVote;

/// Trait for identity lookups.
#[async_trait]
pub trait IdentityOperations: Send + Sync {
    /// Returns the id of the user the credential authenticates as.
    ///
    /// # Arguments
    ///
    /// * `organization_url` - Organization endpoint, e.g. `https://dev.azure.com/org`
    async fn get_authenticated_user_id(&self, organization_url: &str) -> Result<String, RemoteError>;
}

/// Trait for pull request reviewer operations.
#[async_trait]
pub trait ReviewerOperations: Send + Sync {
    /// Adds or updates a reviewer's vote on a pull request.
    ///
    /// Returns the vote acknowledged by the service, if it reported one.
    ///
    /// # Arguments
    ///
    /// * `organization` - Azure DevOps organization name
    /// * `reviewer` - Vote payload
    /// * `repository_id` - Repository name or id
    /// * `pull_request_id` - Pull request id
    /// * `reviewer_id` - Identity id of the reviewer
    /// * `project` - Project name
    async fn create_pull_request_reviewer(
        &self,
        organization: &str,
        reviewer: ReviewerVote,
        repository_id: &str,
        pull_request_id: i32,
        reviewer_id: &str,
        project: &str,
    ) -> Result<Option<i32>, RemoteError>;
}

/// Subset of the location service's connection data document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionData {
    authenticated_user: Option<AuthenticatedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticatedUser {
    id: String,
    provider_display_name: Option<String>,
}

/// Identity lookup through the `_apis/connectionData` endpoint.
///
/// `azure_devops_rust_api` has no location-service client, so this goes
/// through `reqwest` with the same PAT credential.
#[derive(Clone)]
pub struct RealIdentityOperations {
    http: reqwest::Client,
    credential: PatCredential,
}

impl RealIdentityOperations {
    /// Creates a new identity lookup for the given credential.
    pub fn new(credential: PatCredential) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, credential })
    }
}

#[async_trait]
impl IdentityOperations for RealIdentityOperations {
    async fn get_authenticated_user_id(&self, organization_url: &str) -> Result<String, RemoteError> {
        let url = format!(
            "{}/_apis/connectionData",
            organization_url.trim_end_matches('/')
        );
        debug!(%url, "fetching connection data");

        let response = self
            .credential
            .authorize(self.http.get(&url))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        // A rejected PAT is answered with 401, or with 203 and a sign-in page.
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::NON_AUTHORITATIVE_INFORMATION
        {
            return Err(RemoteError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound {
                resource: format!("organization at {organization_url}"),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let data: ConnectionData =
            response
                .json()
                .await
                .map_err(|e| RemoteError::InvalidResponse {
                    message: e.to_string(),
                })?;

        let user = data
            .authenticated_user
            .filter(|user| !user.id.is_empty())
            .ok_or_else(|| RemoteError::InvalidResponse {
                message: "connection data has no authenticated user".to_string(),
            })?;

        debug!(
            user_id = %user.id,
            display_name = user.provider_display_name.as_deref().unwrap_or(""),
            "resolved authenticated user"
        );
        Ok(user.id)
    }
}

/// Real implementation wrapping azure_devops_rust_api::git::Client.
#[derive(Clone)]
pub struct RealGitOperations {
    client: git::Client,
}

impl RealGitOperations {
    /// Creates a new RealGitOperations wrapper.
    pub fn new(client: git::Client) -> Self {
        Self { client }
    }

    /// Builds the SDK git client for a PAT credential.
    pub fn from_credential(credential: &PatCredential) -> Self {
        Self::new(git::ClientBuilder::new(credential.to_sdk_credential()).build())
    }

    /// Builds the SDK git client against a custom service endpoint.
    pub fn with_endpoint(credential: &PatCredential, endpoint: url::Url) -> Self {
        Self::new(
            git::ClientBuilder::new(credential.to_sdk_credential())
                .endpoint(endpoint)
                .build(),
        )
    }
}

/// Converts the fixed vote record into the SDK's reviewer model.
fn reviewer_body(
    reviewer: ReviewerVote,
    reviewer_id: &str,
) -> Result<git_models::IdentityRefWithVote, RemoteError> {
    let invalid = |e: serde_json::Error| RemoteError::Sdk {
        operation: "Building reviewer payload",
        message: e.to_string(),
    };

    let mut payload = serde_json::to_value(reviewer).map_err(invalid)?;
    payload["id"] = reviewer_id.into();
    payload["votedFor"] = serde_json::Value::Array(Vec::new());
    serde_json::from_value(payload).map_err(invalid)
}

#[async_trait]
impl ReviewerOperations for RealGitOperations {
    async fn create_pull_request_reviewer(
        &self,
        organization: &str,
        reviewer: ReviewerVote,
        repository_id: &str,
        pull_request_id: i32,
        reviewer_id: &str,
        project: &str,
    ) -> Result<Option<i32>, RemoteError> {
        let body = reviewer_body(reviewer, reviewer_id)?;

        let acknowledged = self
            .client
            .pull_request_reviewers_client()
            .create_pull_request_reviewer(
                organization,
                body,
                repository_id,
                pull_request_id,
                reviewer_id,
                project,
            )
            .await
            .map_err(|e| RemoteError::Sdk {
                operation: "Submitting vote",
                message: e.to_string(),
            })?;

        acknowledged
            .vote
            .map(i32::try_from)
            .transpose()
            .map_err(|e| RemoteError::InvalidResponse {
                message: format!("vote out of range: {e}"),
            })
    }
}
