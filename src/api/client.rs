//! Azure DevOps API client scoped to one pull request.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::traits::{IdentityOperations, ReviewerOperations};
use crate::error::RemoteError;
use crate::models::ReviewerVote;
use crate::pr_url::PrReference;

/// Azure DevOps API client for voting on a single pull request.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use prhandler::api::{AzureDevOpsClient, PatCredential, RealGitOperations, RealIdentityOperations};
/// use prhandler::models::{ReviewerVote, Vote};
/// use prhandler::pr_url::parse_pr_url;
/// use secrecy::SecretString;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pr = parse_pr_url("https://dev.azure.com/org/proj/_git/repo/pullrequest/1")?;
/// let credential = PatCredential::new(SecretString::from("my-pat".to_string()));
/// let client = AzureDevOpsClient::new(
///     pr,
///     Arc::new(RealIdentityOperations::new(credential.clone())?),
///     Arc::new(RealGitOperations::from_credential(&credential)),
/// );
///
/// let me = client.fetch_current_user_id().await?;
/// let vote = client.submit_vote(&me, ReviewerVote::new(Vote::Approved)).await?;
/// println!("acknowledged vote: {vote}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AzureDevOpsClient {
    reference: PrReference,
    identity: Arc<dyn IdentityOperations>,
    reviewers: Arc<dyn ReviewerOperations>,
}

impl AzureDevOpsClient {
    /// Creates a client for `reference` over the given operations.
    ///
    /// Nothing is sent until a request is made.
    pub fn new(
        reference: PrReference,
        identity: Arc<dyn IdentityOperations>,
        reviewers: Arc<dyn ReviewerOperations>,
    ) -> Self {
        Self {
            reference,
            identity,
            reviewers,
        }
    }

    /// Returns the pull request this client addresses.
    pub fn reference(&self) -> &PrReference {
        &self.reference
    }

    /// Resolves the id of the authenticated user.
    #[instrument(skip(self), level = "debug", fields(organization_url = %self.reference.organization_url))]
    pub async fn fetch_current_user_id(&self) -> Result<String, RemoteError> {
        self.identity
            .get_authenticated_user_id(&self.reference.organization_url)
            .await
    }

    /// Writes `reviewer_id`'s vote on the pull request.
    ///
    /// Returns the vote acknowledged by the service, or the requested vote
    /// when the response does not carry one.
    #[instrument(
        skip(self, vote),
        level = "debug",
        fields(
            organization = %self.reference.organization,
            project = %self.reference.project,
            repository = %self.reference.repository,
            pull_request_id = self.reference.pull_request_id,
            vote = vote.vote.value(),
        )
    )]
    pub async fn submit_vote(&self, reviewer_id: &str, vote: ReviewerVote) -> Result<i32, RemoteError> {
        let acknowledged = self
            .reviewers
            .create_pull_request_reviewer(
                &self.reference.organization,
                vote,
                &self.reference.repository,
                self.reference.pull_request_id,
                reviewer_id,
                &self.reference.project,
            )
            .await?;

        if acknowledged.is_none() {
            debug!("service response carried no vote, reporting the requested one");
        }
        Ok(acknowledged.unwrap_or_else(|| vote.vote.value()))
    }
}

impl std::fmt::Debug for AzureDevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureDevOpsClient")
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}
