//! Vote submission.
//!
//! A submission parses the pull request URL, resolves the user the token
//! belongs to, and writes that user's vote. Each step runs once. Failures
//! propagate unchanged with no retry and no rollback.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{info, instrument};

use crate::{
    api::{
        AzureDevOpsClient, IdentityOperations, PatCredential, RealGitOperations,
        RealIdentityOperations, ReviewerOperations,
    },
    error::{PrHandlerResult, RemoteError},
    models::{ReviewerRecord, ReviewerVote, VoteAction},
    pr_url::{PrReference, parse_pr_url},
};

/// Submits votes through a pair of identity and reviewer operations.
///
/// # Example
///
/// ```rust,no_run
/// use prhandler::models::VoteAction;
/// use prhandler::pr_url::parse_pr_url;
/// use prhandler::submitter::VoteSubmitter;
/// use secrecy::SecretString;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let submitter = VoteSubmitter::new(SecretString::from("my-pat".to_string()))?;
/// let reference = parse_pr_url("https://dev.azure.com/org/proj/_git/repo/pullrequest/7")?;
/// let record = submitter.submit(reference, VoteAction::Approve).await?;
/// assert_eq!(record.vote, 10);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VoteSubmitter {
    identity: Arc<dyn IdentityOperations>,
    reviewers: Arc<dyn ReviewerOperations>,
}

impl VoteSubmitter {
    /// Creates a submitter talking to Azure DevOps with a personal access token.
    pub fn new(pat: SecretString) -> Result<Self, RemoteError> {
        let credential = PatCredential::new(pat);
        let reviewers = RealGitOperations::from_credential(&credential);
        let identity = RealIdentityOperations::new(credential)?;

        Ok(Self::with_operations(Arc::new(identity), Arc::new(reviewers)))
    }

    /// Creates a submitter over explicit operation implementations.
    pub fn with_operations(
        identity: Arc<dyn IdentityOperations>,
        reviewers: Arc<dyn ReviewerOperations>,
    ) -> Self {
        Self {
            identity,
            reviewers,
        }
    }

    /// Resolves the current user and writes their vote for `action`.
    #[instrument(
        skip(self, reference, action),
        fields(pull_request_id = reference.pull_request_id, action = action.status())
    )]
    pub async fn submit(
        &self,
        reference: PrReference,
        action: VoteAction,
    ) -> PrHandlerResult<ReviewerRecord> {
        let client =
            AzureDevOpsClient::new(reference, self.identity.clone(), self.reviewers.clone());

        let reviewer_id = client.fetch_current_user_id().await?;
        let vote = client
            .submit_vote(&reviewer_id, ReviewerVote::new(action.vote()))
            .await?;

        let reference = client.reference();
        info!(
            repository = %reference.repository,
            project = %reference.project,
            vote,
            "vote submitted"
        );

        Ok(ReviewerRecord {
            pull_request_id: reference.pull_request_id,
            repository: reference.repository.clone(),
            project: reference.project.clone(),
            reviewer_id,
            vote,
            status: action,
        })
    }
}

impl std::fmt::Debug for VoteSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteSubmitter").finish_non_exhaustive()
    }
}

/// Approves the pull request at `pr_url` as the owner of `pat`.
pub async fn approve_pr(pr_url: &str, pat: SecretString) -> PrHandlerResult<ReviewerRecord> {
    submit_vote(pr_url, pat, VoteAction::Approve).await
}

/// Resets the vote of the owner of `pat` on the pull request at `pr_url`.
pub async fn reset_pr_approval(pr_url: &str, pat: SecretString) -> PrHandlerResult<ReviewerRecord> {
    submit_vote(pr_url, pat, VoteAction::Reset).await
}

/// Parses `pr_url` and submits the vote for `action`.
///
/// A URL that does not parse fails before any client is built.
pub async fn submit_vote(
    pr_url: &str,
    pat: SecretString,
    action: VoteAction,
) -> PrHandlerResult<ReviewerRecord> {
    let reference = parse_pr_url(pr_url)?;
    VoteSubmitter::new(pat)?.submit(reference, action).await
}
