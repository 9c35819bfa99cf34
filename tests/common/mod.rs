//! Recording implementations of the API traits for integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use prhandler::api::{IdentityOperations, ReviewerOperations};
use prhandler::error::RemoteError;
use prhandler::models::ReviewerVote;

/// Identity lookup answering with a fixed user, or rejecting the token.
pub struct StaticIdentity(pub Option<&'static str>);

#[async_trait]
impl IdentityOperations for StaticIdentity {
    async fn get_authenticated_user_id(&self, _organization_url: &str) -> Result<String, RemoteError> {
        self.0.map(str::to_string).ok_or(RemoteError::Unauthorized)
    }
}

/// Coordinates of one reviewer write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub organization: String,
    pub project: String,
    pub repository_id: String,
    pub pull_request_id: i32,
    pub reviewer_id: String,
    pub vote: i32,
}

/// Reviewer endpoint acknowledging every write with the vote it was sent.
#[derive(Default)]
pub struct EchoReviewers {
    writes: Mutex<Vec<RecordedWrite>>,
}

impl EchoReviewers {
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewerOperations for EchoReviewers {
    async fn create_pull_request_reviewer(
        &self,
        organization: &str,
        reviewer: ReviewerVote,
        repository_id: &str,
        pull_request_id: i32,
        reviewer_id: &str,
        project: &str,
    ) -> Result<Option<i32>, RemoteError> {
        self.writes.lock().unwrap().push(RecordedWrite {
            organization: organization.to_string(),
            project: project.to_string(),
            repository_id: repository_id.to_string(),
            pull_request_id,
            reviewer_id: reviewer_id.to_string(),
            vote: reviewer.vote.value(),
        });
        Ok(Some(reviewer.vote.value()))
    }
}
