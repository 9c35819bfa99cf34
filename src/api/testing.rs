//! In-memory implementations of the API traits for tests.
//!
//! They record every call and answer from fixed behaviour, so the vote flow
//! can be exercised without network access.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::traits::{IdentityOperations, ReviewerOperations};
use crate::error::RemoteError;
use crate::models::ReviewerVote;

/// Identity lookup answering with a fixed user id or an authorization failure.
pub struct MockIdentity {
    user_id: Option<String>,
    calls: AtomicUsize,
}

impl MockIdentity {
    /// Resolves every lookup to `user_id`.
    pub fn returning(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Rejects every lookup with [`RemoteError::Unauthorized`].
    pub fn unauthorized() -> Self {
        Self {
            user_id: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityOperations for MockIdentity {
    async fn get_authenticated_user_id(&self, _organization_url: &str) -> Result<String, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.user_id.clone().ok_or(RemoteError::Unauthorized)
    }
}

/// One recorded reviewer write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerCall {
    pub organization: String,
    pub reviewer: ReviewerVote,
    pub repository_id: String,
    pub pull_request_id: i32,
    pub reviewer_id: String,
    pub project: String,
}

#[derive(Debug, Clone)]
enum ReviewerBehaviour {
    Echo,
    Acknowledge(Option<i32>),
    Reject { status: u16, message: String },
}

/// Reviewer endpoint that records writes and answers from fixed behaviour.
pub struct MockReviewers {
    behaviour: ReviewerBehaviour,
    calls: Mutex<Vec<ReviewerCall>>,
}

impl MockReviewers {
    fn with_behaviour(behaviour: ReviewerBehaviour) -> Self {
        Self {
            behaviour,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Acknowledges every write with the vote that was sent.
    pub fn accepting() -> Self {
        Self::with_behaviour(ReviewerBehaviour::Echo)
    }

    /// Acknowledges every write with a fixed vote value.
    pub fn acknowledging(vote: Option<i32>) -> Self {
        Self::with_behaviour(ReviewerBehaviour::Acknowledge(vote))
    }

    /// Fails every write with [`RemoteError::RequestFailed`].
    pub fn rejecting(status: u16, message: impl Into<String>) -> Self {
        Self::with_behaviour(ReviewerBehaviour::Reject {
            status,
            message: message.into(),
        })
    }

    /// Writes recorded so far.
    pub fn calls(&self) -> Vec<ReviewerCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReviewerOperations for MockReviewers {
    async fn create_pull_request_reviewer(
        &self,
        organization: &str,
        reviewer: ReviewerVote,
        repository_id: &str,
        pull_request_id: i32,
        reviewer_id: &str,
        project: &str,
    ) -> Result<Option<i32>, RemoteError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ReviewerCall {
                organization: organization.to_string(),
                reviewer,
                repository_id: repository_id.to_string(),
                pull_request_id,
                reviewer_id: reviewer_id.to_string(),
                project: project.to_string(),
            });
        }

        match &self.behaviour {
            ReviewerBehaviour::Echo => Ok(Some(reviewer.vote.value())),
            ReviewerBehaviour::Acknowledge(vote) => Ok(*vote),
            ReviewerBehaviour::Reject { status, message } => Err(RemoteError::RequestFailed {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
