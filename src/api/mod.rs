//! Azure DevOps API access.
//!
//! Two remote calls are needed to vote on a pull request:
//!
//! - a connection data lookup resolving the user the PAT belongs to
//! - a reviewer write carrying that user's vote
//!
//! Both sit behind traits ([`IdentityOperations`], [`ReviewerOperations`])
//! so [`AzureDevOpsClient`] can run against the real service or recording
//! mocks in tests.

mod client;
mod credential;
#[cfg(test)]
pub(crate) mod testing;
mod traits;

pub use client::AzureDevOpsClient;
pub use credential::PatCredential;
pub use traits::{
    IdentityOperations, RealGitOperations, RealIdentityOperations, ReviewerOperations,
};
