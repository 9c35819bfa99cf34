//! # prhandler
//!
//! Approve or reset your vote on an Azure DevOps pull request.
//!
//! The library parses a pull request URL, resolves the user a Personal Access
//! Token belongs to, and writes that user's reviewer vote:
//!
//! - [`pr_url`]: URL decomposition into organization, project, repository and id
//! - [`submitter`]: the vote flow (`approve_pr`, `reset_pr_approval`)
//! - [`api`]: Azure DevOps access behind mockable traits
//! - [`config`] and [`logging`]: command line, environment and `.env` settings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prhandler::submitter::approve_pr;
//! use secrecy::SecretString;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = approve_pr(
//!     "https://dev.azure.com/myorg/myproj/_git/myrepo/pullrequest/123",
//!     SecretString::from("my-pat".to_string()),
//! )
//! .await?;
//! println!("PR #{} acknowledged vote {}", record.pull_request_id, record.vote);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsed_property;
pub mod pr_url;
pub mod submitter;

// Re-export commonly used types for convenience
pub use api::AzureDevOpsClient;
pub use config::Config;
pub use error::{PrHandlerError, PrHandlerResult};
pub use models::{Args, ReviewerRecord, VoteAction};
pub use submitter::{VoteSubmitter, approve_pr, reset_pr_approval, submit_vote};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
