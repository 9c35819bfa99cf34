use std::convert::Infallible;
use std::path::PathBuf;

use clap::Parser;
use secrecy::SecretString;
use serde::Serialize;
use thiserror::Error;

use crate::error::UsageError;

/// Command-line arguments.
#[derive(Parser, Clone, Debug)]
#[command(
    name = "prhandler",
    version,
    about = "Azure DevOps Pull Request CLI tool.",
    long_about = "Azure DevOps Pull Request CLI tool.\n\n\
                  Approve or reset your vote on a Pull Request.",
    after_help = "Examples:\n  \
                  prhandler --approve <url>\n  \
                  prhandler --reset <url>\n  \
                  prhandler --approve <url> <pat>"
)]
pub struct Args {
    /// Approve the Pull Request
    #[arg(long, help_heading = "Action")]
    pub approve: bool,

    /// Reset your vote on the Pull Request
    #[arg(long, help_heading = "Action")]
    pub reset: bool,

    /// Azure DevOps Pull Request URL (e.g., https://dev.azure.com/org/project/_git/repo/pullrequest/123)
    pub pr_url: String,

    /// Personal Access Token (optional, can use ADO_PAT env var)
    #[arg(value_parser = parse_secret)]
    pub pat: Option<SecretString>,

    /// Output format [default: text]
    #[arg(long, value_enum, help_heading = "Output Options")]
    pub output: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error); logging is off unless set
    #[arg(long, help_heading = "Logging")]
    pub log_level: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, help_heading = "Logging")]
    pub log_file: Option<PathBuf>,

    /// Log format (text, json)
    #[arg(long, help_heading = "Logging")]
    pub log_format: Option<String>,
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::from(value.to_string()))
}

impl Args {
    /// Returns the single action selected by `--approve` / `--reset`.
    ///
    /// Fails when both or neither flag is set.
    pub fn action(&self) -> Result<VoteAction, UsageError> {
        match (self.approve, self.reset) {
            (true, false) => Ok(VoteAction::Approve),
            (false, true) => Ok(VoteAction::Reset),
            _ => Err(UsageError::ConflictingActions),
        }
    }
}

/// Output format for the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable confirmation lines.
    #[default]
    Text,
    /// The reviewer record as a JSON object.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Reviewer disposition on a pull request, as coded by Azure DevOps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub enum Vote {
    Approved,
    ApprovedWithSuggestions,
    NoVote,
    WaitingForAuthor,
    Rejected,
}

impl Vote {
    /// Integer code sent to and returned by the service.
    pub fn value(self) -> i32 {
        match self {
            Vote::Approved => 10,
            Vote::ApprovedWithSuggestions => 5,
            Vote::NoVote => 0,
            Vote::WaitingForAuthor => -5,
            Vote::Rejected => -10,
        }
    }

    /// Human-readable name of the vote.
    pub fn description(self) -> &'static str {
        match self {
            Vote::Approved => "approved",
            Vote::ApprovedWithSuggestions => "approved with suggestions",
            Vote::NoVote => "no vote",
            Vote::WaitingForAuthor => "waiting for author",
            Vote::Rejected => "rejected",
        }
    }
}

impl From<Vote> for i32 {
    fn from(vote: Vote) -> Self {
        vote.value()
    }
}

/// An integer that is not one of the five Azure DevOps vote codes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid vote value {0}: expected one of 10, 5, 0, -5, -10")]
pub struct InvalidVote(pub i32);

impl TryFrom<i32> for Vote {
    type Error = InvalidVote;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Vote::Approved),
            5 => Ok(Vote::ApprovedWithSuggestions),
            0 => Ok(Vote::NoVote),
            -5 => Ok(Vote::WaitingForAuthor),
            -10 => Ok(Vote::Rejected),
            other => Err(InvalidVote(other)),
        }
    }
}

/// Body of a reviewer-vote write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewerVote {
    pub vote: Vote,
}

impl ReviewerVote {
    pub fn new(vote: Vote) -> Self {
        Self { vote }
    }
}

impl TryFrom<i32> for ReviewerVote {
    type Error = InvalidVote;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Vote::try_from(value).map(Self::new)
    }
}

/// What the user asked the tool to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VoteAction {
    /// Cast an approving vote.
    #[serde(rename = "approved")]
    Approve,
    /// Clear the caller's vote.
    #[serde(rename = "reset")]
    Reset,
}

impl VoteAction {
    /// Vote value written for this action.
    pub fn vote(self) -> Vote {
        match self {
            VoteAction::Approve => Vote::Approved,
            VoteAction::Reset => Vote::NoVote,
        }
    }

    /// Status recorded in the reviewer record.
    pub fn status(self) -> &'static str {
        match self {
            VoteAction::Approve => "approved",
            VoteAction::Reset => "reset",
        }
    }

    /// Phrase used in the confirmation line.
    pub fn past_tense(self) -> &'static str {
        match self {
            VoteAction::Approve => "approved",
            VoteAction::Reset => "vote reset",
        }
    }
}

/// Outcome of a vote submission, as acknowledged by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerRecord {
    pub pull_request_id: i32,
    pub repository: String,
    pub project: String,
    pub reviewer_id: String,
    /// Vote value returned by the service, which may differ from the one requested.
    pub vote: i32,
    pub status: VoteAction,
}

impl ReviewerRecord {
    /// The acknowledged vote, if it is one of the known codes.
    pub fn acknowledged_vote(&self) -> Option<Vote> {
        Vote::try_from(self.vote).ok()
    }
}
