//! Rendering of a submitted vote.

use serde::Serialize;

use crate::{
    models::{OutputFormat, ReviewerRecord},
    pr_url::PrReference,
};

/// JSON document printed with `--output json`.
#[derive(Debug, Serialize)]
struct VoteReport<'a> {
    #[serde(flatten)]
    record: &'a ReviewerRecord,
    url: String,
}

/// Renders the result of a vote submission in the requested format.
///
/// Text output is the confirmation line followed by the repository and
/// project; JSON output is the reviewer record plus the pull request URL.
pub fn render(
    record: &ReviewerRecord,
    reference: &PrReference,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(record)),
        OutputFormat::Json => serde_json::to_string_pretty(&VoteReport {
            record,
            url: reference.web_url(),
        }),
    }
}

fn render_text(record: &ReviewerRecord) -> String {
    format!(
        "✓ PR #{} {} successfully!\n  Repository: {}\n  Project: {}",
        record.pull_request_id,
        record.status.past_tense(),
        record.repository,
        record.project
    )
}
