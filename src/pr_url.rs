//! Pull request URL parsing.
//!
//! Decomposes an Azure DevOps pull request URL into the coordinates needed to
//! address the pull request through the REST API. Two hostname shapes are
//! understood:
//!
//! - `https://dev.azure.com/{organization}/{project}/_git/{repository}/pullrequest/{id}`
//! - `https://{organization}.visualstudio.com/{project}/_git/{repository}/pullrequest/{id}`
//!
//! ## Example
//!
//! ```rust
//! use prhandler::pr_url::parse_pr_url;
//!
//! let pr = parse_pr_url("https://dev.azure.com/myorg/myproj/_git/myrepo/pullrequest/123").unwrap();
//! assert_eq!(pr.organization_url, "https://dev.azure.com/myorg");
//! assert_eq!(pr.project, "myproj");
//! assert_eq!(pr.repository, "myrepo");
//! assert_eq!(pr.pull_request_id, 123);
//! ```

use serde::Serialize;
use url::Url;

use crate::error::ParseError;

const DEV_AZURE_HOST: &str = "dev.azure.com";
const VISUALSTUDIO_HOST_SUFFIX: &str = ".visualstudio.com";
const GIT_SEGMENT: &str = "_git";
const PULL_REQUEST_SEGMENT: &str = "pullrequest";

/// Coordinates of a single pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrReference {
    /// Scheme and host, plus the organization segment on `dev.azure.com`.
    pub organization_url: String,
    /// Organization name as used in REST API paths.
    pub organization: String,
    /// Project name.
    pub project: String,
    /// Repository name or id.
    pub repository: String,
    /// Numeric pull request id.
    pub pull_request_id: i32,
}

impl PrReference {
    /// Rebuilds the browser URL of the pull request.
    pub fn web_url(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}/{}",
            self.organization_url,
            urlencoding::encode(&self.project),
            GIT_SEGMENT,
            urlencoding::encode(&self.repository),
            PULL_REQUEST_SEGMENT,
            self.pull_request_id
        )
    }
}

/// Which of the two supported hostname shapes a URL uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostShape {
    /// `dev.azure.com/{organization}/...`
    DevAzure,
    /// `{organization}.visualstudio.com/...`
    VisualStudio,
}

/// Parses a pull request URL into a [`PrReference`].
///
/// Fails without partial results when the URL is malformed, the host is not an
/// Azure DevOps host, the `_git` or `pullrequest` segment (or the segment after
/// it) is missing, or the pull request id is not a positive integer.
pub fn parse_pr_url(pr_url: &str) -> Result<PrReference, ParseError> {
    let parsed = Url::parse(pr_url.trim()).map_err(|e| ParseError::InvalidUrl {
        url: pr_url.to_string(),
        message: e.to_string(),
    })?;

    let host = parsed.host_str().ok_or_else(|| ParseError::InvalidUrl {
        url: pr_url.to_string(),
        message: "URL has no host".to_string(),
    })?;

    let shape = classify_host(host)?;

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();
    let path = parsed.path().to_string();

    let missing = |segment: &'static str| ParseError::MissingSegment {
        segment,
        path: path.clone(),
    };

    let origin = parsed.origin().ascii_serialization();
    let (organization_url, organization, project_index) = match shape {
        HostShape::DevAzure => {
            let raw = segments
                .first()
                .filter(|s| **s != GIT_SEGMENT)
                .ok_or_else(|| missing("organization"))?;
            (format!("{origin}/{raw}"), decode_segment(raw)?, 1)
        }
        HostShape::VisualStudio => {
            let organization = host
                .strip_suffix(VISUALSTUDIO_HOST_SUFFIX)
                .unwrap_or(host)
                .to_string();
            (origin, organization, 0)
        }
    };

    let git_index = segments
        .iter()
        .position(|s| *s == GIT_SEGMENT)
        .ok_or_else(|| missing(GIT_SEGMENT))?;
    let pr_index = segments
        .iter()
        .position(|s| *s == PULL_REQUEST_SEGMENT)
        .ok_or_else(|| missing(PULL_REQUEST_SEGMENT))?;

    if project_index >= git_index {
        return Err(missing("project"));
    }
    let project = decode_segment(segments[project_index])?;

    let repository = segments
        .get(git_index + 1)
        .filter(|s| **s != PULL_REQUEST_SEGMENT)
        .ok_or_else(|| missing("repository"))
        .and_then(|s| decode_segment(s))?;

    let raw_id = segments
        .get(pr_index + 1)
        .ok_or_else(|| missing("pull request id"))?;
    let pull_request_id = parse_pull_request_id(raw_id)?;

    Ok(PrReference {
        organization_url,
        organization,
        project,
        repository,
        pull_request_id,
    })
}

fn classify_host(host: &str) -> Result<HostShape, ParseError> {
    if host == DEV_AZURE_HOST {
        return Ok(HostShape::DevAzure);
    }

    match host.strip_suffix(VISUALSTUDIO_HOST_SUFFIX) {
        Some(org) if !org.is_empty() && !org.contains('.') => Ok(HostShape::VisualStudio),
        _ => Err(ParseError::UnsupportedHost {
            host: host.to_string(),
        }),
    }
}

fn decode_segment(segment: &str) -> Result<String, ParseError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|e| ParseError::InvalidUrl {
            url: segment.to_string(),
            message: e.to_string(),
        })
}

fn parse_pull_request_id(raw: &str) -> Result<i32, ParseError> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ParseError::InvalidPullRequestId {
            value: raw.to_string(),
        }),
    }
}
