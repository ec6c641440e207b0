//! Pipeline outcome to change-record state mapping.

use std::convert::Infallible;
use std::str::FromStr;

use serde::Serialize;

/// Final status of the pipeline run being reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success,
    Failure,
    Cancelled,
    /// Any other status string, kept verbatim for the work note.
    Other(String),
}

impl FromStr for PipelineOutcome {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        })
    }
}

impl std::fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

impl PipelineOutcome {
    /// State the change record should move to.
    pub fn target_status(&self) -> ChangeStatus {
        match self {
            Self::Success => ChangeStatus::Review,
            Self::Cancelled => ChangeStatus::Cancelled,
            Self::Failure | Self::Other(_) => ChangeStatus::Authorize,
        }
    }
}

/// Change-record state label as sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeStatus {
    Review,
    Authorize,
    Cancelled,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "Review",
            Self::Authorize => "Authorize",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
