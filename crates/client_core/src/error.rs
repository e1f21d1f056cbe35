use std::time::Duration;

use shared::error::UnknownModel;
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";
pub const TIMEOUT_FAILURE_MESSAGE: &str = "The prediction service did not respond in time";

/// Local input problems. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("comment must not be empty")]
    EmptyComment,
    #[error("unknown model identifier '{0}'")]
    UnknownModel(String),
}

impl From<UnknownModel> for ValidationError {
    fn from(value: UnknownModel) -> Self {
        Self::UnknownModel(value.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Application,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("prediction service unreachable: {0}")]
    Transport(String),
    #[error("malformed prediction response: {0}")]
    MalformedResponse(String),
    #[error("prediction service returned status {status}")]
    Application {
        status: u16,
        message: Option<String>,
    },
    #[error("prediction request timed out after {0:?}")]
    Timeout(Duration),
}

impl SubmissionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SubmissionError::Transport(_) | SubmissionError::MalformedResponse(_) => {
                FailureKind::Transport
            }
            SubmissionError::Application { .. } => FailureKind::Application,
            SubmissionError::Timeout(_) => FailureKind::Timeout,
        }
    }

    /// Text shown to the user once a submission settles as failed.
    pub fn user_message(&self) -> String {
        match self {
            SubmissionError::Application {
                message: Some(message),
                ..
            } => message.clone(),
            SubmissionError::Timeout(_) => TIMEOUT_FAILURE_MESSAGE.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
