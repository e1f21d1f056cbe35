use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model identifier '{0}'")]
pub struct UnknownModel(pub String);

/// Failure body returned by the prediction service alongside a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// The service message, if it carried a non-blank one.
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}
