use shared::domain::{ModelId, SentimentLabel};

use crate::{
    controller::{SessionSnapshot, SubmissionState},
    error::ValidationError,
    validation::is_submittable,
};

pub const SUBMIT_CAPTION: &str = "Analyze";
pub const SUBMIT_CAPTION_BUSY: &str = "Analyzing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Idle,
    Loading,
    Result,
    Error,
}

/// What a front-end shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub mode: ViewMode,
    pub sentiment: Option<SentimentLabel>,
    pub label: Option<String>,
    pub message: Option<String>,
    pub validation_message: Option<String>,
    /// Progress while loading, synthetic confidence on a result, 0 otherwise.
    pub meter: u8,
    pub model: Option<ModelId>,
    pub model_display: Option<String>,
    pub submit_enabled: bool,
    pub submit_caption: String,
    pub char_count: usize,
}

pub fn validation_message(err: &ValidationError) -> String {
    match err {
        ValidationError::EmptyComment => "Comment must not be empty.".to_string(),
        ValidationError::UnknownModel(model) => format!("Unknown model '{model}'."),
    }
}

pub fn project(snapshot: &SessionSnapshot) -> ViewModel {
    let busy = matches!(
        snapshot.state,
        SubmissionState::InFlight { .. } | SubmissionState::Validating
    );
    let model = snapshot
        .last_request
        .as_ref()
        .map(|request| request.model_id());

    let (mode, sentiment, message, meter) = match &snapshot.state {
        SubmissionState::Idle | SubmissionState::Validating => (ViewMode::Idle, None, None, 0),
        SubmissionState::InFlight { progress, .. } => (ViewMode::Loading, None, None, *progress),
        SubmissionState::Succeeded {
            sentiment,
            confidence,
        } => (ViewMode::Result, Some(*sentiment), None, *confidence),
        SubmissionState::Failed { message } => (ViewMode::Error, None, Some(message.clone()), 0),
    };

    ViewModel {
        mode,
        sentiment,
        label: sentiment.map(|sentiment| sentiment.display_name().to_string()),
        message,
        validation_message: snapshot.validation_error.as_ref().map(validation_message),
        meter: meter.min(100),
        model,
        model_display: model.map(|model| model.display_name().to_string()),
        submit_enabled: !busy && is_submittable(&snapshot.draft_text),
        submit_caption: if busy {
            SUBMIT_CAPTION_BUSY
        } else {
            SUBMIT_CAPTION
        }
        .to_string(),
        char_count: snapshot.draft_text.chars().count(),
    }
}

#[cfg(test)]
#[path = "tests/projector_tests.rs"]
mod tests;
