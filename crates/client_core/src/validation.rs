use shared::{domain::ModelId, protocol::PredictRequest};

use crate::error::ValidationError;

/// A validated submission. Built at submit time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    text: String,
    model_id: ModelId,
}

impl SubmissionRequest {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn to_wire(&self) -> PredictRequest {
        PredictRequest {
            comment: self.text.clone(),
            model_name: self.model_id,
        }
    }
}

pub fn is_submittable(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Checks the comment before the model so a blank form reports the missing comment.
/// The text is kept as typed; trimming only decides emptiness.
pub fn validate(text: &str, model_id: &str) -> Result<SubmissionRequest, ValidationError> {
    if !is_submittable(text) {
        return Err(ValidationError::EmptyComment);
    }
    let model_id = model_id.parse::<ModelId>()?;
    Ok(SubmissionRequest {
        text: text.to_string(),
        model_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_comment_and_known_model() {
        let request = validate("bagus sekali", "svm").expect("valid");
        assert_eq!(request.text(), "bagus sekali");
        assert_eq!(request.model_id(), ModelId::Svm);
    }

    #[test]
    fn whitespace_only_comment_is_empty() {
        for text in ["", "   ", "\n\t  \r\n"] {
            assert_eq!(validate(text, "knn"), Err(ValidationError::EmptyComment));
        }
    }

    #[test]
    fn empty_comment_reported_before_unknown_model() {
        assert_eq!(validate(" ", "gpt"), Err(ValidationError::EmptyComment));
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert_eq!(
            validate("jelek", "random_forest"),
            Err(ValidationError::UnknownModel("random_forest".to_string()))
        );
    }

    #[test]
    fn comment_is_sent_as_typed() {
        let request = validate("  jelek  ", "naive_bayes").expect("valid");
        let wire = request.to_wire();
        assert_eq!(wire.comment, "  jelek  ");
        assert_eq!(wire.model_name, ModelId::NaiveBayes);
    }
}
