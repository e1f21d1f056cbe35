use serde::{Deserialize, Serialize};

use crate::domain::{ModelId, SentimentLabel};

pub const PREDICT_PATH: &str = "/api/predict/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub comment: String,
    pub model_name: ModelId,
}

/// Success body. The service sends no confidence score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub sentiment: SentimentLabel,
}
