use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "decision-tree")]
    DecisionTree,
    #[serde(rename = "knn")]
    Knn,
    #[serde(rename = "naive_bayes")]
    NaiveBayes,
    #[serde(rename = "svm")]
    Svm,
}

impl ModelId {
    /// Selector order; the first entry is the initial selection.
    pub const ALL: [ModelId; 4] = [
        ModelId::DecisionTree,
        ModelId::Knn,
        ModelId::NaiveBayes,
        ModelId::Svm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::DecisionTree => "decision-tree",
            ModelId::Knn => "knn",
            ModelId::NaiveBayes => "naive_bayes",
            ModelId::Svm => "svm",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ModelId::DecisionTree => "Decision Tree",
            ModelId::Knn => "K-Nearest Neighbors",
            ModelId::NaiveBayes => "Naive Bayes",
            ModelId::Svm => "Support Vector Machine",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = UnknownModel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        ModelId::ALL
            .into_iter()
            .find(|model| model.as_str() == raw)
            .ok_or_else(|| UnknownModel(raw.to_string()))
    }
}

/// Two-class output of every model; there is no neutral class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    pub fn display_name(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
