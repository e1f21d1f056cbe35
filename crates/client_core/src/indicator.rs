//! Synthetic progress and confidence values shown while a prediction runs.
//!
//! Nothing here reflects real backend work or real model confidence. The service
//! reports neither, so these numbers only signal liveness and fill the result meter.

use rand::Rng;
use shared::domain::SentimentLabel;

/// Progress stays strictly below this until the submission settles.
pub const PROGRESS_CEILING: u8 = 95;
pub const CONFIDENCE_FLOOR: u8 = 85;
pub const CONFIDENCE_CEILING: u8 = 100;

pub trait SyntheticIndicator: Send + Sync {
    /// Next progress value. Must not decrease and must stay below [`PROGRESS_CEILING`].
    fn next_progress(&self, current: u8) -> u8;

    /// Confidence shown next to a result, within the display range.
    fn display_confidence(&self, label: SentimentLabel) -> u8;
}

pub fn clamp_progress(current: u8, proposed: u8) -> u8 {
    proposed.max(current).min(PROGRESS_CEILING - 1)
}

pub fn clamp_confidence(proposed: u8) -> u8 {
    proposed.clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

pub struct RandomIndicator {
    max_step: u8,
}

impl RandomIndicator {
    pub fn new() -> Self {
        Self { max_step: 8 }
    }
}

impl Default for RandomIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticIndicator for RandomIndicator {
    fn next_progress(&self, current: u8) -> u8 {
        let step = rand::rng().random_range(1..=self.max_step);
        clamp_progress(current, current.saturating_add(step))
    }

    fn display_confidence(&self, _label: SentimentLabel) -> u8 {
        rand::rng().random_range(CONFIDENCE_FLOOR..=CONFIDENCE_CEILING)
    }
}

/// Deterministic indicator. A zero step turns the progress simulation off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIndicator {
    pub step: u8,
    pub confidence: u8,
}

impl FixedIndicator {
    pub fn disabled() -> Self {
        Self {
            step: 0,
            confidence: CONFIDENCE_CEILING,
        }
    }
}

impl SyntheticIndicator for FixedIndicator {
    fn next_progress(&self, current: u8) -> u8 {
        clamp_progress(current, current.saturating_add(self.step))
    }

    fn display_confidence(&self, _label: SentimentLabel) -> u8 {
        clamp_confidence(self.confidence)
    }
}
