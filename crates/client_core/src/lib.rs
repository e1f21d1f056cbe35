//! Client core for the sentiment prediction front-end: input validation, the
//! submission state machine, synthetic progress, and the view projection.

pub mod controller;
pub mod error;
pub mod indicator;
pub mod projector;
pub mod transport;
pub mod validation;

pub use controller::{
    SessionSnapshot, SubmissionController, SubmissionEvent, SubmissionState, SubmitOutcome,
    DEFAULT_TICK_INTERVAL,
};
pub use error::{FailureKind, SubmissionError, ValidationError, GENERIC_FAILURE_MESSAGE};
pub use indicator::{FixedIndicator, RandomIndicator, SyntheticIndicator};
pub use projector::{project, ViewMode, ViewModel};
pub use transport::{HttpPredictionTransport, PredictionTransport};
pub use validation::{validate, SubmissionRequest};
