use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use shared::domain::{ModelId, SentimentLabel};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, error, info, warn};

use crate::{
    error::{SubmissionError, ValidationError},
    indicator::{clamp_confidence, clamp_progress, SyntheticIndicator},
    transport::PredictionTransport,
    validation::{validate, SubmissionRequest},
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Only held inside the controller lock; resolves before anyone can observe it.
    Validating,
    InFlight {
        progress: u8,
        started_at: DateTime<Utc>,
    },
    Succeeded {
        sentiment: SentimentLabel,
        confidence: u8,
    },
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. }
        )
    }

    fn accepts_submit(&self) -> bool {
        !matches!(
            self,
            SubmissionState::InFlight { .. } | SubmissionState::Validating
        )
    }
}

/// Everything the projector needs, copied out of the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SubmissionState,
    pub draft_text: String,
    pub draft_model: ModelId,
    pub validation_error: Option<ValidationError>,
    pub last_request: Option<SubmissionRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionEvent {
    StateChanged(SubmissionState),
    ValidationFailed(ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; nothing changed.
    Ignored,
    Rejected(ValidationError),
    Settled(SubmissionState),
}

struct ControllerState {
    session: SessionSnapshot,
    generation: u64,
    progress_task: Option<JoinHandle<()>>,
}

pub struct SubmissionController {
    transport: Arc<dyn PredictionTransport>,
    indicator: Arc<dyn SyntheticIndicator>,
    tick_interval: Duration,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<SubmissionEvent>,
}

impl SubmissionController {
    pub fn new(
        transport: Arc<dyn PredictionTransport>,
        indicator: Arc<dyn SyntheticIndicator>,
    ) -> Arc<Self> {
        Self::new_with_tick_interval(transport, indicator, DEFAULT_TICK_INTERVAL)
    }

    pub fn new_with_tick_interval(
        transport: Arc<dyn PredictionTransport>,
        indicator: Arc<dyn SyntheticIndicator>,
        tick_interval: Duration,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(1024);
        Arc::new(Self {
            transport,
            indicator,
            tick_interval: tick_interval.max(MIN_TICK_INTERVAL),
            inner: Mutex::new(ControllerState {
                session: SessionSnapshot::default(),
                generation: 0,
                progress_task: None,
            }),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.session.state.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().await.session.clone()
    }

    /// Records the form input without touching the submission state.
    pub async fn set_draft(&self, text: impl Into<String>, model: ModelId) {
        let mut inner = self.inner.lock().await;
        inner.session.draft_text = text.into();
        inner.session.draft_model = model;
    }

    /// Runs one request/response cycle and returns once it has settled.
    ///
    /// A call made while another submission is in flight returns
    /// [`SubmitOutcome::Ignored`] without side effects. The network call and the
    /// terminal transition run on a spawned task, so dropping the returned future
    /// does not leave the state stuck in flight.
    pub async fn submit(self: &Arc<Self>, text: &str, model_id: &str) -> SubmitOutcome {
        let (request, generation) = {
            let mut inner = self.inner.lock().await;
            if !inner.session.state.accepts_submit() {
                debug!(
                    generation = inner.generation,
                    "submit ignored while a prediction is in flight"
                );
                return SubmitOutcome::Ignored;
            }

            inner.session.draft_text = text.to_string();
            if let Ok(model) = model_id.parse::<ModelId>() {
                inner.session.draft_model = model;
            }
            inner.session.state = SubmissionState::Validating;

            let request = match validate(text, model_id) {
                Ok(request) => request,
                Err(err) => {
                    inner.session.state = SubmissionState::Idle;
                    inner.session.validation_error = Some(err.clone());
                    inner.session.last_request = None;
                    self.emit(SubmissionEvent::StateChanged(SubmissionState::Idle));
                    self.emit(SubmissionEvent::ValidationFailed(err.clone()));
                    info!(error = %err, "submission rejected by validation");
                    return SubmitOutcome::Rejected(err);
                }
            };

            inner.generation += 1;
            let generation = inner.generation;
            let state = SubmissionState::InFlight {
                progress: 0,
                started_at: Utc::now(),
            };
            inner.session.state = state.clone();
            inner.session.validation_error = None;
            inner.session.last_request = Some(request.clone());
            self.emit(SubmissionEvent::StateChanged(state));
            inner.progress_task = Some(self.spawn_progress_task(generation));
            (request, generation)
        };

        info!(
            model = %request.model_id(),
            generation,
            chars = request.text().chars().count(),
            "prediction submitted"
        );

        let started = Instant::now();
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            let outcome = controller.transport.predict(&request.to_wire()).await;
            controller.settle(generation, started, outcome).await
        });

        match task.await {
            Ok(state) => SubmitOutcome::Settled(state),
            Err(err) => {
                error!(generation, error = %err, "prediction task aborted before settling");
                let state = self
                    .settle(
                        generation,
                        started,
                        Err(SubmissionError::Transport(format!(
                            "prediction task failed: {err}"
                        ))),
                    )
                    .await;
                SubmitOutcome::Settled(state)
            }
        }
    }

    fn spawn_progress_task(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        let period = self.tick_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !controller.apply_progress_tick(generation).await {
                    break;
                }
            }
        })
    }

    /// Returns false once the tick no longer belongs to a live submission.
    async fn apply_progress_tick(&self, generation: u64) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            return false;
        }
        let SubmissionState::InFlight {
            progress,
            started_at,
        } = inner.session.state
        else {
            return false;
        };

        let next = clamp_progress(progress, self.indicator.next_progress(progress));
        if next != progress {
            let state = SubmissionState::InFlight {
                progress: next,
                started_at,
            };
            inner.session.state = state.clone();
            self.emit(SubmissionEvent::StateChanged(state));
        }
        true
    }

    async fn settle(
        &self,
        generation: u64,
        started: Instant,
        outcome: Result<SentimentLabel, SubmissionError>,
    ) -> SubmissionState {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation || !inner.session.state.is_in_flight() {
            return inner.session.state.clone();
        }

        // Stop ticks before the terminal state becomes visible.
        if let Some(task) = inner.progress_task.take() {
            task.abort();
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let state = match outcome {
            Ok(sentiment) => {
                let confidence = clamp_confidence(self.indicator.display_confidence(sentiment));
                info!(
                    generation,
                    elapsed_ms,
                    sentiment = %sentiment,
                    "prediction succeeded"
                );
                SubmissionState::Succeeded {
                    sentiment,
                    confidence,
                }
            }
            Err(err) => {
                warn!(
                    generation,
                    elapsed_ms,
                    kind = ?err.kind(),
                    error = %err,
                    "prediction failed"
                );
                SubmissionState::Failed {
                    message: err.user_message(),
                }
            }
        };

        inner.session.state = state.clone();
        self.emit(SubmissionEvent::StateChanged(state.clone()));
        state
    }

    fn emit(&self, event: SubmissionEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
