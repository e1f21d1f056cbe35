use std::{io::Write, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    project, FixedIndicator, HttpPredictionTransport, RandomIndicator, SubmissionController,
    SubmissionEvent, SubmissionState, SubmitOutcome, SyntheticIndicator,
};
use shared::domain::ModelId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, Settings};
use render::{render_models, render_view};

#[derive(Parser, Debug)]
#[command(about = "Predict the sentiment of a comment with a remote classifier")]
struct Args {
    /// Base URL of the prediction service.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, default_value_t = ModelId::default().as_str().to_string())]
    model: String,
    /// Submit one comment and exit instead of reading comments from stdin.
    #[arg(long)]
    comment: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Hide the synthetic progress meter.
    #[arg(long)]
    no_progress: bool,
    #[arg(long)]
    list_models: bool,
}

impl Args {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(v) = &self.api_url {
            settings.api_url = v.clone();
        }
        if let Some(v) = self.timeout_secs {
            settings.request_timeout_secs = Some(v);
        }
        if let Some(v) = self.tick_ms {
            settings.progress_tick_ms = v;
        }
        if self.no_progress {
            settings.synthetic_progress = false;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if args.list_models {
        println!("{}", render_models(ModelId::default()));
        return Ok(());
    }

    let mut settings = load_settings();
    args.apply_to(&mut settings);
    let controller = build_controller(&settings)?;

    match &args.comment {
        Some(comment) => {
            let outcome = run_submission(&controller, comment, &args.model).await?;
            match outcome {
                SubmitOutcome::Settled(SubmissionState::Succeeded { .. }) => Ok(()),
                SubmitOutcome::Rejected(err) => bail!("submission rejected: {err}"),
                _ => bail!("prediction failed"),
            }
        }
        None => run_interactive(&controller, &args.model).await,
    }
}

fn build_controller(settings: &Settings) -> Result<Arc<SubmissionController>> {
    let mut transport = HttpPredictionTransport::new(&settings.api_url)
        .context("failed to configure prediction service client")?;
    if let Some(timeout) = settings.request_timeout() {
        transport = transport.with_timeout(timeout);
    }
    info!(
        endpoint = %transport.endpoint(),
        timeout = ?settings.request_timeout(),
        synthetic_progress = settings.synthetic_progress,
        "prediction client configured"
    );

    let indicator: Arc<dyn SyntheticIndicator> = if settings.synthetic_progress {
        Arc::new(RandomIndicator::new())
    } else {
        Arc::new(FixedIndicator::disabled())
    };

    Ok(SubmissionController::new_with_tick_interval(
        Arc::new(transport),
        indicator,
        settings.progress_tick(),
    ))
}

/// Drives one submission, redrawing the progress line until it settles.
async fn run_submission(
    controller: &Arc<SubmissionController>,
    text: &str,
    model: &str,
) -> Result<SubmitOutcome> {
    let mut events = controller.subscribe();
    let submission = controller.submit(text, model);
    tokio::pin!(submission);

    let mut stdout = std::io::stdout();
    let outcome = loop {
        tokio::select! {
            biased;
            outcome = &mut submission => break outcome,
            event = events.recv() => {
                if let Ok(SubmissionEvent::StateChanged(SubmissionState::InFlight { .. })) = event {
                    let view = project(&controller.snapshot().await);
                    write!(stdout, "\r{}", render_view(&view))?;
                    stdout.flush()?;
                }
            }
        }
    };

    let view = project(&controller.snapshot().await);
    writeln!(stdout, "\r{:<60}", render_view(&view))?;
    Ok(outcome)
}

async fn run_interactive(
    controller: &Arc<SubmissionController>,
    initial_model: &str,
) -> Result<()> {
    let mut model = initial_model
        .parse::<ModelId>()
        .with_context(|| format!("cannot start with model '{initial_model}'"))?;
    println!(
        "Model: {} ({}). Type a comment, :models, :model <id> or :quit.",
        model.display_name(),
        model
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":models" => println!("{}", render_models(model)),
            command if command.starts_with(":model") => {
                let requested = command.trim_start_matches(":model").trim();
                match requested.parse::<ModelId>() {
                    Ok(next) => {
                        model = next;
                        println!("Model: {} ({})", model.display_name(), model);
                    }
                    Err(err) => println!("! {err}"),
                }
            }
            _ => {
                controller.set_draft(line.as_str(), model).await;
                run_submission(controller, &line, model.as_str()).await?;
            }
        }
    }

    Ok(())
}
