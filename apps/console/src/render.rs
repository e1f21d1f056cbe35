//! Terminal rendering of [`ViewModel`]s.

use client_core::{ViewMode, ViewModel};
use shared::domain::ModelId;

const METER_WIDTH: usize = 20;

pub fn meter_bar(value: u8) -> String {
    let filled = usize::from(value.min(100)) * METER_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(METER_WIDTH - filled),
        value.min(100)
    )
}

pub fn render_view(view: &ViewModel) -> String {
    match view.mode {
        ViewMode::Idle => match &view.validation_message {
            Some(message) => format!("! {message}"),
            None => format!("Ready ({} characters)", view.char_count),
        },
        ViewMode::Loading => format!("{} {}", meter_bar(view.meter), view.submit_caption),
        ViewMode::Result => format!(
            "Prediction: {} | Model: {} | {}",
            view.label.as_deref().unwrap_or("-"),
            view.model_display.as_deref().unwrap_or("-"),
            meter_bar(view.meter)
        ),
        ViewMode::Error => format!(
            "Error: {}",
            view.message.as_deref().unwrap_or(client_core::GENERIC_FAILURE_MESSAGE)
        ),
    }
}

pub fn render_models(current: ModelId) -> String {
    ModelId::ALL
        .into_iter()
        .map(|model| {
            let marker = if model == current { '*' } else { ' ' };
            format!("{marker} {:<14} {}", model.as_str(), model.display_name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
