use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::error::PipelineError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range
// ---------------------------------------------------------------------------

/// Render the left date-range panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Date range");
    ui.separator();

    // Work on copies so the pipeline runs once per change, not per widget.
    let mut start = state.start_date;
    let mut end = state.end_date;

    ui.strong("Start date");
    ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
    ui.add_space(4.0);
    ui.strong("End date");
    ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));
    ui.add_space(4.0);

    state.set_range(start, end);

    if ui.small_button("Reset").clicked() {
        state.reset_range();
    }

    ui.separator();

    match &state.pipeline_error {
        Some(PipelineError::Validation(_)) => {
            ui.label(
                RichText::new("Start date cannot be after the end date.").color(Color32::RED),
            );
        }
        Some(err @ PipelineError::Mapping(_)) => {
            ui.label(RichText::new(format!("Cannot chart this range: {err}")).color(Color32::RED));
        }
        None => {
            ui.label(format!(
                "Showing data between {} and {}",
                state.start_date, state.end_date
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let in_range = state.views.as_ref().map_or(0, |v| v.days_in_range);
        ui.label(format!(
            "{} days loaded, {in_range} in range",
            state.total_days()
        ));
        ui.label(RichText::new(state.cache.path().display().to_string()).weak());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open day-level rental data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open_dataset(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
