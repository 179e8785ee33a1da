use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{Align2, RichText, ScrollArea, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text,
};

use crate::color::{self, HIGHLIGHT};
use crate::data::aggregate::{Binning, MonthTotal, TemperaturePoint, WeatherTotal};
use crate::data::model::RentalCategory;
use crate::error::PipelineError;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render all charts for the current selection in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let views = match &state.views {
        Some(v) => v,
        None => {
            let message = placeholder_message(state.pipeline_error.as_ref());
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(message);
            });
            return;
        }
    };

    if views.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data in the selected range.");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Bike Sharing Analysis Dashboard");
            ui.add_space(12.0);

            section(ui, "Effect of weather on bike rentals");
            weather_chart(ui, &views.weather);

            section(ui, "Temperature vs. bike rentals");
            temperature_chart(ui, &views.temperature);

            section(ui, "Monthly rental trend");
            monthly_chart(ui, &views.monthly);

            section(ui, "Days by rental level");
            category_count_chart(ui, &views.binning);
            ui.add_space(8.0);
            category_series_chart(ui, &views.binning);
        });
}

/// What the central panel says when there is nothing to chart.
fn placeholder_message(error: Option<&PipelineError>) -> String {
    match error {
        Some(PipelineError::Validation(_)) => "Pick a valid date range to view charts".to_string(),
        Some(PipelineError::Mapping(m)) => format!(
            "Unknown weather code {} on {}; charts are unavailable for this range",
            m.code, m.date
        ),
        None => "No dataset loaded".to_string(),
    }
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(16.0);
    ui.label(RichText::new(title).strong().size(18.0));
    ui.add_space(4.0);
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Axis formatter for charts whose x positions are indices into `labels`.
fn index_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

// ---------------------------------------------------------------------------
// Weather impact – ranked bar chart
// ---------------------------------------------------------------------------

fn weather_chart(ui: &mut Ui, totals: &[WeatherTotal]) {
    let labels: Vec<String> = totals.iter().map(|t| t.label.to_string()).collect();
    let max = totals.iter().map(|t| t.total).max().unwrap_or(0) as f64;

    let bars: Vec<Bar> = totals
        .iter()
        .zip(color::ranked_bar_colors(totals.len()))
        .enumerate()
        .map(|(i, (t, fill))| {
            Bar::new(i as f64, t.total as f64)
                .name(t.label.as_str())
                .fill(fill)
                .width(0.6)
        })
        .collect();

    Plot::new("weather_impact")
        .height(CHART_HEIGHT)
        .x_axis_label("Weather condition")
        .y_axis_label("Bikes rented")
        .x_axis_formatter(index_formatter(labels))
        .include_y(0.0)
        .include_y(max * 1.1)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Total rentals"));
            for (i, t) in totals.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, t.total as f64),
                        format_thousands(t.total),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Temperature impact – scatter
// ---------------------------------------------------------------------------

fn temperature_chart(ui: &mut Ui, points: &[TemperaturePoint]) {
    let series: PlotPoints = points
        .iter()
        .map(|p| [p.temperature, p.rental_count as f64])
        .collect();

    Plot::new("temperature_impact")
        .height(CHART_HEIGHT)
        .x_axis_label("Temperature (normalised)")
        .y_axis_label("Bikes rented")
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(series)
                    .name("Day")
                    .radius(3.0)
                    .color(HIGHLIGHT.gamma_multiply(0.6)),
            );
        });
}

// ---------------------------------------------------------------------------
// Monthly trend – line with markers
// ---------------------------------------------------------------------------

fn monthly_chart(ui: &mut Ui, months: &[MonthTotal]) {
    let labels: Vec<String> = months.iter().map(MonthTotal::label).collect();
    let coords: Vec<[f64; 2]> = months
        .iter()
        .enumerate()
        .map(|(i, m)| [i as f64, m.total as f64])
        .collect();

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Bikes rented")
        .x_axis_formatter(index_formatter(labels))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::new(coords.clone()))
                    .name("Rentals")
                    .color(HIGHLIGHT)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::new(coords))
                    .color(HIGHLIGHT)
                    .radius(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Binning – day counts per category + categorised daily series
// ---------------------------------------------------------------------------

fn category_count_chart(ui: &mut Ui, binning: &Binning) {
    let labels: Vec<String> = binning.counts.iter().map(|c| c.category.to_string()).collect();
    let bars: Vec<Bar> = binning
        .counts
        .iter()
        .zip(color::pastel_palette(binning.counts.len()))
        .enumerate()
        .map(|(i, (c, fill))| {
            Bar::new(i as f64, c.days as f64)
                .name(c.category.as_str())
                .fill(fill)
                .width(0.6)
        })
        .collect();

    Plot::new("category_counts")
        .height(CHART_HEIGHT * 0.8)
        .x_axis_label("Rental level")
        .y_axis_label("Number of days")
        .x_axis_formatter(index_formatter(labels))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Days"));
        });
}

fn category_series_chart(ui: &mut Ui, binning: &Binning) {
    Plot::new("category_series")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Bikes rented")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m").to_string())
                .unwrap_or_default()
        })
        .label_formatter(|name: &str, value: &PlotPoint| {
            let date = x_to_date(value.x)
                .map(|d| d.to_string())
                .unwrap_or_default();
            format!("{name}\n{date}: {:.0}", value.y)
        })
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            for category in RentalCategory::ALL {
                let series: PlotPoints = binning
                    .series
                    .iter()
                    .filter(|d| d.category == category)
                    .map(|d| [date_to_x(d.date), d.rental_count as f64])
                    .collect();
                plot_ui.points(
                    Points::new(series)
                        .name(category.as_str())
                        .radius(3.0)
                        .color(color::category_color(category)),
                );
            }
        });
}
