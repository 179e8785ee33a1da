use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::RentalCategory;

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Accent for the leading bar and the trend line.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(0x72, 0xBC, 0xD4);
/// Fill for every non-leading bar.
pub const MUTED: Color32 = Color32::from_rgb(0xD3, 0xD3, 0xD3);

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Bar fills for a descending bar chart: first bar highlighted, rest muted.
pub fn ranked_bar_colors(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| if i == 0 { HIGHLIGHT } else { MUTED })
        .collect()
}

/// `n` soft, evenly spaced hues for count bars.
pub fn pastel_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(hue, 0.6, 0.78)
        })
        .collect()
}

/// Cool-to-warm colour for a rental category (Low blue, High red).
pub fn category_color(category: RentalCategory) -> Color32 {
    let steps = RentalCategory::ALL.len() - 1;
    let pos = RentalCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0);
    let t = pos as f32 / steps as f32;
    // Hue 220° (blue) down to 5° (red).
    let hue = 220.0 - t * 215.0;
    hsl_to_color32(hue, 0.65, 0.55)
}
