use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::bucket::{DifficultyRange, PositionRange};

// ---------------------------------------------------------------------------
// Color ramp generator
// ---------------------------------------------------------------------------

/// Green-to-red hue endpoints: best bucket first, worst last.
const HUE_BEST: f32 = 130.0;
const HUE_WORST: f32 = 0.0;

/// Generates `n` colours evenly spaced along the hue ramp `from` → `to`.
pub fn generate_ramp(n: usize, from: f32, to: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let step = if n > 1 { (to - from) / (n - 1) as f32 } else { 0.0 };
    (0..n)
        .map(|i| {
            let hue = from + step * i as f32;
            let hsl = Hsl::new(hue, 0.65, 0.50);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: range label → Color32
// ---------------------------------------------------------------------------

/// Colours for range labels in tables and the distribution chart.
///
/// Named buckets run from green (top ranks, easy keywords) to red; the
/// `Other` / `Unknown` sentinels are grey.
#[derive(Debug, Clone)]
pub struct RangeColors {
    by_label: BTreeMap<&'static str, Color32>,
    default_color: Color32,
}

impl Default for RangeColors {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeColors {
    pub fn new() -> Self {
        let default_color = Color32::GRAY;
        let mut by_label = BTreeMap::new();

        let positions: Vec<PositionRange> = PositionRange::ALL
            .into_iter()
            .filter(|r| *r != PositionRange::Other)
            .collect();
        for (range, color) in positions
            .iter()
            .zip(generate_ramp(positions.len(), HUE_BEST, HUE_WORST))
        {
            by_label.insert(range.label(), color);
        }

        let difficulties: Vec<DifficultyRange> = DifficultyRange::ALL
            .into_iter()
            .filter(|r| *r != DifficultyRange::Unknown)
            .collect();
        for (range, color) in difficulties
            .iter()
            .zip(generate_ramp(difficulties.len(), HUE_BEST, HUE_WORST))
        {
            by_label.insert(range.label(), color);
        }

        RangeColors {
            by_label,
            default_color,
        }
    }

    pub fn position(&self, range: PositionRange) -> Color32 {
        self.for_label(range.label())
    }

    /// Look up the colour of a label as stored in a range column.
    pub fn for_label(&self, label: &str) -> Color32 {
        self.by_label
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_has_requested_length() {
        assert!(generate_ramp(0, HUE_BEST, HUE_WORST).is_empty());
        assert_eq!(generate_ramp(1, HUE_BEST, HUE_WORST).len(), 1);
        assert_eq!(generate_ramp(7, HUE_BEST, HUE_WORST).len(), 7);
    }

    #[test]
    fn sentinels_are_grey_and_buckets_differ() {
        let colors = RangeColors::new();
        assert_eq!(colors.position(PositionRange::Other), Color32::GRAY);
        assert_eq!(colors.for_label("Unknown"), Color32::GRAY);
        assert_ne!(
            colors.position(PositionRange::Top3),
            colors.position(PositionRange::Top100)
        );
        assert_ne!(colors.for_label(">65"), Color32::GRAY);
    }
}
