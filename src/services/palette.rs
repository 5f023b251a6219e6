//! Color policies for the two chart families.
//!
//! Categorical charts color each slice from a fixed palette; numeric charts
//! color each series with a generated hue. The two are kept apart so either
//! family's output can change without touching the other.

/// Fixed slice palette for pie and doughnut charts, indexed by label.
pub const CATEGORICAL_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];

pub fn categorical_color(label_index: usize) -> &'static str {
    CATEGORICAL_PALETTE[label_index % CATEGORICAL_PALETTE.len()]
}

/// Hue step between consecutive bar/line series.
pub const SERIES_HUE_STEP: usize = 60;

pub fn series_hue(series_index: usize) -> usize {
    (series_index * SERIES_HUE_STEP) % 360
}

/// Series color for bar and line charts: full saturation, mid lightness.
pub fn series_color(series_index: usize) -> String {
    format!("hsl({}, 100%, 50%)", series_hue(series_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_palette_wraps() {
        assert_eq!(categorical_color(0), "#FF6384");
        assert_eq!(categorical_color(7), "#C9CBCF");
        assert_eq!(categorical_color(8), "#FF6384");
        assert_eq!(categorical_color(9), "#36A2EB");
    }

    #[test]
    fn test_series_hues_step_by_sixty() {
        assert_eq!(series_hue(0), 0);
        assert_eq!(series_hue(1), 60);
        assert_eq!(series_hue(5), 300);
        assert_eq!(series_hue(6), 0);
        assert_eq!(series_color(2), "hsl(120, 100%, 50%)");
    }
}
