//! Color utilities for survey charts

use egui::Color32;

/// Bar fill (sky blue)
pub const BAR_FILL: [u8; 3] = [135, 206, 235];

/// Bar outline
pub const BAR_EDGE: [u8; 3] = [0, 0, 0];

const PALETTE: &[[u8; 3]] = &[
    [31, 119, 180],  // Blue
    [255, 127, 14],  // Orange
    [44, 160, 44],   // Green
    [214, 39, 40],   // Red
    [148, 103, 189], // Purple
    [140, 86, 75],   // Brown
    [227, 119, 194], // Pink
    [127, 127, 127], // Gray
    [188, 189, 34],  // Olive
    [23, 190, 207],  // Cyan
];

/// Palette entry for the category at `index`
pub fn categorical_rgb(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Get a categorical color from the palette
pub fn categorical_color(index: usize) -> Color32 {
    to_color32(categorical_rgb(index))
}

pub fn to_color32([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(categorical_rgb(0), categorical_rgb(PALETTE.len()));
        assert_ne!(categorical_rgb(0), categorical_rgb(1));
        assert_eq!(categorical_color(1), Color32::from_rgb(255, 127, 14));
    }
}
