//! Colour and dash of the chart lines.

use plotters::style::RGBColor;

/// Line colours in drawing order: blue, green, black, cyan, red, yellow,
/// magenta.
pub const PALETTE: [RGBColor; 7] = [
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(0, 0, 0),
    RGBColor(0, 191, 191),
    RGBColor(255, 0, 0),
    RGBColor(191, 191, 0),
    RGBColor(191, 0, 191),
];

/// Stroke width in pixels, 2 pt at 300 DPI.
pub const LINE_WIDTH: u32 = 8;

/// How a line is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    /// Continuous line, used for the balanced mode.
    Solid,
    /// Dashed line, used for every other mode.
    Dashed,
}

/// Full appearance of one chart line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke colour.
    pub color: RGBColor,

    /// Solid or dashed.
    pub dash: Dash,

    /// Stroke width in pixels.
    pub width: u32,
}

/// Appearance of the `index`-th drawn line. The colour advances every two
/// lines so the plain and the balanced line of one process count match; the
/// palette wraps around.
pub fn line_style(balanced: bool, index: usize) -> LineStyle {
    LineStyle {
        color: PALETTE[(index / 2) % PALETTE.len()],
        dash: if balanced { Dash::Solid } else { Dash::Dashed },
        width: LINE_WIDTH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_share_a_colour() {
        assert_eq!(line_style(false, 0).color, line_style(true, 1).color);
        assert_eq!(line_style(false, 2).color, line_style(true, 3).color);
        assert!(line_style(true, 1).color != line_style(false, 2).color);
    }

    #[test]
    fn dash_follows_mode() {
        assert_eq!(line_style(true, 5).dash, Dash::Solid);
        assert_eq!(line_style(false, 5).dash, Dash::Dashed);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(line_style(false, 14).color, PALETTE[0]);
        assert_eq!(line_style(false, 13).color, PALETTE[6]);
    }
}
