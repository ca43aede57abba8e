/*!
 * Placement of annotation boxes on the ASS alignment grid.
 *
 * ASS cannot put text at an arbitrary (x, y). It only knows nine anchors
 * plus margins measured from the nearest edges:
 *
 * ```text
 *  _____
 * |7 8 9|
 * |4 5 6|
 * |1 2 3|
 *  ‾‾‾‾‾
 * ```
 *
 * Annotation boxes use a top-left origin. `MarginL`/`MarginR` are always the
 * distances to the left and right canvas edges; `MarginV` is measured from
 * the top edge for the top row, from the bottom edge for the bottom row, and
 * is zero for the middle row.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the coordinate space annotation boxes are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Canvas width, also written as `PlayResX`
    pub width: f64,
    /// Canvas height, also written as `PlayResY`
    pub height: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a box on this canvas to an anchor and margins
    pub fn place(&self, bounds: &BoundingBox) -> Placement {
        map_position(bounds.x, bounds.y, bounds.w, bounds.h, self.width, self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

/// Axis-aligned box with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }
}

/// Result of quantizing a box onto the ASS anchor grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// ASS numpad alignment, always in 1..=9
    pub alignment: u8,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_vertical: f64,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (L={}, R={}, V={})",
            anchor_name(self.alignment),
            self.margin_left,
            self.margin_right,
            self.margin_vertical
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Low,
    Middle,
    High,
}

/// Classify `start` against `mid` along one axis.
///
/// Equality is exact. A box is also on the midpoint when its centre lands
/// exactly on it, so a box centred on the canvas anchors to the centre.
#[allow(clippy::float_cmp)]
fn band(start: f64, extent: f64, mid: f64) -> Band {
    if start == mid || start + extent / 2.0 == mid {
        Band::Middle
    } else if start < mid {
        Band::Low
    } else {
        Band::High
    }
}

/// Map a box to an ASS alignment and `(MarginL, MarginR, MarginV)`.
///
/// No clamping is applied: boxes outside the canvas produce negative margins.
pub fn map_position(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    canvas_width: f64,
    canvas_height: f64,
) -> Placement {
    let margin_left = x;
    let margin_right = canvas_width - x - w;

    // Rows count up from the bottom of the numpad: 1, 4, 7
    let (row_base, margin_vertical) = match band(y, h, canvas_height / 2.0) {
        Band::Low => (7, y),
        Band::High => (1, canvas_height - y - h),
        Band::Middle => (4, 0.0),
    };

    let column = match band(x, w, canvas_width / 2.0) {
        Band::Low => 0,
        Band::Middle => 1,
        Band::High => 2,
    };

    Placement {
        alignment: row_base + column,
        margin_left,
        margin_right,
        margin_vertical,
    }
}

/// Human readable name of an alignment, used in debug logs
pub fn anchor_name(alignment: u8) -> &'static str {
    match alignment {
        1 => "bottom-left",
        2 => "bottom-center",
        3 => "bottom-right",
        4 => "middle-left",
        5 => "center",
        6 => "middle-right",
        7 => "top-left",
        8 => "top-center",
        9 => "top-right",
        _ => "invalid",
    }
}
