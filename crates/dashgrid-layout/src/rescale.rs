//! Proportional horizontal rescale across a column-count change.
//!
//! This is phase one of a responsive reflow. Rounding can make neighbours
//! overlap; the engine runs a compaction pass afterwards to separate them.

use dashgrid_core::Position;
use tracing::debug;

/// Scale `x` and `w` by `new_columns / old_columns`.
///
/// Both are rounded to the nearest integer (halves away from zero), then `w`
/// is clamped to `[1, new_columns]` and `x` to `[0, new_columns - w]`. Rows
/// and heights are untouched. Both column counts must be at least 1.
#[must_use]
pub fn scale_position(pos: Position, old_columns: u32, new_columns: u32) -> Position {
    let ratio = f64::from(new_columns) / f64::from(old_columns);
    let scaled_w = (f64::from(pos.w) * ratio).round() as u32;
    let scaled_x = (f64::from(pos.x) * ratio).round() as u32;

    let w = scaled_w.clamp(1, new_columns);
    if w != scaled_w {
        debug!(
            from = pos.w,
            scaled = scaled_w,
            clamped = w,
            new_columns,
            "rescaled width clamped"
        );
    }
    let x = scaled_x.min(new_columns - w);
    Position::new(x, pos.y, w, pos.h)
}
