//! Horizontal mirroring.

use crate::types::Canvas;

/// Flip a canvas left to right.
///
/// The result has the same size and `result.get(w - 1 - x, y)` equals
/// `canvas.get(x, y)` for every pixel. The input is left untouched.
pub fn mirror_horizontal(canvas: &Canvas) -> Canvas {
    let mut out = canvas.clone();
    let w = canvas.width() as i32;

    for y in 0..canvas.height() as i32 {
        for x in 0..w {
            out.set(w - 1 - x, y, canvas.get(x, y));
        }
    }

    out
}
