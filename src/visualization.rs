//! Text rendering of traces for terminal display

use crate::engine::Trace;

const AXIS: char = '─';
const POINT: char = '•';

/// Render `trace` into `height` rows of `width` characters.
///
/// The vertical scale is the trace's own peak, so a flat trace draws just
/// the zero axis. Non-finite samples are left blank.
pub fn plot_trace(trace: &Trace, width: usize, height: usize) -> Vec<String> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut canvas = vec![vec![' '; width]; height];
    let zero_row = value_to_row(0.0, height);
    for cell in canvas[zero_row].iter_mut() {
        *cell = AXIS;
    }

    let peak = trace.peak();
    let scale = if peak > 0.0 && peak.is_finite() { peak } else { 1.0 };

    if !trace.is_empty() {
        for column in 0..width {
            let index = column * trace.len() / width;
            let (_, value) = trace.points[index];
            if !value.is_finite() {
                continue;
            }
            canvas[value_to_row(value / scale, height)][column] = POINT;
        }
    }

    canvas.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// One-line summary shown above a plot
pub fn trace_header(trace: &Trace) -> String {
    format!(
        "{}  peak {:.3}  rms {:.3}",
        trace.title,
        trace.peak(),
        trace.rms()
    )
}

// `normalized` in [-1, 1] maps to rows top (1.0) to bottom (-1.0).
// Also places the zero axis, so a flat trace lands on it for any height.
// Callers pass finite values only.
fn value_to_row(normalized: f64, height: usize) -> usize {
    if height <= 1 {
        return 0;
    }
    let span = (height - 1) as f64;
    ((1.0 - normalized.clamp(-1.0, 1.0)) / 2.0 * span).round() as usize
}
