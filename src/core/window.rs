//! Analysis window for the short-time transform.

use std::f64::consts::PI;

/// Generates a Hann window of the given size.
///
/// Degenerate sizes return trivial windows: empty for 0, `[1.0]` for 1.
pub fn hann_window(size: usize) -> Vec<f32> {
    match size {
        0 => return vec![],
        1 => return vec![1.0],
        _ => {}
    }
    let n = size as f64;
    (0..size)
        .map(|i| {
            let x = (2.0 * PI * i as f64) / (n - 1.0);
            (0.5 * (1.0 - x.cos())) as f32
        })
        .collect()
}
