//! FFT-related constants shared across the crate.

use rustfft::num_complex::Complex;

/// Zero-valued complex number, used for FFT buffer initialization.
pub const COMPLEX_ZERO: Complex<f32> = Complex::new(0.0, 0.0);

/// Absolute floor for overlap-add window-sum normalization to prevent
/// division by zero at frame-set edges.
pub const WINDOW_SUM_EPSILON: f32 = 1e-8;
