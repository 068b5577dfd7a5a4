//! Sample-rate conversion via windowed-sinc interpolation.
//!
//! The pipeline uses this in two places: upsampling input to the minimum
//! working rate before synthesis, and converting the synthesized output to a
//! requested output rate. Linear and cubic kernels serve as fallbacks for
//! degenerate inputs.

use crate::error::ExtendError;

/// Default number of sinc lobes. More lobes sharpen the cutoff but cost time.
const DEFAULT_SINC_LOBES: usize = 8;

/// Kaiser beta for the sinc window. 6.0 gives ~60 dB stopband attenuation.
const SINC_KAISER_BETA: f64 = 6.0;

/// Converts a mono signal from `source_rate` to `target_rate`.
///
/// Identical rates return the input unchanged. The output length is
/// `round(len * target_rate / source_rate)`.
///
/// # Errors
/// Returns `ExtendError::InvalidSampleRate` if either rate is zero.
pub fn resample(input: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>, ExtendError> {
    if source_rate == 0 {
        return Err(ExtendError::InvalidSampleRate(source_rate));
    }
    if target_rate == 0 {
        return Err(ExtendError::InvalidSampleRate(target_rate));
    }
    if source_rate == target_rate {
        return Ok(input.to_vec());
    }
    let output_len =
        (input.len() as f64 * target_rate as f64 / source_rate as f64).round() as usize;
    Ok(resample_sinc(input, output_len, DEFAULT_SINC_LOBES))
}

/// Linear interpolation to an explicit output length. Fallback for inputs
/// too short for the cubic kernel.
pub fn resample_linear(input: &[f32], output_len: usize) -> Vec<f32> {
    if input.is_empty() || output_len == 0 {
        return vec![];
    }
    if input.len() == 1 {
        return vec![input[0]; output_len];
    }

    let ratio = (input.len() - 1) as f64 / (output_len.max(1) - 1).max(1) as f64;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;

        if idx + 1 < input.len() {
            output.push(input[idx] * (1.0 - frac) + input[idx + 1] * frac);
        } else {
            output.push(input[input.len() - 1]);
        }
    }

    output
}

/// 4-point Hermite interpolation to an explicit output length. Fallback for
/// inputs too short for the sinc kernel.
pub fn resample_cubic(input: &[f32], output_len: usize) -> Vec<f32> {
    if input.is_empty() || output_len == 0 {
        return vec![];
    }
    if input.len() < 4 {
        return resample_linear(input, output_len);
    }

    let ratio = (input.len() - 1) as f64 / (output_len.max(1) - 1).max(1) as f64;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;

        // 4 surrounding samples with boundary clamping
        let s0 = input[idx.saturating_sub(1)];
        let s1 = input[idx];
        let s2 = input[(idx + 1).min(input.len() - 1)];
        let s3 = input[(idx + 2).min(input.len() - 1)];

        let c0 = s1;
        let c1 = 0.5 * (s2 - s0);
        let c2 = s0 - 2.5 * s1 + 2.0 * s2 - 0.5 * s3;
        let c3 = 0.5 * (s3 - s0) + 1.5 * (s1 - s2);

        output.push(((c3 * frac + c2) * frac + c1) * frac + c0);
    }

    output
}

/// Windowed-sinc resampling to an explicit output length.
///
/// Convolves with a Kaiser-windowed sinc kernel. Falls back to cubic
/// interpolation for inputs shorter than `2 * lobes`.
pub fn resample_sinc(input: &[f32], output_len: usize, lobes: usize) -> Vec<f32> {
    if input.is_empty() || output_len == 0 {
        return vec![];
    }
    let lobes = lobes.max(1);
    if input.len() < 2 * lobes {
        return resample_cubic(input, output_len);
    }

    let ratio = (input.len() - 1) as f64 / (output_len.max(1) - 1).max(1) as f64;
    let mut output = Vec::with_capacity(output_len);

    let bessel_beta = bessel_i0(SINC_KAISER_BETA);

    for i in 0..output_len {
        let pos = i as f64 * ratio;
        let center = pos as isize;
        let frac = pos - center as f64;

        let mut sample = 0.0f64;
        let mut weight_sum = 0.0f64;

        let start = -(lobes as isize) + 1;
        let end = lobes as isize + 1;
        for j in start..end {
            let idx = center + j;
            if idx < 0 || idx >= input.len() as isize {
                continue;
            }

            let x = frac - j as f64;
            let sinc_val = if x.abs() < 1e-10 {
                1.0
            } else {
                let pi_x = std::f64::consts::PI * x;
                pi_x.sin() / pi_x
            };

            let t = (j as f64 - frac) / lobes as f64;
            let window = if t.abs() <= 1.0 {
                bessel_i0(SINC_KAISER_BETA * (1.0 - t * t).max(0.0).sqrt()) / bessel_beta
            } else {
                0.0
            };

            let w = sinc_val * window;
            sample += input[idx as usize] as f64 * w;
            weight_sum += w;
        }

        // Normalize to preserve DC gain
        if weight_sum.abs() > 1e-10 {
            sample /= weight_sum;
        }

        output.push(sample as f32);
    }

    output
}

/// Modified Bessel function of the first kind, order zero.
/// Approximated with the power series expansion.
fn bessel_i0(x: f64) -> f64 {
    let mut sum = 1.0f64;
    let mut term = 1.0f64;
    let half_x = x * 0.5;

    for k in 1..=25 {
        term *= (half_x / k as f64) * (half_x / k as f64);
        sum += term;
        if term < sum * 1e-16 {
            break;
        }
    }

    sum
}
