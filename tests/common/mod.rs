use std::f32::consts::PI;

use bandext::spectral::{forward, stft::bin_frequencies};

/// Analysis window used by the energy measurements below.
pub const MEASURE_FFT_SIZE: usize = 4096;
/// Analysis hop used by the energy measurements below.
pub const MEASURE_HOP_SIZE: usize = 1024;

pub fn gen_sine(freq_hz: f32, sr: u32, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amp * (2.0 * PI * freq_hz * i as f32 / sr as f32).sin())
        .collect()
}

pub fn gen_two_tone(
    freq_a: f32,
    amp_a: f32,
    freq_b: f32,
    amp_b: f32,
    sr: u32,
    n: usize,
) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f32 / sr as f32;
            amp_a * (2.0 * PI * freq_a * t).sin() + amp_b * (2.0 * PI * freq_b * t).sin()
        })
        .collect()
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f32, f32::max)
}

/// Mean squared spectral magnitude of `samples` over the `[f_lo, f_hi)`
/// frequency band, averaged across analysis frames.
pub fn band_energy(samples: &[f32], sample_rate: u32, f_lo: f32, f_hi: f32) -> f64 {
    let frames = forward(samples, MEASURE_FFT_SIZE, MEASURE_HOP_SIZE);
    let spectrum = frames.to_spectrum();
    let freqs = bin_frequencies(sample_rate, MEASURE_FFT_SIZE);

    let lo = freqs.iter().position(|&f| f >= f_lo).unwrap_or(freqs.len());
    let hi = freqs.iter().position(|&f| f >= f_hi).unwrap_or(freqs.len());
    if lo >= hi || spectrum.num_frames() == 0 {
        return 0.0;
    }

    let mut total = 0.0f64;
    for row in &spectrum.magnitudes {
        for &mag in &row[lo..hi] {
            total += (mag as f64) * (mag as f64);
        }
    }
    total / spectrum.num_frames() as f64
}

/// Frequency of the strongest bin across all frames.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32) -> f32 {
    let frames = forward(samples, MEASURE_FFT_SIZE, MEASURE_HOP_SIZE);
    let spectrum = frames.to_spectrum();
    let freqs = bin_frequencies(sample_rate, MEASURE_FFT_SIZE);

    let mut best_bin = 0;
    let mut best_mag = 0.0f32;
    for row in &spectrum.magnitudes {
        for (bin, &mag) in row.iter().enumerate() {
            if mag > best_mag {
                best_mag = mag;
                best_bin = bin;
            }
        }
    }
    freqs[best_bin]
}
