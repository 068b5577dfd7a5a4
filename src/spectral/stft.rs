//! Forward and inverse short-time Fourier transform.
//!
//! The forward transform slices a signal into overlapping Hann-windowed
//! frames and keeps the non-negative frequency bins of each frame. The
//! inverse reconstructs the signal by overlap-add with squared-window
//! normalization, so `inverse(forward(x))` recovers `x` to within
//! floating-point error when the frames are not modified in between.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::core::fft::{COMPLEX_ZERO, WINDOW_SUM_EPSILON};
use crate::core::window::hann_window;

/// Complex time-frequency frames produced by [`forward`].
///
/// Frames are stored frame-major: `frames[t][k]` is the value of frequency
/// bin `k` in the frame starting at sample `t * hop_size` (relative to the
/// center-padded signal). Each frame holds `fft_size / 2 + 1` bins.
#[derive(Debug, Clone)]
pub struct SpectralFrames {
    fft_size: usize,
    hop_size: usize,
    signal_len: usize,
    pub frames: Vec<Vec<Complex<f32>>>,
}

impl SpectralFrames {
    /// FFT window length used to produce these frames.
    #[inline]
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Hop length between consecutive frames.
    #[inline]
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of time frames.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frequency bins per frame (`fft_size / 2 + 1`).
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Splits the complex frames into magnitude and phase arrays.
    pub fn to_spectrum(&self) -> Spectrum {
        let magnitudes = self
            .frames
            .iter()
            .map(|frame| frame.iter().map(|c| c.norm()).collect())
            .collect();
        let phases = self
            .frames
            .iter()
            .map(|frame| frame.iter().map(|c| c.arg()).collect())
            .collect();
        Spectrum { magnitudes, phases }
    }

    /// Recomposes the complex frames from a magnitude/phase split.
    ///
    /// The spectrum must have the same frame and bin counts as `self`;
    /// mismatched cells are left untouched.
    pub fn set_from_spectrum(&mut self, spectrum: &Spectrum) {
        for (frame, (mags, phases)) in self
            .frames
            .iter_mut()
            .zip(spectrum.magnitudes.iter().zip(spectrum.phases.iter()))
        {
            for (cell, (&mag, &phase)) in frame.iter_mut().zip(mags.iter().zip(phases.iter())) {
                *cell = Complex::from_polar(mag, phase);
            }
        }
    }
}

/// Magnitude/phase decomposition of a [`SpectralFrames`], frame-major.
///
/// `magnitudes[t][k]` is non-negative; `phases[t][k]` is in (-π, π].
/// Together they losslessly represent the complex value
/// `mag * e^(i * phase)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub magnitudes: Vec<Vec<f32>>,
    pub phases: Vec<Vec<f32>>,
}

impl Spectrum {
    /// Number of time frames.
    #[inline]
    pub fn num_frames(&self) -> usize {
        self.magnitudes.len()
    }

    /// Number of frequency bins per frame.
    #[inline]
    pub fn num_bins(&self) -> usize {
        self.magnitudes.first().map(|f| f.len()).unwrap_or(0)
    }
}

/// Center frequency of every bin for the given rate and window length.
///
/// Returns `fft_size / 2 + 1` monotonically increasing values spaced by
/// `sample_rate / fft_size`, from 0 Hz up to the Nyquist frequency.
pub fn bin_frequencies(sample_rate: u32, fft_size: usize) -> Vec<f32> {
    let spacing = sample_rate as f32 / fft_size as f32;
    (0..=fft_size / 2).map(|k| k as f32 * spacing).collect()
}

/// Forward transform: signal to overlapping windowed spectra.
///
/// The signal is zero-padded by `fft_size / 2` on both sides so frames are
/// centered on their hop positions, producing `signal.len() / hop_size + 1`
/// frames. Preconditions (`fft_size > hop_size > 0`) are enforced upstream
/// by parameter validation.
pub fn forward(signal: &[f32], fft_size: usize, hop_size: usize) -> SpectralFrames {
    if signal.is_empty() {
        return SpectralFrames {
            fft_size,
            hop_size,
            signal_len: 0,
            frames: Vec::new(),
        };
    }

    let pad = fft_size / 2;
    let num_frames = signal.len() / hop_size + 1;
    let padded_len = ((num_frames - 1) * hop_size + fft_size).max(pad + signal.len() + pad);

    let mut padded = vec![0.0f32; padded_len];
    padded[pad..pad + signal.len()].copy_from_slice(signal);

    let window = hann_window(fft_size);
    let num_bins = fft_size / 2 + 1;

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    let mut fft_buffer = vec![COMPLEX_ZERO; fft_size];

    let mut frames = Vec::with_capacity(num_frames);
    for frame_idx in 0..num_frames {
        let start = frame_idx * hop_size;
        for (i, (&sample, &win)) in padded[start..start + fft_size]
            .iter()
            .zip(window.iter())
            .enumerate()
        {
            fft_buffer[i] = Complex::new(sample * win, 0.0);
        }

        fft.process(&mut fft_buffer);
        frames.push(fft_buffer[..num_bins].to_vec());
    }

    SpectralFrames {
        fft_size,
        hop_size,
        signal_len: signal.len(),
        frames,
    }
}

/// Inverse transform: overlapping spectra back to a signal.
///
/// Mirrors each frame's negative frequencies, inverse-transforms, applies
/// the synthesis window, and overlap-adds. The accumulated squared-window
/// sum normalizes the result, and the center padding added by [`forward`]
/// is trimmed so the output length equals the original signal length.
pub fn inverse(frames: &SpectralFrames) -> Vec<f32> {
    if frames.frames.is_empty() || frames.signal_len == 0 {
        return Vec::new();
    }

    let fft_size = frames.fft_size;
    let hop_size = frames.hop_size;
    let num_bins = frames.num_bins();
    let num_frames = frames.num_frames();
    let full_len = (num_frames - 1) * hop_size + fft_size;

    let window = hann_window(fft_size);
    let norm = 1.0 / fft_size as f32;

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(fft_size);
    let mut fft_buffer = vec![COMPLEX_ZERO; fft_size];

    let mut output = vec![0.0f32; full_len];
    let mut window_sum = vec![0.0f32; full_len];

    for (frame_idx, frame) in frames.frames.iter().enumerate() {
        fft_buffer[..num_bins].copy_from_slice(frame);
        // Conjugate mirror for the negative frequencies
        for bin in 1..num_bins - 1 {
            fft_buffer[fft_size - bin] = frame[bin].conj();
        }

        ifft.process(&mut fft_buffer);

        let start = frame_idx * hop_size;
        for i in 0..fft_size {
            output[start + i] += fft_buffer[i].re * norm * window[i];
            window_sum[start + i] += window[i] * window[i];
        }
    }

    for (sample, &ws) in output.iter_mut().zip(window_sum.iter()) {
        if ws > WINDOW_SUM_EPSILON {
            *sample /= ws;
        }
    }

    let pad = fft_size / 2;
    (pad..pad + frames.signal_len)
        .map(|i| output.get(i).copied().unwrap_or(0.0))
        .collect()
}
