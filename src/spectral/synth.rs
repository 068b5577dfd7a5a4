//! High-frequency magnitude synthesis.
//!
//! Given the magnitude/phase split of a spectral frame set, this module
//! fabricates a plausible magnitude envelope for the band above the cutoff
//! frequency and cross-fades it against the original spectrum over a
//! transition zone. Phase is never touched: the synthetic band reuses
//! whatever phase values already occupy those bins.

use crate::spectral::stft::Spectrum;

/// Number of bins below the cutoff averaged into the reference magnitude.
const REFERENCE_BINS: usize = 5;

/// The bin range `[cutoff_bin, max_bin)` that synthesis writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighBand {
    /// First synthesized bin: the first bin at or above the cutoff frequency.
    pub cutoff_bin: usize,
    /// One past the last synthesized bin: the first bin at or above the
    /// target frequency, clamped to the last valid bin when the target lies
    /// beyond the frequency axis.
    pub max_bin: usize,
}

impl HighBand {
    /// Number of bins in the band.
    #[inline]
    pub fn len(&self) -> usize {
        self.max_bin - self.cutoff_bin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locates the synthesis band on a frequency axis.
///
/// Returns `None` when no valid band exists: the cutoff lies beyond the
/// axis, or the clamped `max_bin` does not exceed `cutoff_bin` (misordered
/// configuration). Callers treat `None` as a no-op, not an error.
pub fn locate_band(freqs: &[f32], cutoff_freq: f32, target_max_freq: f32) -> Option<HighBand> {
    let cutoff_bin = freqs.iter().position(|&f| f >= cutoff_freq)?;
    let max_bin = freqs
        .iter()
        .position(|&f| f >= target_max_freq)
        .unwrap_or(freqs.len() - 1);
    if max_bin <= cutoff_bin {
        return None;
    }
    Some(HighBand {
        cutoff_bin,
        max_bin,
    })
}

/// Half-cosine ramp from 1.0 down to 0.0 over `len` bins.
///
/// Shapes the synthetic band so it decays smoothly toward the target
/// frequency. Monotonically non-increasing, all values in [0, 1].
pub fn decay_envelope(len: usize) -> Vec<f32> {
    half_cosine(len).iter().map(|&x| 1.0 - x).collect()
}

/// Half-cosine ramp from 0.0 up to 1.0 over `len` bins.
///
/// Cross-fade weights for the transition zone: weight 0 keeps the original
/// magnitude, weight 1 takes the synthetic one. Monotonically
/// non-decreasing, all values in [0, 1].
pub fn transition_weights(len: usize) -> Vec<f32> {
    half_cosine(len)
}

/// `0.5 * (1 - cos(x))` for `len` evenly spaced `x` in [0, π], endpoints
/// included. A single point yields `[0.0]`.
fn half_cosine(len: usize) -> Vec<f32> {
    match len {
        0 => return vec![],
        1 => return vec![0.0],
        _ => {}
    }
    let step = std::f64::consts::PI / (len - 1) as f64;
    (0..len)
        .map(|i| (0.5 * (1.0 - (i as f64 * step).cos())) as f32)
        .collect()
}

/// Synthesizes high-frequency magnitude content in place.
///
/// Implements the spectral extrapolation over `[cutoff_bin, max_bin)` for
/// every time frame:
///
/// 1. A per-frame reference magnitude is the mean of the (up to)
///    [`REFERENCE_BINS`] bins just below the cutoff, scaled by `gain`.
/// 2. The reference is shaped by the decay envelope to form the synthetic
///    magnitude for each bin of the band.
/// 3. The first `trans_bins` bins cross-fade original against synthetic;
///    the remainder is overwritten with the synthetic value outright.
///
/// Bins outside the band and all phases are untouched. Returns `false`
/// (leaving the spectrum bit-identical) when no valid band exists.
pub fn extend_spectrum(
    spectrum: &mut Spectrum,
    freqs: &[f32],
    cutoff_freq: f32,
    target_max_freq: f32,
    transition_width: f32,
    gain: f32,
) -> bool {
    let band = match locate_band(freqs, cutoff_freq, target_max_freq) {
        Some(band) => band,
        None => return false,
    };

    // A non-empty band implies at least two axis entries
    let high_len = band.len();
    let envelope = decay_envelope(high_len);

    let spacing = freqs[1] - freqs[0];
    let trans_bins = ((transition_width / spacing) as usize).min(high_len);
    let weights = transition_weights(trans_bins);

    let ref_start = band.cutoff_bin.saturating_sub(REFERENCE_BINS);

    for mags in spectrum.magnitudes.iter_mut() {
        let reference = gain * mean(&mags[ref_start..band.cutoff_bin]);
        for (i, &env) in envelope.iter().enumerate() {
            let synthetic = env * reference;
            let bin = band.cutoff_bin + i;
            mags[bin] = if i < trans_bins {
                let w = weights[i];
                mags[bin] * (1.0 - w) + synthetic * w
            } else {
                synthetic
            };
        }
    }

    true
}

/// Mean of a slice; 0.0 for an empty slice (a cutoff at bin 0 has no
/// reference bins below it).
#[inline]
fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}
