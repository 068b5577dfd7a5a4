#![forbid(unsafe_code)]
//! Pure Rust audio bandwidth extension.
//!
//! `bandext` synthesizes plausible high-frequency content for signals whose
//! original spectrum was band-limited (lossy-encoded or low-sample-rate
//! source material). The signal is transformed into overlapping spectra, a
//! synthetic magnitude envelope is shaped from the existing spectral tail
//! and cross-faded in above a configurable cutoff frequency, and the signal
//! is reconstructed by overlap-add. It is a single-shot offline transform.
//!
//! # Quick Start
//!
//! ```
//! use bandext::ExtendParams;
//!
//! // 1 second of a band-limited 4 kHz sine at 96 kHz
//! let input: Vec<f32> = (0..96_000)
//!     .map(|i| (2.0 * std::f32::consts::PI * 4_000.0 * i as f32 / 96_000.0).sin())
//!     .collect();
//!
//! let params = ExtendParams::new()
//!     .with_sample_rate(96_000)
//!     .with_channels(1)
//!     .with_cutoff_freq(8_000.0)
//!     .with_target_max_freq(20_000.0);
//!
//! let output = bandext::extend(&input, &params).unwrap();
//! assert_eq!(output.len(), input.len());
//! ```
//!
//! # Working with files
//!
//! The CLI front end (`bandext-cli`) reads a WAV file, upsamples it to the
//! minimum working rate if necessary, runs the extension, and writes the
//! result at a selectable bit depth. The same flow is available as
//! [`extend_with_resample`].

pub mod core;
pub mod error;
pub mod io;
pub mod spectral;
pub mod viz;

use rayon::prelude::*;

pub use crate::core::types::{AudioBuffer, BitDepth, ExtendParams, Sample, MIN_SYNTHESIS_RATE};
pub use error::ExtendError;
pub use spectral::stft::{bin_frequencies, Spectrum};

/// Deinterleaves multi-channel audio into separate per-channel vectors.
///
/// The result is a fixed-size collection, one buffer per channel, sized
/// once here and never grown during processing.
#[inline]
fn deinterleave(input: &[f32], num_channels: usize) -> Vec<Vec<f32>> {
    (0..num_channels)
        .map(|ch| {
            input
                .iter()
                .skip(ch)
                .step_by(num_channels)
                .copied()
                .collect()
        })
        .collect()
}

/// Interleaves per-channel vectors into a single buffer, truncating to the
/// shortest channel.
#[inline]
fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let min_len = channels.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..min_len)
        .flat_map(|i| channels.iter().map(move |ch| ch[i]))
        .collect()
}

/// Validates that input is non-empty and contains only finite samples.
///
/// Returns `Ok(false)` if input is empty (caller should return `Ok(vec![])`),
/// `Ok(true)` if input is valid, or `Err` if it contains NaN/Inf.
#[inline]
fn validate_input(input: &[f32]) -> Result<bool, ExtendError> {
    if input.is_empty() {
        return Ok(false);
    }
    if input.iter().any(|s| !s.is_finite()) {
        return Err(ExtendError::NonFiniteInput);
    }
    Ok(true)
}

/// Runs the full transform-synthesize-reconstruct cycle on one channel.
///
/// When no valid synthesis band exists for the configuration, the channel
/// is returned bit-identical so downstream consumers still get output.
fn extend_channel(channel: &[f32], freqs: &[f32], params: &ExtendParams) -> Vec<f32> {
    if channel.is_empty() {
        return Vec::new();
    }

    let mut frames = spectral::stft::forward(channel, params.fft_size, params.hop_size);
    let mut spectrum = frames.to_spectrum();

    let applied = spectral::synth::extend_spectrum(
        &mut spectrum,
        freqs,
        params.cutoff_freq,
        params.target_max_freq,
        params.transition_width,
        params.gain,
    );
    if !applied {
        return channel.to_vec();
    }

    frames.set_from_spectrum(&spectrum);
    spectral::stft::inverse(&frames)
}

/// Extends the bandwidth of interleaved audio samples.
///
/// This is the main entry point for in-memory processing. Channels are
/// deinterleaved into independent buffers and processed in parallel; each
/// channel's result depends only on its own samples and the read-only
/// params, so the output channel order always matches the input.
///
/// # Errors
///
/// Returns [`ExtendError::InvalidConfig`] for invalid FFT/hop/band settings
/// and [`ExtendError::NonFiniteInput`] if the input contains NaN or Inf.
///
/// # Example
///
/// ```
/// use bandext::ExtendParams;
///
/// let input: Vec<f32> = (0..48_000)
///     .map(|i| (2.0 * std::f32::consts::PI * 2_000.0 * i as f32 / 96_000.0).sin())
///     .collect();
///
/// let params = ExtendParams::new()
///     .with_sample_rate(96_000)
///     .with_channels(1)
///     .with_cutoff_freq(6_000.0)
///     .with_target_max_freq(18_000.0);
/// let output = bandext::extend(&input, &params).unwrap();
/// assert_eq!(output.len(), input.len());
/// ```
pub fn extend(input: &[f32], params: &ExtendParams) -> Result<Vec<f32>, ExtendError> {
    params.validate()?;

    if !validate_input(input)? {
        return Ok(vec![]);
    }

    let num_channels = params.channels as usize;
    let channels = deinterleave(input, num_channels);
    let freqs = bin_frequencies(params.sample_rate, params.fft_size);

    let channel_outputs: Vec<Vec<f32>> = channels
        .par_iter()
        .map(|channel| extend_channel(channel, &freqs, params))
        .collect();

    Ok(interleave(&channel_outputs))
}

/// Extends an [`AudioBuffer`] and returns a new `AudioBuffer`.
///
/// The sample rate and channel layout are taken from the input buffer,
/// overriding whatever is set in `params`.
///
/// # Errors
///
/// Returns [`ExtendError::InvalidConfig`] for invalid settings and
/// [`ExtendError::NonFiniteInput`] for NaN/Inf samples.
pub fn extend_buffer(
    buffer: &AudioBuffer,
    params: &ExtendParams,
) -> Result<AudioBuffer, ExtendError> {
    let mut effective = params.clone();
    effective.sample_rate = buffer.sample_rate;
    effective.channels = buffer.channels;

    let output = extend(&buffer.data, &effective)?;
    AudioBuffer::new(output, buffer.channels, buffer.sample_rate)
}

/// Extends a buffer, resampling around the synthesis as needed.
///
/// The signal is upsampled so the working rate is at least
/// [`MIN_SYNTHESIS_RATE`] (and at least the requested output rate), the
/// extension runs at the working rate, and the result is converted to
/// `params.output_sample_rate` if one is set — otherwise it stays at the
/// working rate, which is where the synthesized band lives. This is the
/// flow the CLI drives for whole files.
///
/// # Errors
///
/// Returns any error from validation, resampling, or the extension itself.
pub fn extend_with_resample(
    buffer: &AudioBuffer,
    params: &ExtendParams,
) -> Result<AudioBuffer, ExtendError> {
    params.validate()?;

    let working_rate = buffer
        .sample_rate
        .max(params.output_sample_rate.unwrap_or(0))
        .max(MIN_SYNTHESIS_RATE);
    let out_rate = params.output_sample_rate.unwrap_or(working_rate);

    let working = if buffer.sample_rate == working_rate {
        buffer.clone()
    } else {
        resample_buffer(buffer, working_rate)?
    };

    let extended = extend_buffer(&working, params)?;

    if out_rate == working_rate {
        Ok(extended)
    } else {
        resample_buffer(&extended, out_rate)
    }
}

/// Resamples every channel of a buffer to the target rate.
fn resample_buffer(buffer: &AudioBuffer, target_rate: u32) -> Result<AudioBuffer, ExtendError> {
    let channels: Vec<Vec<f32>> = (0..buffer.channels)
        .map(|ch| buffer.channel_data(ch))
        .collect();
    let resampled = channels
        .iter()
        .map(|ch| crate::core::resample::resample(ch, buffer.sample_rate, target_rate))
        .collect::<Result<Vec<_>, _>>()?;
    AudioBuffer::from_channels(&resampled, target_rate)
}
