//! Spectrogram rendering for diagnostics.
//!
//! Renders a time-vs-frequency magnitude plot to a grayscale PNG. This has
//! no effect on the synthesized audio; the CLI uses it to show the spectrum
//! before and after extension.

use image::GrayImage;

use crate::error::ExtendError;
use crate::spectral::stft::forward;

/// Analysis window length for rendering. Smaller than the synthesis FFT so
/// the time axis stays readable.
const RENDER_FFT_SIZE: usize = 2048;
/// Analysis hop length for rendering.
const RENDER_HOP_SIZE: usize = 512;
/// Magnitudes below this level (relative to the peak) render as black.
const DB_FLOOR: f32 = -80.0;

/// Rasterizes a mono signal's spectrogram.
///
/// One column per analysis frame, one row per frequency bin, low
/// frequencies at the bottom. Pixel intensity maps dB magnitude relative to
/// the peak linearly onto [`DB_FLOOR`], 0] dB.
///
/// # Errors
/// Returns `ExtendError::RenderError` if the signal is empty.
pub fn spectrogram_image(samples: &[f32], _sample_rate: u32) -> Result<GrayImage, ExtendError> {
    if samples.is_empty() {
        return Err(ExtendError::RenderError(
            "cannot render an empty signal".to_string(),
        ));
    }

    let frames = forward(samples, RENDER_FFT_SIZE, RENDER_HOP_SIZE);
    let spectrum = frames.to_spectrum();
    let width = spectrum.num_frames() as u32;
    let height = spectrum.num_bins() as u32;

    let peak = spectrum
        .magnitudes
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f32, |acc, &v| acc.max(v))
        .max(f32::MIN_POSITIVE);

    let image = GrayImage::from_fn(width, height, |x, y| {
        // Row 0 is the highest frequency bin
        let bin = (height - 1 - y) as usize;
        let mag = spectrum.magnitudes[x as usize][bin];
        let db = 20.0 * (mag / peak).max(1e-10).log10();
        let level = ((db - DB_FLOOR) / -DB_FLOOR).clamp(0.0, 1.0);
        image::Luma([(level * 255.0) as u8])
    });

    Ok(image)
}

/// Renders a mono signal's spectrogram to a PNG file.
pub fn render_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    path: &str,
) -> Result<(), ExtendError> {
    let image = spectrogram_image(samples, sample_rate)?;
    image
        .save(path)
        .map_err(|e| ExtendError::RenderError(format!("{}: {}", path, e)))
}
