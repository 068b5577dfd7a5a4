//! The spectral core: short-time transform and high-band synthesis.

pub mod stft;
pub mod synth;

pub use stft::{bin_frequencies, forward, inverse, SpectralFrames, Spectrum};
pub use synth::{decay_envelope, extend_spectrum, locate_band, transition_weights, HighBand};
