//! Core audio types: sample buffers and processing parameters.

use serde::{Deserialize, Serialize};

use crate::error::ExtendError;

/// A single audio sample (32-bit float, nominal range -1.0 to 1.0).
pub type Sample = f32;

/// Minimum working sample rate for high-frequency synthesis. Input below this
/// rate is upsampled before processing so the target band is representable.
pub const MIN_SYNTHESIS_RATE: u32 = 96_000;

/// Buffer holding audio samples in interleaved format.
///
/// For mono audio, samples are stored sequentially: `[s0, s1, s2, ...]`.
/// For multi-channel audio, samples are interleaved frame by frame:
/// `[c0_0, c1_0, ..., c0_1, c1_1, ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Raw interleaved sample data.
    pub data: Vec<Sample>,
    /// Number of channels (1 = mono, 2 = stereo, ...).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a new audio buffer.
    ///
    /// # Errors
    /// Returns `ExtendError::InvalidChannels` if channels is 0.
    /// Returns `ExtendError::InvalidSampleRate` if sample_rate is 0.
    pub fn new(data: Vec<Sample>, channels: u16, sample_rate: u32) -> Result<Self, ExtendError> {
        if channels == 0 {
            return Err(ExtendError::InvalidChannels(channels));
        }
        if sample_rate == 0 {
            return Err(ExtendError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            data,
            channels,
            sample_rate,
        })
    }

    /// Create a mono buffer from a sample vector.
    pub fn from_mono(data: Vec<Sample>, sample_rate: u32) -> Result<Self, ExtendError> {
        Self::new(data, 1, sample_rate)
    }

    /// Number of frames in the buffer (total samples / channels).
    pub fn num_frames(&self) -> usize {
        self.data.len() / self.channels as usize
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.num_frames() as f64 / self.sample_rate as f64
    }

    /// Returns true if the buffer contains no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a single channel's data as a new vector.
    ///
    /// Returns an empty vector if the channel index is out of range.
    pub fn channel_data(&self, channel: u16) -> Vec<Sample> {
        if channel >= self.channels {
            return Vec::new();
        }
        self.data
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// Create an `AudioBuffer` from separate channel vectors.
    ///
    /// # Errors
    /// Returns an error if there are no channels, if channel lengths differ,
    /// or if the sample rate is invalid.
    pub fn from_channels(
        channels_data: &[Vec<Sample>],
        sample_rate: u32,
    ) -> Result<Self, ExtendError> {
        if channels_data.is_empty() {
            return Err(ExtendError::InvalidChannels(0));
        }
        let num_frames = channels_data[0].len();
        for ch in channels_data {
            if ch.len() != num_frames {
                return Err(ExtendError::InvalidConfig(
                    "all channels must have the same number of samples".to_string(),
                ));
            }
        }
        let num_channels = channels_data.len() as u16;
        let mut data = Vec::with_capacity(num_frames * channels_data.len());
        for i in 0..num_frames {
            for ch in channels_data {
                data.push(ch[i]);
            }
        }
        AudioBuffer::new(data, num_channels, sample_rate)
    }
}

/// Output sample encoding for WAV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    /// 16-bit integer PCM.
    Pcm16,
    /// 24-bit integer PCM.
    Pcm24,
    /// 32-bit integer PCM.
    Pcm32,
    /// 32-bit IEEE float.
    Float32,
}

impl BitDepth {
    /// Parses a bit-depth name as accepted by the CLI (`16`, `24`, `32`, `float`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "16" | "pcm16" => Some(BitDepth::Pcm16),
            "24" | "pcm24" => Some(BitDepth::Pcm24),
            "32" | "pcm32" => Some(BitDepth::Pcm32),
            "float" | "f32" => Some(BitDepth::Float32),
            _ => None,
        }
    }
}

/// Parameters controlling high-frequency synthesis.
///
/// Defaults match the common use case of restoring lossy-encoded material:
/// synthesize from 22 kHz up to 47.5 kHz with a 1.5 kHz transition band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendParams {
    /// Frequency above which content is considered absent and synthesis
    /// begins (Hz, default: 22000).
    pub cutoff_freq: f32,
    /// Highest frequency to synthesize (Hz, default: 47500). Clamped to
    /// Nyquist when the working rate cannot represent it.
    pub target_max_freq: f32,
    /// Width of the original-to-synthetic cross-fade band (Hz, default: 1500).
    pub transition_width: f32,
    /// Amplitude multiplier applied to the synthetic band (default: 1.5).
    pub gain: f32,
    /// STFT window length in samples (default: 8192).
    pub fft_size: usize,
    /// STFT hop length in samples (default: 2048).
    pub hop_size: usize,
    /// Sample rate of the signal being processed (Hz, default: 96000).
    pub sample_rate: u32,
    /// Number of audio channels (default: 1).
    pub channels: u16,
    /// Output sample rate for file conversion (default: the working rate).
    pub output_sample_rate: Option<u32>,
    /// Output sample encoding (default: 32-bit integer PCM).
    pub bit_depth: BitDepth,
}

impl Default for ExtendParams {
    fn default() -> Self {
        Self {
            cutoff_freq: 22_000.0,
            target_max_freq: 47_500.0,
            transition_width: 1_500.0,
            gain: 1.5,
            fft_size: 8192,
            hop_size: 2048,
            sample_rate: MIN_SYNTHESIS_RATE,
            channels: 1,
            output_sample_rate: None,
            bit_depth: BitDepth::Pcm32,
        }
    }
}

impl ExtendParams {
    /// Create parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the synthesis start frequency in Hz.
    pub fn with_cutoff_freq(mut self, cutoff_freq: f32) -> Self {
        self.cutoff_freq = cutoff_freq;
        self
    }

    /// Set the highest synthesized frequency in Hz.
    pub fn with_target_max_freq(mut self, target_max_freq: f32) -> Self {
        self.target_max_freq = target_max_freq;
        self
    }

    /// Set the cross-fade band width in Hz.
    pub fn with_transition_width(mut self, transition_width: f32) -> Self {
        self.transition_width = transition_width;
        self
    }

    /// Set the synthetic band gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Set the STFT window length.
    pub fn with_fft_size(mut self, fft_size: usize) -> Self {
        self.fft_size = fft_size;
        self
    }

    /// Set the STFT hop length.
    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = hop_size;
        self
    }

    /// Set the working sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the number of channels.
    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    /// Set the output sample rate.
    pub fn with_output_sample_rate(mut self, rate: u32) -> Self {
        self.output_sample_rate = Some(rate);
        self
    }

    /// Set the output sample encoding.
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Uniform spacing between adjacent frequency bins in Hz.
    pub fn bin_spacing(&self) -> f32 {
        self.sample_rate as f32 / self.fft_size as f32
    }

    /// Validate all parameters. Called once before processing begins.
    pub fn validate(&self) -> Result<(), ExtendError> {
        if self.fft_size == 0 {
            return Err(ExtendError::InvalidConfig(
                "fft_size must be greater than 0".to_string(),
            ));
        }
        if self.hop_size == 0 {
            return Err(ExtendError::InvalidConfig(
                "hop_size must be greater than 0".to_string(),
            ));
        }
        if self.hop_size >= self.fft_size {
            return Err(ExtendError::InvalidConfig(format!(
                "hop_size ({}) must be less than fft_size ({})",
                self.hop_size, self.fft_size
            )));
        }
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(ExtendError::InvalidConfig(format!(
                "gain must be a non-negative finite number, got {}",
                self.gain
            )));
        }
        if !self.cutoff_freq.is_finite() || self.cutoff_freq <= 0.0 {
            return Err(ExtendError::InvalidConfig(format!(
                "cutoff_freq must be positive and finite, got {}",
                self.cutoff_freq
            )));
        }
        if !self.target_max_freq.is_finite() || self.target_max_freq <= 0.0 {
            return Err(ExtendError::InvalidConfig(format!(
                "target_max_freq must be positive and finite, got {}",
                self.target_max_freq
            )));
        }
        if !self.transition_width.is_finite() || self.transition_width < 0.0 {
            return Err(ExtendError::InvalidConfig(format!(
                "transition_width must be non-negative and finite, got {}",
                self.transition_width
            )));
        }
        if self.channels == 0 {
            return Err(ExtendError::InvalidChannels(self.channels));
        }
        if self.sample_rate == 0 {
            return Err(ExtendError::InvalidSampleRate(self.sample_rate));
        }
        if let Some(rate) = self.output_sample_rate {
            if rate == 0 {
                return Err(ExtendError::InvalidSampleRate(rate));
            }
        }
        Ok(())
    }
}
