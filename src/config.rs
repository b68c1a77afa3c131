use std::path::Path;

use crate::error::RecognitionError;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecognizerConfig {
    /// Path to the `commands.json` label-to-class-index mapping. Empty means
    /// the vocabulary starts out blank and grows through the template store.
    #[serde(default)]
    pub commands_path: String,
    #[serde(default = "default_coefficient_count")]
    pub coefficient_count: usize,
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,
    #[serde(default = "default_hop_length")]
    pub hop_length: usize,
    /// Canonical utterance length in seconds; every recording is framed to
    /// the frame count this duration spans at `sample_rate_hz`/`hop_length`.
    #[serde(default = "default_sound_duration_s")]
    pub sound_duration_s: f64,
    /// Normalized-cost ceiling for template matching. Strictly above it the
    /// query is rejected as unknown; exactly at it the match is accepted.
    #[serde(default = "default_rejection_threshold")]
    pub rejection_threshold: f32,
    /// Per-coefficient standardization of framed features.
    #[serde(default)]
    pub standardize: bool,
}

fn default_coefficient_count() -> usize {
    RecognizerConfig::DEFAULT_COEFFICIENT_COUNT
}
fn default_sample_rate_hz() -> u32 {
    RecognizerConfig::DEFAULT_SAMPLE_RATE_HZ
}
fn default_hop_length() -> usize {
    RecognizerConfig::DEFAULT_HOP_LENGTH
}
fn default_sound_duration_s() -> f64 {
    RecognizerConfig::DEFAULT_SOUND_DURATION_S
}
fn default_rejection_threshold() -> f32 {
    RecognizerConfig::DEFAULT_REJECTION_THRESHOLD
}

impl RecognizerConfig {
    pub const DEFAULT_COEFFICIENT_COUNT: usize = 24;
    pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 22_050;
    pub const DEFAULT_HOP_LENGTH: usize = 512;
    pub const DEFAULT_SOUND_DURATION_S: f64 = 3.1;
    pub const DEFAULT_REJECTION_THRESHOLD: f32 = 0.5;

    pub fn load(path: &Path) -> Result<Self, RecognitionError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| RecognitionError::io("read recognizer config", e))?;
        serde_json::from_str(&data).map_err(|e| RecognitionError::json("parse recognizer config", e))
    }

    /// Canonical frame count every feature sequence is framed to.
    pub fn target_frames(&self) -> usize {
        (self.sound_duration_s * self.sample_rate_hz as f64 / self.hop_length as f64).ceil()
            as usize
    }
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            commands_path: String::new(),
            coefficient_count: Self::DEFAULT_COEFFICIENT_COUNT,
            sample_rate_hz: Self::DEFAULT_SAMPLE_RATE_HZ,
            hop_length: Self::DEFAULT_HOP_LENGTH,
            sound_duration_s: Self::DEFAULT_SOUND_DURATION_S,
            rejection_threshold: Self::DEFAULT_REJECTION_THRESHOLD,
            standardize: false,
        }
    }
}
