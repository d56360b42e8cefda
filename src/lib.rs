//! # fortune-voice
//!
//! Fetches a short fortune text from a web API, speaks it with a
//! text-to-speech engine, writes the result to a WAV file and plays it back.
//!
//! ## Features
//!
//! - **voicevox**: VOICEVOX core backend (needs the VOICEVOX shared library and
//!   an Open JTalk dictionary at runtime)
//! - **playback**: Audio output through the default device via rodio
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! fortune-voice = { version = "2026.10", features = ["voicevox", "playback"] }
//! ```
//!
//! ```ignore
//! use fortune_voice::{
//!     cli::Config, engines::voicevox::VoicevoxEngine, fortune::FortuneClient,
//!     pipeline, playback::RodioPlayer,
//! };
//!
//! let config = Config::default();
//! let report = pipeline::run(
//!     &config,
//!     VoicevoxEngine::initialize,
//!     &FortuneClient::from_env()?,
//!     &RodioPlayer,
//! )?;
//! println!("wrote {} bytes", report.bytes_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod engines;
pub mod fortune;
pub mod pipeline;
pub mod playback;

use std::io::Cursor;
use std::path::Path;

pub use engines::query::AudioQuery;
pub use engines::EngineError;

/// Integer selecting which voice model the engine uses.
pub type SpeakerId = u32;

/// The result of a synthesis operation.
///
/// Holds the encoded WAV container exactly as the engine produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// WAV file bytes (RIFF header included)
    pub wav: Vec<u8>,
}

impl SynthesisResult {
    pub fn new(wav: Vec<u8>) -> Self {
        Self { wav }
    }

    /// Write the bytes to `path`, creating or truncating the file.
    pub fn write_wav(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.wav)
    }

    /// Duration of the audio in seconds, read from the WAV header.
    pub fn duration_secs(&self) -> Result<f64, hound::Error> {
        let reader = hound::WavReader::new(Cursor::new(&self.wav))?;
        let spec = reader.spec();
        Ok(reader.duration() as f64 / spec.sample_rate as f64)
    }

    pub fn len(&self) -> usize {
        self.wav.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wav.is_empty()
    }
}

/// Common interface for text-to-speech engines driven by the pipeline.
///
/// Construction (binding an acceleration mode and dictionary directory) is
/// left to each engine; the pipeline receives an initializer instead.
pub trait SpeechEngine {
    /// Whether the engine ended up running on a GPU.
    fn is_gpu_mode(&self) -> bool;

    /// Load the voice model for `speaker_id`.
    fn load_model(&mut self, speaker_id: SpeakerId) -> Result<(), EngineError>;

    fn is_model_loaded(&self, speaker_id: SpeakerId) -> bool;

    /// Build the phonetic/prosodic plan for `text` spoken by `speaker_id`.
    fn audio_query(&self, text: &str, speaker_id: SpeakerId) -> Result<AudioQuery, EngineError>;

    /// Render an audio query to a WAV container.
    fn synthesis(
        &self,
        query: &AudioQuery,
        speaker_id: SpeakerId,
    ) -> Result<SynthesisResult, EngineError>;

    /// Speaker metadata as JSON, if the engine exposes it.
    fn metas_json(&self) -> Option<String> {
        None
    }

    /// Devices the engine can run on, as JSON, if the engine exposes it.
    fn supported_devices_json(&self) -> Option<String> {
        None
    }
}
