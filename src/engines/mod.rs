//! Speech synthesis engines.
//!
//! Engine-independent pieces (the audio query model, acceleration mode and
//! error type) always build. Backends are enabled via Cargo features:
//! - `voicevox` - VOICEVOX core (shared library + Open JTalk dictionary required)

pub mod query;

#[cfg(feature = "voicevox")]
pub mod voicevox;

use std::fmt;
use std::path::PathBuf;

use crate::SpeakerId;

/// Hardware backend the engine should synthesize on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum AccelerationMode {
    /// Let the engine pick (GPU when available)
    #[default]
    Auto,
    Cpu,
    Gpu,
}

impl fmt::Display for AccelerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "AUTO",
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("Engine initialization failed (mode={mode}, dict_dir={}): {message}", .dict_dir.display())]
    Initialize {
        mode: AccelerationMode,
        dict_dir: PathBuf,
        message: String,
    },
    #[error("Failed to load model for speaker {speaker_id}: {message}")]
    LoadModel { speaker_id: SpeakerId, message: String },
    #[error("Model for speaker {0} not loaded. Call load_model() first.")]
    ModelNotLoaded(SpeakerId),
    #[error("Audio query failed: {0}")]
    AudioQuery(String),
    #[error("Synthesis failed: {0}")]
    Synthesis(String),
    #[error("Invalid audio query JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fail with [`EngineError::ModelNotLoaded`] unless `loaded` holds.
pub fn ensure_model_loaded(loaded: bool, speaker_id: SpeakerId) -> Result<(), EngineError> {
    if loaded {
        Ok(())
    } else {
        Err(EngineError::ModelNotLoaded(speaker_id))
    }
}

/// Text bound for a C string must not contain interior NUL bytes.
pub fn ensure_c_compatible_text(text: &str) -> Result<(), EngineError> {
    match text.find('\0') {
        Some(pos) => Err(EngineError::AudioQuery(format!(
            "text contains a NUL byte at offset {pos}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::{ensure_c_compatible_text, ensure_model_loaded, AccelerationMode, EngineError};

    #[test]
    fn mode_parses_upper_and_lower_case() {
        assert_eq!(
            AccelerationMode::from_str("GPU", true).unwrap(),
            AccelerationMode::Gpu
        );
        assert_eq!(
            AccelerationMode::from_str("cpu", true).unwrap(),
            AccelerationMode::Cpu
        );
        assert!(AccelerationMode::from_str("TPU", true).is_err());
    }

    #[test]
    fn mode_displays_like_the_flag_value() {
        assert_eq!(AccelerationMode::Auto.to_string(), "AUTO");
        assert_eq!(AccelerationMode::Gpu.to_string(), "GPU");
    }

    #[test]
    fn unloaded_model_is_reported_with_its_speaker() {
        assert!(ensure_model_loaded(true, 3).is_ok());
        assert!(matches!(
            ensure_model_loaded(false, 3),
            Err(EngineError::ModelNotLoaded(3))
        ));
    }

    #[test]
    fn text_with_nul_byte_is_rejected() {
        let err = ensure_c_compatible_text("a\0b").unwrap_err();
        assert!(matches!(err, EngineError::AudioQuery(ref m) if m.contains("offset 1")));
    }

    #[test]
    fn ordinary_text_passes_through() {
        assert!(ensure_c_compatible_text("今日はいい日。").is_ok());
        assert!(ensure_c_compatible_text("").is_ok());
    }
}
