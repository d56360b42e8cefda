//! Synchronous WAV playback.

use std::path::{Path, PathBuf};

use crate::cli::Config;

/// File played back after synthesis unless `play_written_file` is set.
pub const PLAYBACK_FILE: &str = "output.wav";

#[derive(thiserror::Error, Debug)]
pub enum PlaybackError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Audio output device error: {0}")]
    Device(String),
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
}

/// Plays an audio file, blocking until it has finished.
pub trait Player {
    fn play_file(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// The file the pipeline plays.
///
/// This is the literal `output.wav` in the working directory, not `config.out`,
/// unless `play_written_file` is set.
pub fn playback_path(config: &Config) -> PathBuf {
    if config.play_written_file {
        config.out.clone()
    } else {
        PathBuf::from(PLAYBACK_FILE)
    }
}

/// Plays through the default output device with rodio.
#[cfg(feature = "playback")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RodioPlayer;

#[cfg(feature = "playback")]
impl Player for RodioPlayer {
    fn play_file(&self, path: &Path) -> Result<(), PlaybackError> {
        use std::fs::File;
        use std::io::BufReader;

        use rodio::{Decoder, OutputStream, Sink};

        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        // The stream must stay alive until the sink drains.
        let (_stream, handle) =
            OutputStream::try_default().map_err(|e| PlaybackError::Device(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Device(e.to_string()))?;

        sink.append(source);
        sink.sleep_until_end();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{playback_path, PLAYBACK_FILE};
    use crate::cli::ConfigBuilder;

    #[test]
    fn plays_output_wav_even_when_out_differs() {
        let config = ConfigBuilder::default()
            .out("/tmp/somewhere/else.wav")
            .build()
            .unwrap();
        assert_eq!(playback_path(&config), Path::new(PLAYBACK_FILE));
    }

    #[test]
    fn toggle_plays_the_written_file() {
        let config = ConfigBuilder::default()
            .out("/tmp/somewhere/else.wav")
            .play_written_file(true)
            .build()
            .unwrap();
        assert_eq!(playback_path(&config), Path::new("/tmp/somewhere/else.wav"));
    }

    #[cfg(feature = "playback")]
    #[test]
    fn missing_file_fails_before_touching_the_device() {
        use super::{PlaybackError, Player, RodioPlayer};

        let dir = tempfile::tempdir().unwrap();
        let err = RodioPlayer
            .play_file(&dir.path().join("nope.wav"))
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Open { .. }));
    }
}
