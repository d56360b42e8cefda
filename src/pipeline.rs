//! The fetch → synthesize → write → play sequence.

use std::path::{Path, PathBuf};

use crate::cli::Config;
use crate::engines::{AccelerationMode, EngineError};
use crate::fortune::{FortuneError, TextProvider, FUNCTION_KEY_VAR};
use crate::playback::{playback_path, PlaybackError, Player};
use crate::{AudioQuery, SpeechEngine};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Environment variable '{}' is not set.", FUNCTION_KEY_VAR)]
    MissingCredential,
    #[error("Failed to fetch text: {0}")]
    Fetch(#[source] FortuneError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

impl From<FortuneError> for PipelineError {
    fn from(err: FortuneError) -> Self {
        match err {
            FortuneError::MissingCredential => Self::MissingCredential,
            other => Self::Fetch(other),
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub text: String,
    pub audio_query: AudioQuery,
    pub gpu_mode: bool,
    pub bytes_written: usize,
    pub written_to: PathBuf,
    pub played_from: PathBuf,
}

/// Run the whole sequence once.
///
/// `init` builds the engine from the configured mode and dictionary. Every
/// step runs to completion before the next starts, and the first failure
/// ends the run. A WAV already written is left in place when playback fails.
pub fn run<E, F, T, P>(
    config: &Config,
    init: F,
    provider: &T,
    player: &P,
) -> Result<RunReport, PipelineError>
where
    E: SpeechEngine,
    F: FnOnce(AccelerationMode, &Path) -> Result<E, EngineError>,
    T: TextProvider + ?Sized,
    P: Player + ?Sized,
{
    let speaker_id = config.speaker_id;

    log::info!(
        "Initializing (acceleration_mode={}, open_jtalk_dict_dir={})",
        config.mode,
        config.dict_dir.display()
    );
    let mut engine = init(config.mode, &config.dict_dir)?;

    if let Some(metas) = engine.metas_json() {
        log::debug!("metas={metas}");
    }
    if let Some(devices) = engine.supported_devices_json() {
        log::debug!("supported_devices={devices}");
    }
    let gpu_mode = engine.is_gpu_mode();
    log::debug!("is_gpu_mode={gpu_mode}");

    log::info!("Loading model {speaker_id}");
    engine.load_model(speaker_id)?;
    log::debug!(
        "is_model_loaded({speaker_id})={}",
        engine.is_model_loaded(speaker_id)
    );

    log::info!("Fetching text ({:?})", config.text_source);
    let text = provider.fetch_text()?;
    log::info!("API response: {text}");
    log::info!("API response length: {} chars", text.chars().count());

    log::info!("Creating an AudioQuery from {text:?}");
    let audio_query = engine.audio_query(&text, speaker_id)?;

    log::info!("Synthesizing with {}", audio_query.to_json()?);
    let wav = engine.synthesis(&audio_query, speaker_id)?;

    wav.write_wav(&config.out)
        .map_err(|source| PipelineError::Write {
            path: config.out.clone(),
            source,
        })?;
    match wav.duration_secs() {
        Ok(secs) => log::debug!("WAV duration: {secs:.2}s"),
        Err(e) => log::debug!("Could not read WAV header: {e}"),
    }
    log::info!("Wrote `{}`", config.out.display());

    let played_from = playback_path(config);
    log::info!("Playing `{}`", played_from.display());
    player.play_file(&played_from)?;

    Ok(RunReport {
        text,
        audio_query,
        gpu_mode,
        bytes_written: wav.len(),
        written_to: config.out.clone(),
        played_from,
    })
}
