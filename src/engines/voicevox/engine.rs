use std::ffi::CString;
use std::path::Path;

use vvcore::{AudioQueryOptions, SynthesisOptions, VoicevoxCore};

use crate::engines::{
    ensure_c_compatible_text, ensure_model_loaded, AccelerationMode, EngineError,
};
use crate::{AudioQuery, SpeakerId, SpeechEngine, SynthesisResult};

/// CPU threads handed to the core. `0` lets the core choose.
const CPU_NUM_THREADS: u16 = 0;

/// VOICEVOX core engine bound to one acceleration mode and dictionary.
///
/// Models are loaded on demand with [`SpeechEngine::load_model`]; nothing is
/// loaded at initialization.
pub struct VoicevoxEngine {
    core: VoicevoxCore,
}

impl VoicevoxEngine {
    /// Initialize the core for `mode` with the Open JTalk dictionary at `dict_dir`.
    pub fn initialize(mode: AccelerationMode, dict_dir: &Path) -> Result<Self, EngineError> {
        let init_error = |message: String| EngineError::Initialize {
            mode,
            dict_dir: dict_dir.to_path_buf(),
            message,
        };

        let dir = CString::new(dict_dir.to_string_lossy().into_owned())
            .map_err(|e| init_error(format!("dictionary path contains a NUL byte: {e}")))?;

        let core = VoicevoxCore::new_from_options(
            core_mode(mode),
            CPU_NUM_THREADS,
            false,
            dir.as_c_str(),
        )
        .map_err(|code| init_error(VoicevoxCore::error_result_to_message(code).to_string()))?;

        Ok(Self { core })
    }
}

fn core_mode(mode: AccelerationMode) -> vvcore::AccelerationMode {
    match mode {
        AccelerationMode::Auto => vvcore::AccelerationMode::Auto,
        AccelerationMode::Cpu => vvcore::AccelerationMode::CPU,
        AccelerationMode::Gpu => vvcore::AccelerationMode::GPU,
    }
}

impl SpeechEngine for VoicevoxEngine {
    fn is_gpu_mode(&self) -> bool {
        self.core.is_gpu_mode()
    }

    fn load_model(&mut self, speaker_id: SpeakerId) -> Result<(), EngineError> {
        self.core
            .load_model(speaker_id)
            .map_err(|code| EngineError::LoadModel {
                speaker_id,
                message: VoicevoxCore::error_result_to_message(code).to_string(),
            })
    }

    fn is_model_loaded(&self, speaker_id: SpeakerId) -> bool {
        self.core.is_model_loaded(speaker_id)
    }

    fn audio_query(&self, text: &str, speaker_id: SpeakerId) -> Result<AudioQuery, EngineError> {
        ensure_model_loaded(self.is_model_loaded(speaker_id), speaker_id)?;
        // The core converts the text to a C string and panics on interior NULs.
        ensure_c_compatible_text(text)?;

        let json = self
            .core
            .audio_query(text, speaker_id, AudioQueryOptions { kana: false })
            .map_err(|code| {
                EngineError::AudioQuery(VoicevoxCore::error_result_to_message(code).to_string())
            })?;

        AudioQuery::from_json(json.as_str())
    }

    fn synthesis(
        &self,
        query: &AudioQuery,
        speaker_id: SpeakerId,
    ) -> Result<SynthesisResult, EngineError> {
        ensure_model_loaded(self.is_model_loaded(speaker_id), speaker_id)?;

        let json = query.to_json()?;
        let wav = self
            .core
            .synthesis(
                &json,
                speaker_id,
                SynthesisOptions {
                    enable_interrogative_upspeak: true,
                },
            )
            .map_err(|code| {
                EngineError::Synthesis(VoicevoxCore::error_result_to_message(code).to_string())
            })?;

        log::debug!("VOICEVOX returned {} bytes of WAV", wav.as_slice().len());
        Ok(SynthesisResult::new(wav.as_slice().to_vec()))
    }

    fn metas_json(&self) -> Option<String> {
        Some(VoicevoxCore::get_metas_json().to_string())
    }

    fn supported_devices_json(&self) -> Option<String> {
        Some(VoicevoxCore::get_supported_devices_json().to_string())
    }
}
