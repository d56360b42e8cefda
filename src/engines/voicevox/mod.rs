//! VOICEVOX core text-to-speech engine.
//!
//! Wraps the VOICEVOX core shared library through the `vvcore` bindings. The
//! engine turns Japanese text into an [`AudioQuery`](crate::AudioQuery) using
//! Open JTalk, then renders that query to a 24kHz WAV container.
//!
//! # System Requirements
//!
//! - The VOICEVOX core shared library (`libvoicevox_core.so`, `voicevox_core.dll`
//!   or `libvoicevox_core.dylib`) must be on the linker and loader path.
//! - An Open JTalk dictionary directory, by default `./open_jtalk_dic_utf_8-1.11`.
//!
//! # Directory Layout
//!
//! ```text
//! ./
//! ├── libvoicevox_core.so
//! ├── model/                         # voice models shipped with the core
//! └── open_jtalk_dic_utf_8-1.11/     # dictionary (sys.dic, matrix.bin, ...)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use fortune_voice::{engines::{voicevox::VoicevoxEngine, AccelerationMode}, SpeechEngine};
//! use std::path::Path;
//!
//! let mut engine = VoicevoxEngine::initialize(
//!     AccelerationMode::Auto,
//!     Path::new("./open_jtalk_dic_utf_8-1.11"),
//! )?;
//! engine.load_model(0)?;
//!
//! let query = engine.audio_query("こんにちは", 0)?;
//! let wav = engine.synthesis(&query, 0)?;
//! wav.write_wav(Path::new("hello.wav"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;

pub use engine::VoicevoxEngine;
