use std::error::Error;
use std::io::Write;
use std::process::ExitCode;

use fortune_voice::cli::{Config, TextSource};
use fortune_voice::engines::voicevox::VoicevoxEngine;
use fortune_voice::fortune::{FortuneClient, LocalText, TextProvider};
use fortune_voice::pipeline::{self, PipelineError};
use fortune_voice::playback::RodioPlayer;

fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,fortune_voice=debug"),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .init();
}

fn text_provider(config: &Config) -> Result<Box<dyn TextProvider>, PipelineError> {
    Ok(match config.text_source {
        TextSource::Remote => Box::new(FortuneClient::from_env()?),
        TextSource::Local => Box::new(LocalText(config.text.clone())),
    })
}

fn main() -> ExitCode {
    init_logging();
    let config = Config::from_args();

    let result = text_provider(&config).and_then(|provider| {
        pipeline::run(
            &config,
            VoicevoxEngine::initialize,
            provider.as_ref(),
            &RodioPlayer,
        )
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        // Already reported by the fortune client.
        Err(PipelineError::MissingCredential) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
