//! Command-line arguments and the run configuration they resolve to.

use std::path::PathBuf;

use clap::Parser;
use derive_builder::Builder;

use crate::engines::AccelerationMode;
use crate::SpeakerId;

pub const DEFAULT_DICT_DIR: &str = "./open_jtalk_dic_utf_8-1.11";
pub const DEFAULT_TEXT: &str = "この音声は、ボイスボックスを使用して、出力されています。";
pub const DEFAULT_OUT: &str = "./output.wav";

/// Where the text to speak comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TextSource {
    /// Fetch a fortune from the web API (`--text` is ignored)
    #[default]
    Remote,
    /// Speak `--text` without calling the API
    Local,
}

/// Speak a fortune fetched from the web with VOICEVOX.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Acceleration mode
    #[arg(long, value_enum, ignore_case = true, default_value_t = AccelerationMode::Auto)]
    pub mode: AccelerationMode,

    /// Open JTalk dictionary directory
    #[arg(long, default_value = DEFAULT_DICT_DIR)]
    pub dict_dir: PathBuf,

    /// Text to read out (only used with `--text-source local`)
    #[arg(long, default_value = DEFAULT_TEXT)]
    pub text: String,

    /// Output WAV file path
    #[arg(long, default_value = DEFAULT_OUT)]
    pub out: PathBuf,

    /// Speaker ID
    #[arg(long, default_value_t = 0)]
    pub speaker_id: SpeakerId,

    /// Where the text to speak comes from
    #[arg(long, value_enum, default_value_t = TextSource::Remote)]
    pub text_source: TextSource,

    /// Play the file written to `--out` instead of `output.wav`
    #[arg(long)]
    pub play_written_file: bool,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default)]
pub struct Config {
    pub mode: AccelerationMode,
    #[builder(setter(into))]
    pub dict_dir: PathBuf,
    #[builder(setter(into))]
    pub text: String,
    #[builder(setter(into))]
    pub out: PathBuf,
    pub speaker_id: SpeakerId,
    pub text_source: TextSource,
    pub play_written_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: AccelerationMode::Auto,
            dict_dir: PathBuf::from(DEFAULT_DICT_DIR),
            text: DEFAULT_TEXT.to_string(),
            out: PathBuf::from(DEFAULT_OUT),
            speaker_id: 0,
            text_source: TextSource::Remote,
            play_written_file: false,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            mode: args.mode,
            dict_dir: args.dict_dir,
            text: args.text,
            out: args.out,
            speaker_id: args.speaker_id,
            text_source: args.text_source,
            play_written_file: args.play_written_file,
        }
    }
}

impl Config {
    /// Parse the process arguments. Exits with a usage error on bad input.
    pub fn from_args() -> Self {
        Args::parse().into()
    }
}
