//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "capline")]
#[command(about = "Progressive word-timed captions from subtitle files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write an ffmpeg filter-graph script that burns captions into video
    Filter(crate::filter::Args),

    /// Write caption clip specifications as JSON for compositing
    Clips(crate::clips::Args),

    /// Write the caption timeline as SRT subtitles
    Srt(crate::srt::Args),
}

/// Subtitle input and the slice of it to caption.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to input subtitle file (.srt, .vtt, .ass, .ssa)
    pub path: PathBuf,

    /// Clip start on the source timeline, in seconds
    #[arg(long, default_value_t = 0.0, value_name = "SECS")]
    pub clip_start: f64,

    /// Clip end on the source timeline, in seconds (default: unbounded)
    #[arg(long, value_name = "SECS")]
    pub clip_end: Option<f64>,
}

/// Word grouping policy selectable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Trailing window of the last few words, one caption per word
    Sliding,
    /// One to three word groups sized by speaking rate
    Adaptive,
}

/// Engine configuration flags.
///
/// Every flag is optional: unset flags keep the value from `--config`, or
/// from the preset of the selected mode when no file is given.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Word grouping policy (default: adaptive)
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Base engine configuration (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds a caption appears before its word is spoken
    #[arg(long, value_name = "SECS")]
    pub lead_in: Option<f64>,

    /// Shortest time a caption stays on screen, in seconds
    #[arg(long, value_name = "SECS")]
    pub min_visibility: Option<f64>,

    /// Gap before the next word's caption appears, in seconds
    #[arg(long, value_name = "SECS")]
    pub overlap_trim: Option<f64>,

    /// Words shown at once (sliding mode)
    #[arg(long, value_name = "WORDS")]
    pub window_size: Option<usize>,

    /// Smallest word group (adaptive mode)
    #[arg(long, value_name = "WORDS")]
    pub min_chunk: Option<usize>,

    /// Largest word group (adaptive mode)
    #[arg(long, value_name = "WORDS")]
    pub max_chunk: Option<usize>,

    /// Words per second above which speech is fast (adaptive mode)
    #[arg(long, value_name = "WPS")]
    pub fast_wps: Option<f64>,

    /// Words per second below which speech is slow (adaptive mode)
    #[arg(long, value_name = "WPS")]
    pub slow_wps: Option<f64>,

    /// Number of vertical display bands
    #[arg(long = "bands", value_name = "N")]
    pub band_count: Option<usize>,

    /// Line-wrap budget in characters
    #[arg(long = "max-chars", value_name = "N")]
    pub max_chars_per_line: Option<usize>,

    /// Replace the emphasis word list (one word per line)
    #[arg(long, value_name = "FILE")]
    pub emphasis_words: Option<PathBuf>,

    /// Replace the qualifier word list (one word per line)
    #[arg(long, value_name = "FILE")]
    pub qualifier_words: Option<PathBuf>,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    match cli.command {
        Commands::Filter(args) => crate::filter::execute(args.try_into()?),
        Commands::Clips(args) => crate::clips::execute(args.try_into()?),
        Commands::Srt(args) => crate::srt::execute(args.try_into()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_command() {
        let cli = Cli::parse_from(["capline", "filter", "talk.srt"]);

        match &cli.command {
            Commands::Filter(crate::filter::Args {
                input,
                output: None,
                engine,
                ..
            }) if input.path.to_str() == Some("talk.srt") => {
                assert_eq!(input.clip_start, 0.0);
                assert_eq!(input.clip_end, None);
                assert_eq!(engine.mode, None);
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_clips_with_output_and_clip() {
        let cli = Cli::parse_from([
            "capline",
            "clips",
            "talk.vtt",
            "-o",
            "out.json",
            "--clip-start",
            "12.5",
            "--clip-end",
            "40",
        ]);

        match &cli.command {
            Commands::Clips(crate::clips::Args {
                input,
                output: Some(output),
                ..
            }) if output.to_str() == Some("out.json") => {
                assert_eq!(input.clip_start, 12.5);
                assert_eq!(input.clip_end, Some(40.0));
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn parses_srt_with_engine_flags() {
        let cli = Cli::parse_from([
            "capline",
            "srt",
            "talk.ass",
            "--preview",
            "--mode",
            "sliding",
            "--window-size",
            "3",
            "--bands",
            "3",
            "--max-chars",
            "20",
        ]);

        match &cli.command {
            Commands::Srt(crate::srt::Args {
                preview: true,
                engine,
                ..
            }) => {
                assert_eq!(engine.mode, Some(Mode::Sliding));
                assert_eq!(engine.window_size, Some(3));
                assert_eq!(engine.band_count, Some(3));
                assert_eq!(engine.max_chars_per_line, Some(20));
            }
            _ => panic!("unexpected command: {:?}", cli.command),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Cli::try_parse_from(["capline", "srt", "talk.srt", "--mode", "karaoke"]);
        assert!(result.is_err());
    }
}
