//! Srt subcommand - caption timeline as SRT subtitles.
//!
//! One cue per rendered caption. Wrapped lines stay on separate cue lines.

use crate::cli::{EngineArgs, InputArgs};
use crate::config::InputConfig;
use crate::source::timeline_from_file;
use capline_core::{Caption, EngineConfig};
use eyre::{Context, Result};
use srtlib::{Subtitle, Timestamp};
use std::path::PathBuf;

/// CLI arguments for SRT export.
#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output SRT path (default: <SUBS>.captions.srt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the first and last cues to stdout
    #[arg(long)]
    pub preview: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Resolved configuration for SRT export.
#[derive(Debug)]
pub struct Config {
    pub input: InputConfig,
    pub output: PathBuf,
    pub preview: bool,
    pub engine: EngineConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let input = InputConfig::try_from(args.input)?;
        let output = args
            .output
            .unwrap_or_else(|| input.sibling("captions.srt"));

        Ok(Self {
            input,
            output,
            preview: args.preview,
            engine: args.engine.try_into()?,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.input.path.display(),
        output = ?config.output.display(),
        "exporting captions"
    );

    let timeline = timeline_from_file(&config.input, config.engine)?;
    let subtitles = to_subtitles(&timeline.captions());

    tracing::info!(path = ?config.output.display(), "write srt file");

    std::fs::write(&config.output, display_subtitles(&subtitles) + "\n")
        .wrap_err_with(|| format!("failed to write srt: {:?}", config.output.display()))?;

    if config.preview {
        println!("{}", preview_subtitles(&subtitles, 3, 3));
    }

    Ok(())
}

/// Convert captions to SRT subtitles, numbered from 1.
pub fn to_subtitles(captions: &[Caption]) -> Vec<Subtitle> {
    captions
        .iter()
        .zip(1..)
        .map(|(c, i)| {
            Subtitle::new(
                i,
                secs_to_timestamp(c.on),
                secs_to_timestamp(c.off),
                c.text.clone(),
            )
        })
        .collect()
}

/// Convert seconds to an SRT timestamp, rounded to the millisecond.
fn secs_to_timestamp(secs: f64) -> Timestamp {
    Timestamp::from_milliseconds((secs.max(0.0) * 1000.0).round() as u32)
}

/// Format subtitles as SRT file content.
pub fn display_subtitles(subtitles: &[Subtitle]) -> String {
    subtitles
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Display preview of subtitles (first and last entries).
pub fn preview_subtitles(subtitles: &[Subtitle], head_count: usize, tail_count: usize) -> String {
    let total = subtitles.len();

    if total <= head_count + tail_count {
        return display_subtitles(subtitles);
    }

    let head = display_subtitles(&subtitles[..head_count]);
    let tail = display_subtitles(&subtitles[total - tail_count..]);
    format!("{head}\n\n...\n\n{tail}")
}
