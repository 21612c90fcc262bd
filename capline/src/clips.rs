//! Clips subcommand - per-caption text clip specifications as JSON.

use crate::cli::{EngineArgs, InputArgs};
use crate::config::InputConfig;
use crate::render::{RenderArgs, RenderConfig};
use crate::source::timeline_from_file;
use capline_core::{Caption, EngineConfig, Style};
use eyre::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

/// CLI arguments for clip specification generation.
#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output JSON path (default: <SUBS>.clips.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Resolved configuration for clip specification generation.
#[derive(Debug)]
pub struct Config {
    pub input: InputConfig,
    pub output: PathBuf,
    pub engine: EngineConfig,
    pub render: RenderConfig,
}

impl TryFrom<Args> for Config {
    type Error = eyre::Error;

    fn try_from(args: Args) -> Result<Self> {
        let input = InputConfig::try_from(args.input)?;
        let output = args
            .output
            .unwrap_or_else(|| input.sibling("clips.json"));

        Ok(Self {
            input,
            output,
            engine: args.engine.try_into()?,
            render: args.render.try_into()?,
        })
    }
}

/// One timed text clip, centered horizontally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipSpec<'a> {
    pub text: &'a str,
    pub start_time: f64,
    pub end_time: f64,
    /// `("center", y)` with `y` measured from the top edge
    pub position: (&'static str, u32),
    pub font_size: u32,
    pub font_color: &'static str,
    pub font_file: &'a str,
    pub bg_color: &'static str,
    pub bg_opacity: f64,
    pub style: Style,
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.input.path.display(),
        output = ?config.output.display(),
        "generating clip specifications"
    );

    let timeline = timeline_from_file(&config.input, config.engine)?;
    let captions = timeline.captions();
    let specs = clip_specs(&captions, &config.render);

    let json = serde_json::to_string_pretty(&specs).wrap_err("failed to serialize clips")?;

    tracing::info!(path = ?config.output.display(), count = specs.len(), "write clips");

    std::fs::write(&config.output, json)
        .wrap_err_with(|| format!("failed to write clips: {:?}", config.output.display()))?;

    Ok(())
}

pub fn clip_specs<'a>(captions: &'a [Caption], layout: &'a RenderConfig) -> Vec<ClipSpec<'a>> {
    captions
        .iter()
        .map(|caption| {
            let look = layout.look(caption.style);

            ClipSpec {
                text: &caption.text,
                start_time: caption.on,
                end_time: caption.off,
                position: ("center", layout.band_y(caption.band)),
                font_size: layout.font_size,
                font_color: look.color,
                font_file: look.font_file,
                bg_color: "black",
                bg_opacity: 0.6,
                style: caption.style,
            }
        })
        .collect()
}
