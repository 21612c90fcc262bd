//! Filter subcommand - ffmpeg filter-graph script that burns captions in.
//!
//! The script is a single line for `ffmpeg -filter_complex_script`:
//! `[0:v]format=yuv420p,drawbox=...,drawtext=...,drawtext=... [v]`.

use crate::cli::{EngineArgs, InputArgs};
use crate::config::InputConfig;
use crate::render::{RenderArgs, RenderConfig};
use crate::source::timeline_from_file;
use capline_core::{Caption, EngineConfig};
use eyre::{Context, Result};
use std::path::PathBuf;

/// Caption panel drawn behind the lowest bands.
const BACKDROP: &str = "drawbox=x=0:y=h-340:w=iw:h=320:color=black@0.65:t=fill";

/// CLI arguments for filter script generation.
#[derive(clap::Args, Debug)]
pub struct Args {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output script path (default: <SUBS>.filter.txt)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Resolved configuration for filter script generation.
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
            .unwrap_or_else(|| input.sibling("filter.txt"));

        Ok(Self {
            input,
            output,
            engine: args.engine.try_into()?,
            render: args.render.try_into()?,
        })
    }
}

pub fn execute(config: Config) -> Result<()> {
    tracing::info!(
        input = ?config.input.path.display(),
        output = ?config.output.display(),
        "generating filter script"
    );

    let timeline = timeline_from_file(&config.input, config.engine)?;
    let script = filter_script(&timeline.captions(), &config.render);

    tracing::info!(path = ?config.output.display(), "write filter script");

    std::fs::write(&config.output, script)
        .wrap_err_with(|| format!("failed to write filter script: {:?}", config.output.display()))?;

    Ok(())
}

/// Build the filter graph for the given captions.
pub fn filter_script(captions: &[Caption], layout: &RenderConfig) -> String {
    let mut script = String::from("[0:v]format=yuv420p,");
    script.push_str(BACKDROP);

    for caption in captions {
        let look = layout.look(caption.style);
        // drawtext has no reliable line breaks inside a script
        let text = caption.text.replace('\n', " ");

        script.push_str(&format!(
            ",drawtext=fontfile='{font}':text='{text}':\
             enable='between(t,{on:.3},{off:.3})':\
             x=(w-tw)/2:y=h-{y}:\
             fontsize={size}:fontcolor={color}:\
             box=1:boxcolor=black@0.6:boxborderw=20",
            font = escape_drawtext(look.font_file),
            text = escape_drawtext(&text),
            on = caption.on,
            off = caption.off,
            y = layout.band_offset(caption.band),
            size = layout.font_size,
            color = look.color,
        ));
    }

    script.push_str(" [v]");
    script
}

/// Escape characters that are special to drawtext or the filter parser.
pub fn escape_drawtext(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | ':' | ',' | '%' | '[' | ']' | '=' | '#' | ';' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }

    out
}
