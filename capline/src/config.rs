//! Configuration types for resolved CLI arguments.
//!
//! This module contains Config structs and their TryFrom implementations.
//! Args structs (for CLI parsing) remain in cli.rs.

use crate::cli::{EngineArgs, InputArgs, Mode};
use capline_core::style::normalize;
use capline_core::{AdaptiveConfig, ClipWindow, EngineConfig, Policy, SlidingConfig, Timing};
use color_eyre::Section;
use eyre::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Resolved subtitle input.
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub path: PathBuf,
    pub clip: ClipWindow,
}

impl TryFrom<InputArgs> for InputConfig {
    type Error = eyre::Error;

    fn try_from(args: InputArgs) -> Result<Self> {
        let clip = ClipWindow::new(args.clip_start, args.clip_end)
            .wrap_err("invalid clip window")
            .suggestion("--clip-end must not precede --clip-start")?;

        Ok(Self {
            path: args.path,
            clip,
        })
    }
}

impl InputConfig {
    /// Output path next to the input, `talk.srt` -> `talk.<suffix>`.
    pub fn sibling(&self, suffix: &str) -> PathBuf {
        self.path.with_extension(suffix)
    }
}

/// Resolve engine flags into a validated [`EngineConfig`].
///
/// Precedence, lowest first: mode preset, `--config` file, individual flags.
impl TryFrom<EngineArgs> for EngineConfig {
    type Error = eyre::Error;

    fn try_from(args: EngineArgs) -> Result<Self> {
        let base = preset(args.mode.unwrap_or(Mode::Adaptive));
        let mut config = match &args.config {
            Some(path) => read_config(path, base)?,
            None => base,
        };

        if let Some(mode) = args.mode
            && mode_of(&config.policy) != mode
        {
            config.policy = preset(mode).policy;
        }

        apply_timing(&mut config.timing, &args);
        apply_policy(&mut config.policy, &args)?;

        if let Some(n) = args.band_count {
            config.band_count = n;
        }
        if let Some(n) = args.max_chars_per_line {
            config.max_chars_per_line = n;
        }
        if let Some(path) = &args.emphasis_words {
            config.emphasis_words = read_word_list(path)?;
        }
        if let Some(path) = &args.qualifier_words {
            config.qualifier_words = read_word_list(path)?;
        }

        config.validate().wrap_err("invalid engine configuration")?;

        Ok(config)
    }
}

fn preset(mode: Mode) -> EngineConfig {
    match mode {
        Mode::Sliding => EngineConfig::progressive(),
        Mode::Adaptive => EngineConfig::adaptive(),
    }
}

fn mode_of(policy: &Policy) -> Mode {
    match policy {
        Policy::Sliding(_) => Mode::Sliding,
        Policy::Adaptive(_) => Mode::Adaptive,
    }
}

fn apply_timing(timing: &mut Timing, args: &EngineArgs) {
    if let Some(v) = args.lead_in {
        timing.lead_in = v;
    }
    if let Some(v) = args.min_visibility {
        timing.min_visibility = v;
    }
    if let Some(v) = args.overlap_trim {
        timing.overlap_trim = v;
    }
}

fn apply_policy(policy: &mut Policy, args: &EngineArgs) -> Result<()> {
    match policy {
        Policy::Sliding(SlidingConfig { window_size }) => {
            if args.min_chunk.is_some()
                || args.max_chunk.is_some()
                || args.fast_wps.is_some()
                || args.slow_wps.is_some()
            {
                return Err(eyre::eyre!("chunk and speaking-rate flags need adaptive mode"))
                    .suggestion("pass --mode adaptive, or drop the adaptive-only flags");
            }
            if let Some(n) = args.window_size {
                *window_size = n;
            }
        }
        Policy::Adaptive(AdaptiveConfig {
            min_chunk,
            max_chunk,
            fast_wps,
            slow_wps,
        }) => {
            if args.window_size.is_some() {
                return Err(eyre::eyre!("--window-size needs sliding mode"))
                    .suggestion("pass --mode sliding, or drop --window-size");
            }
            if let Some(n) = args.min_chunk {
                *min_chunk = n;
            }
            if let Some(n) = args.max_chunk {
                *max_chunk = n;
            }
            if let Some(v) = args.fast_wps {
                *fast_wps = v;
            }
            if let Some(v) = args.slow_wps {
                *slow_wps = v;
            }
        }
    }

    Ok(())
}

/// Read an engine configuration from a JSON file, layered over `base`.
fn read_config(path: &Path, base: EngineConfig) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config: {:?}", path.display()))?;

    let overlay: Value = serde_json::from_str(&content)
        .wrap_err_with(|| format!("failed to parse config: {:?}", path.display()))?;

    let mut merged = serde_json::to_value(base).wrap_err("failed to encode preset")?;
    merge_json(&mut merged, overlay);

    serde_json::from_value(merged)
        .wrap_err_with(|| format!("invalid config: {:?}", path.display()))
        .note("fields left out fall back to the preset of the selected mode")
}

/// Recursively overlay objects; any other value replaces the base.
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Read a newline-separated word list.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn read_word_list(path: &Path) -> Result<BTreeSet<String>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read word list: {:?}", path.display()))?;

    let words = parse_word_list(&content);

    if words.is_empty() {
        bail!("word list is empty: {:?}", path.display());
    }

    tracing::debug!(path = ?path.display(), count = words.len(), "loaded word list");

    Ok(words)
}

fn parse_word_list(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalize)
        .filter(|word| !word.is_empty())
        .collect()
}
