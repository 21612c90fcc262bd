//! Subtitle decoding into engine segments.
//!
//! Supports SRT (via `srtlib`), WebVTT and ASS/SSA. Cues are indexed by their
//! ordinal in file order; cue text is passed through unchanged apart from
//! joining lines and removing VTT tags and ASS override blocks.

use crate::config::InputConfig;
use capline_core::{Engine, EngineConfig, Segment, Timeline};
use color_eyre::Section;
use eyre::{Context, OptionExt, Result, eyre};
use srtlib::{Subtitle, Timestamp};
use std::path::Path;

/// Subtitle container, detected from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    Ass,
}

impl SubtitleFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_eyre("subtitle file has no extension")
            .suggestion("use one of: .srt, .vtt, .ass, .ssa")?;

        match ext.as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" => Ok(Self::Vtt),
            "ass" | "ssa" => Ok(Self::Ass),
            _ => Err(eyre!("unsupported subtitle format: .{ext}"))
                .suggestion("use one of: .srt, .vtt, .ass, .ssa"),
        }
    }

    /// Decode file content in this format.
    ///
    /// Cues that fail to decode are logged and skipped; the rest are kept.
    pub fn parse(self, content: &str) -> Vec<Segment> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let cues = match self {
            Self::Srt => parse_srt(content),
            Self::Vtt => parse_vtt(content),
            Self::Ass => parse_ass(content),
        };

        cues.into_iter()
            .enumerate()
            .map(|(index, (text, start, end))| Segment::new(index, text, start, end))
            .collect()
    }
}

type Cue = (String, f64, f64);

/// Read and decode a subtitle file.
pub fn read_segments(path: &Path) -> Result<Vec<Segment>> {
    let format = SubtitleFormat::from_path(path)?;

    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read subtitles: {:?}", path.display()))?;

    let segments = format.parse(&content);

    tracing::info!(path = ?path.display(), ?format, count = segments.len(), "read subtitles");

    Ok(segments)
}

/// Decode the input file and run the engine over it.
pub fn timeline_from_file(input: &InputConfig, config: EngineConfig) -> Result<Timeline> {
    let segments = read_segments(&input.path)?;
    let engine = Engine::new(config).wrap_err("invalid engine configuration")?;

    let timeline = engine.run(&segments, input.clip);

    if timeline.summary().active() == 0 {
        tracing::warn!(path = ?input.path.display(), "no captions to render");
    }

    Ok(timeline)
}

fn parse_srt(content: &str) -> Vec<Cue> {
    blocks(content)
        .into_iter()
        .filter_map(|block| match Subtitle::parse(block.join("\n")) {
            Ok(s) => {
                let text = s.text.lines().map(str::trim).collect::<Vec<_>>().join(" ");
                Some((text, timestamp_secs(&s.start_time), timestamp_secs(&s.end_time)))
            }
            Err(e) => {
                let cue = block.first().copied();
                tracing::debug!(cue, reason = %e, "skipping malformed srt cue");
                None
            }
        })
        .collect()
}

/// Group lines into blocks separated by blank or whitespace-only lines.
fn blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn timestamp_secs(ts: &Timestamp) -> f64 {
    let (h, m, s, ms) = ts.get();
    f64::from(h) * 3600.0 + f64::from(m) * 60.0 + f64::from(s) + f64::from(ms) / 1000.0
}

/// WebVTT cues; header, `NOTE`, `STYLE` and `REGION` blocks are skipped.
fn parse_vtt(content: &str) -> Vec<Cue> {
    blocks(content)
        .into_iter()
        .filter_map(|lines| {
            let timing = lines.iter().position(|l| l.contains("-->"))?;

            let first = lines.first()?.trim_start();
            if ["WEBVTT", "NOTE", "STYLE", "REGION"]
                .iter()
                .any(|kw| first.starts_with(kw))
            {
                return None;
            }

            let (start, end) = lines[timing].split_once("-->")?;
            // Cue settings may follow the end time
            let end = end.split_whitespace().next()?;

            match (parse_clock(start.trim()), parse_clock(end)) {
                (Some(start), Some(end)) => {
                    let text = collapse_whitespace(&strip_spans(
                        &lines[timing + 1..].join(" "),
                        '<',
                        '>',
                    ));
                    Some((text, start, end))
                }
                _ => {
                    tracing::debug!(line = lines[timing], "skipping cue with bad timing");
                    None
                }
            }
        })
        .collect()
}

/// `Dialogue:` lines of the `[Events]` section.
fn parse_ass(content: &str) -> Vec<Cue> {
    let mut in_events = false;
    let mut cues = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_events = line.eq_ignore_ascii_case("[events]");
            continue;
        }

        if !in_events {
            continue;
        }

        let Some(rest) = line.strip_prefix("Dialogue:") else {
            continue;
        };

        // Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
        let fields: Vec<&str> = rest.splitn(10, ',').collect();
        let [_, start, end, _, _, _, _, _, _, text] = fields[..] else {
            continue;
        };

        match (parse_clock(start.trim()), parse_clock(end.trim())) {
            (Some(start), Some(end)) => cues.push((clean_ass_text(text), start, end)),
            _ => tracing::debug!(line, "skipping dialogue with bad timing"),
        }
    }

    cues
}

/// Drop `{...}` override blocks and turn hard breaks into spaces.
fn clean_ass_text(text: &str) -> String {
    let text = strip_spans(text, '{', '}')
        .replace("\\N", " ")
        .replace("\\n", " ")
        .replace("\\h", " ");

    collapse_whitespace(&text)
}

/// Remove every `open ... close` span, nested spans included.
fn strip_spans(text: &str, open: char, close: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        if c == open {
            depth += 1;
        } else if c == close && depth > 0 {
            depth -= 1;
        } else if depth == 0 {
            out.push(c);
        }
    }

    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `[H:]MM:SS.frac` with `.` or `,` before the fraction.
fn parse_clock(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split(':').collect();

    let (h, m, sec) = match parts[..] {
        [h, m, sec] => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?, sec),
        [m, sec] => (0, m.parse::<u32>().ok()?, sec),
        _ => return None,
    };

    let sec: f64 = sec.replace(',', ".").parse().ok()?;
    if !sec.is_finite() || sec < 0.0 {
        return None;
    }

    Some(f64::from(h) * 3600.0 + f64::from(m) * 60.0 + sec)
}
