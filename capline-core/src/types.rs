//! Core types for capline-core

use crate::error::{ConfigError, SegmentError};
use serde::{Deserialize, Serialize};

/// Timed transcript unit.
///
/// Represents one subtitle cue with start and end times in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Ordinal in the source file, used for stable tie-breaking
    pub index: usize,
    /// Raw cue text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Segment {
    pub fn new(index: usize, text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            index,
            text: text.into(),
            start,
            end,
        }
    }

    /// Reject segments with non-finite or reversed times.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SegmentError::NonFinite {
                index: self.index,
                start: self.start,
                end: self.end,
            });
        }

        if self.end < self.start {
            return Err(SegmentError::Reversed {
                index: self.index,
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }
}

/// Synthesized time slot of one word within its segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordInterval {
    /// Position of the word in its segment
    pub word: usize,
    pub start: f64,
    pub end: f64,
}

/// Content-driven caption style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Default,
    Emphasis,
    Qualifier,
}

/// Why a caption state was excluded from render output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Every band was still occupied at the state's start
    NoFreeBand,
    /// An earlier state in the same band could not be shortened enough
    Collision,
    /// The clip is too short to show the state for the minimum visibility
    Infeasible,
}

/// One on-screen caption with timing, band and style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaptionState {
    /// One or more words joined by a single space
    pub text: String,
    /// Appearance time in seconds, clip-relative
    pub on: f64,
    /// Disappearance time in seconds, clip-relative
    pub off: f64,
    /// Index of the segment that produced this state
    pub segment: usize,
    /// Vertical display level, 0 is the primary band
    pub band: usize,
    /// Set when the state is excluded from render output
    pub skip: Option<SkipReason>,
    pub style: Style,
}

impl CaptionState {
    pub fn new(text: String, on: f64, off: f64, segment: usize) -> Self {
        Self {
            text,
            on,
            off,
            segment,
            band: 0,
            skip: None,
            style: Style::Default,
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.skip.is_some()
    }

    pub fn duration(&self) -> f64 {
        self.off - self.on
    }

    /// Half-open interval overlap test.
    pub fn overlaps(&self, other: &CaptionState) -> bool {
        self.on < other.off && other.on < self.off
    }
}

/// Outbound record handed to renderers: wrapped text, timing, band and style.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Caption {
    /// Display text with line breaks inserted
    pub text: String,
    pub on: f64,
    pub off: f64,
    pub band: usize,
    pub style: Style,
}

/// Render window that segment times are made relative to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClipWindow {
    /// Window start in source seconds
    pub start: f64,
    /// Window end in source seconds, unbounded when `None`
    pub end: Option<f64>,
}

impl Default for ClipWindow {
    fn default() -> Self {
        Self::FULL
    }
}

impl ClipWindow {
    /// Whole source timeline.
    pub const FULL: Self = Self {
        start: 0.0,
        end: None,
    };

    pub fn new(start: f64, end: Option<f64>) -> Result<Self, ConfigError> {
        if !start.is_finite() || start < 0.0 {
            return Err(ConfigError::InvalidTiming {
                name: "clip start",
                value: start,
            });
        }

        if let Some(end) = end
            && (end.is_nan() || end < start)
        {
            return Err(ConfigError::InvalidClip { start, end });
        }

        Ok(Self { start, end })
    }

    /// Clip length in seconds, infinite for an unbounded window.
    pub fn duration(&self) -> f64 {
        self.end.map_or(f64::INFINITY, |end| end - self.start)
    }

    /// Shift a segment onto the clip timeline.
    ///
    /// Returns `None` when nothing of the segment remains inside the window.
    pub fn relative(&self, segment: &Segment) -> Option<(f64, f64)> {
        let start = (segment.start - self.start).max(0.0);
        let end = (segment.end - self.start).min(self.duration());

        (end > start).then_some((start, end))
    }
}
