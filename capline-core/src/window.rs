//! Groups a segment's words into caption states.
//!
//! | Policy   | States per segment | Word coverage            |
//! |----------|--------------------|--------------------------|
//! | Sliding  | one per word       | trailing window, repeats |
//! | Adaptive | one per group      | each word exactly once   |

use crate::EPSILON;
use crate::config::{AdaptiveConfig, Policy, SlidingConfig, Timing};
use crate::types::{CaptionState, SkipReason, WordInterval};
use crate::wrap::text_width;

/// Builds caption states for one segment at a time.
#[derive(Clone, Copy, Debug)]
pub struct WindowBuilder {
    pub policy: Policy,
    pub timing: Timing,
    /// Line budget, bounds slow-speech groups
    pub max_chars_per_line: usize,
    /// Clip-relative end of the timeline; no state ends after it
    pub limit: f64,
}

impl WindowBuilder {
    /// Build states for the words of one segment spanning `[start, end)`.
    ///
    /// `intervals` must hold one entry per word. Segments without words
    /// produce no states.
    pub fn build(
        &self,
        segment: usize,
        span: (f64, f64),
        words: &[&str],
        intervals: &[WordInterval],
    ) -> Vec<CaptionState> {
        debug_assert_eq!(words.len(), intervals.len());

        if words.is_empty() {
            return Vec::new();
        }

        match &self.policy {
            Policy::Sliding(config) => self.sliding(config, segment, span, words, intervals),
            Policy::Adaptive(config) => self.adaptive(config, segment, span, words, intervals),
        }
    }

    /// One state per word showing the trailing `window_size` words.
    fn sliding(
        &self,
        config: &SlidingConfig,
        segment: usize,
        (_, end): (f64, f64),
        words: &[&str],
        intervals: &[WordInterval],
    ) -> Vec<CaptionState> {
        let n = words.len();

        (0..n)
            .map(|i| {
                let from = (i + 1).saturating_sub(config.window_size);
                let text = words[from..=i].join(" ");

                let on = (intervals[i].start - self.timing.lead_in).max(0.0);
                let off = match intervals.get(i + 1) {
                    Some(next) => next.start - self.timing.overlap_trim,
                    None => end,
                };

                self.finish(text, on, off, segment)
            })
            .collect()
    }

    /// Non-overlapping groups sized by the segment's speaking rate.
    fn adaptive(
        &self,
        config: &AdaptiveConfig,
        segment: usize,
        (start, end): (f64, f64),
        words: &[&str],
        intervals: &[WordInterval],
    ) -> Vec<CaptionState> {
        let wps = words.len() as f64 / (end - start);

        tracing::trace!(segment, wps, "speaking rate");

        let mut states = Vec::new();
        let mut i = 0;
        let mut group = 0;

        while i < words.len() {
            let size = self.group_size(config, wps, group, &words[i..]);
            let last = i + size - 1;

            let text = words[i..=last].join(" ");
            let on = intervals[i].start;
            let off = intervals[last].end;

            states.push(self.finish(text, on, off, segment));

            i += size;
            group += 1;
        }

        states
    }

    /// Pick the size of the next group, never more than the words left.
    fn group_size(&self, config: &AdaptiveConfig, wps: f64, group: usize, rest: &[&str]) -> usize {
        let size = if wps > config.fast_wps {
            config.min_chunk
        } else if wps < config.slow_wps {
            let widest = config.max_chunk.min(rest.len());
            if text_width(&rest[..widest].join(" ")) <= self.max_chars_per_line {
                config.max_chunk
            } else {
                config.max_chunk.saturating_sub(1).max(config.min_chunk)
            }
        } else {
            let span = config.max_chunk - config.min_chunk + 1;
            config.min_chunk + group % span
        };

        size.clamp(1, rest.len())
    }

    /// Apply the visibility floor and the timeline bounds.
    ///
    /// `off` never passes `limit`. When the floor does not fit below the
    /// limit, `on` moves earlier (not below zero); if even that fails the
    /// state is kept but marked infeasible.
    fn finish(&self, text: String, on: f64, off: f64, segment: usize) -> CaptionState {
        let min_visibility = self.timing.min_visibility;

        let off = off.max(on + min_visibility).min(self.limit);
        let on = if off - on < min_visibility {
            (off - min_visibility).max(0.0)
        } else {
            on
        };

        let mut state = CaptionState::new(text, on, off, segment);

        if state.duration() + EPSILON < min_visibility {
            tracing::debug!(segment, text = state.text, on, off, "caption cannot fit in clip");
            state.skip = Some(SkipReason::Infeasible);
        }

        state
    }
}
