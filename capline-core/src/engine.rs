//! Caption timeline pipeline.

use crate::config::{EngineConfig, Policy};
use crate::error::Result;
use crate::resolve::Resolver;
use crate::style::StyleClassifier;
use crate::timing::{synthesize, tokenize};
use crate::types::{Caption, CaptionState, ClipWindow, Segment, SkipReason};
use crate::window::WindowBuilder;
use crate::wrap::wrap;
use serde::Serialize;

/// Counts collected during one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Segments received
    pub segments: usize,
    /// Segments rejected as malformed
    pub malformed: usize,
    /// Segments entirely outside the clip window
    pub outside: usize,
    /// Segments without any words
    pub empty: usize,
    /// Caption states built
    pub states: usize,
    pub no_free_band: usize,
    pub collision: usize,
    pub infeasible: usize,
}

impl Summary {
    /// States excluded from render output.
    pub fn skipped(&self) -> usize {
        self.no_free_band + self.collision + self.infeasible
    }

    /// States handed to renderers.
    pub fn active(&self) -> usize {
        self.states - self.skipped()
    }

    fn count_skips(&mut self, states: &[CaptionState]) {
        for reason in states.iter().filter_map(|s| s.skip) {
            match reason {
                SkipReason::NoFreeBand => self.no_free_band += 1,
                SkipReason::Collision => self.collision += 1,
                SkipReason::Infeasible => self.infeasible += 1,
            }
        }
    }
}

/// Resolved caption states of one run, sorted by `(on, segment)`.
#[derive(Clone, Debug)]
pub struct Timeline {
    states: Vec<CaptionState>,
    summary: Summary,
    max_chars_per_line: usize,
}

impl Timeline {
    /// All states, skipped ones included.
    pub fn states(&self) -> &[CaptionState] {
        &self.states
    }

    pub fn into_states(self) -> Vec<CaptionState> {
        self.states
    }

    /// States that are rendered.
    pub fn active(&self) -> impl Iterator<Item = &CaptionState> {
        self.states.iter().filter(|s| !s.is_skipped())
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Outbound records with line-wrapped text.
    pub fn captions(&self) -> Vec<Caption> {
        self.active()
            .map(|s| Caption {
                text: wrap(&s.text, self.max_chars_per_line),
                on: s.on,
                off: s.off,
                band: s.band,
                style: s.style,
            })
            .collect()
    }
}

/// Validated caption timeline engine.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    classifier: StyleClassifier,
}

impl Engine {
    /// Validate the configuration and build the engine.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let classifier = StyleClassifier::from_sets(&config.emphasis_words, &config.qualifier_words);

        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &StyleClassifier {
        &self.classifier
    }

    /// Turn segments into a resolved, styled caption timeline.
    ///
    /// Per-segment problems never fail the run: malformed segments are
    /// dropped, empty ones yield nothing.
    pub fn run(&self, segments: &[Segment], clip: ClipWindow) -> Timeline {
        let limit = clip.duration();

        let builder = self.builder(limit);

        let resolver = Resolver {
            band_count: self.config.band_count,
            min_visibility: self.config.timing.min_visibility,
            limit,
        };

        let mut summary = Summary {
            segments: segments.len(),
            ..Summary::default()
        };

        let mut states = Vec::new();

        for segment in segments {
            match self.segment_states(&builder, segment, &clip) {
                Ok(Some(built)) if built.is_empty() => summary.empty += 1,
                Ok(Some(built)) => states.extend(built),
                Ok(None) => summary.outside += 1,
                Err(err) => {
                    tracing::debug!(segment = segment.index, reason = %err, "dropping segment");
                    summary.malformed += 1;
                }
            }
        }

        sort_states(&mut states);

        if let Policy::Adaptive(_) = self.config.policy {
            resolver.shrink(&mut states);
            sort_states(&mut states);
        }

        resolver.assign_bands(&mut states);

        for state in states.iter_mut().filter(|s| !s.is_skipped()) {
            state.style = self.classifier.classify(&state.text);
        }

        summary.states = states.len();
        summary.count_skips(&states);

        tracing::info!(
            segments = summary.segments,
            malformed = summary.malformed,
            states = summary.states,
            skipped = summary.skipped(),
            "caption timeline built"
        );

        Timeline {
            states,
            summary,
            max_chars_per_line: self.config.max_chars_per_line,
        }
    }

    fn builder(&self, limit: f64) -> WindowBuilder {
        WindowBuilder {
            policy: self.config.policy,
            timing: self.config.timing,
            max_chars_per_line: self.config.max_chars_per_line,
            limit,
        }
    }

    /// Build the states of one segment.
    ///
    /// Returns `Ok(None)` when the segment lies outside the clip window.
    fn segment_states(
        &self,
        builder: &WindowBuilder,
        segment: &Segment,
        clip: &ClipWindow,
    ) -> Result<Option<Vec<CaptionState>>> {
        segment.validate()?;

        let Some((start, end)) = clip.relative(segment) else {
            return Ok(None);
        };

        let words = tokenize(&segment.text);
        let per_word = self
            .config
            .policy
            .per_word_minimum(self.config.timing.min_visibility);
        let intervals = synthesize(start, end, words.len(), per_word);

        Ok(Some(builder.build(segment.index, (start, end), &words, &intervals)))
    }
}

/// Stable sort by `(on, segment)`.
fn sort_states(states: &mut [CaptionState]) {
    states.sort_by(|a, b| a.on.total_cmp(&b.on).then(a.segment.cmp(&b.segment)));
}
