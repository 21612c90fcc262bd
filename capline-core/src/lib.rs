//! capline-core: caption timeline synthesis.
//!
//! Turns timed transcript segments into short, precisely timed caption
//! states ready to be composited onto video.
//!
//! # Pipeline
//!
//! 1. [`timing`]: per-word time slots synthesized from segment timing
//! 2. [`window`]: words grouped into caption states (sliding or rate-adaptive)
//! 3. [`resolve`]: states placed in vertical bands, collisions shrunk or skipped
//! 4. [`style`]: whole-caption style from word-set membership
//! 5. [`wrap`]: greedy line filling for display
//!
//! Segments are processed independently; the only global step is the stable
//! sort by `(on, segment)` before resolution.
//!
//! # Quick Start
//!
//! ```
//! use capline_core::{ClipWindow, Engine, EngineConfig, Segment};
//!
//! let engine = Engine::new(EngineConfig::progressive())?;
//! let segments = [Segment::new(0, "Hello there, general Kenobi", 0.0, 2.0)];
//!
//! let timeline = engine.run(&segments, ClipWindow::FULL);
//!
//! for caption in timeline.captions() {
//!     println!("{:.3}-{:.3} [{}] {}", caption.on, caption.off, caption.band, caption.text);
//! }
//! # Ok::<(), capline_core::error::Error>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod resolve;
pub mod style;
pub mod timing;
pub mod types;
pub mod window;
pub mod wrap;

pub use config::{AdaptiveConfig, EngineConfig, Policy, SlidingConfig, Timing};
pub use engine::{Engine, Summary, Timeline};
pub use types::{Caption, CaptionState, ClipWindow, Segment, SkipReason, Style};

/// Tolerance for comparing synthesized timestamps.
pub(crate) const EPSILON: f64 = 1e-9;
