//! Capline: subtitle files in, caption timelines out.
//!
//! ## Modules
//!
//! - [`source`] - subtitle decoding (SRT, WebVTT, ASS/SSA) into segments
//! - [`render`] - band and style mapping shared by the renderers
//! - [`filter`] - ffmpeg filter-graph script renderer
//! - [`clips`] - JSON clip specifications for compositing libraries
//! - [`srt`] - caption timeline as SRT subtitles

pub mod cli;
pub mod clips;
pub mod config;
pub mod filter;
pub mod render;
pub mod source;
pub mod srt;
