//! Canvas layout shared by the renderers.
//!
//! The engine hands out abstract bands and styles; this is where they become
//! pixel offsets, font files and colors.

use capline_core::Style;
use eyre::{Result, bail};

/// Canvas and typography flags.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Video width in pixels
    #[arg(long, default_value_t = 1080)]
    pub width: u32,

    /// Video height in pixels
    #[arg(long, default_value_t = 1920)]
    pub height: u32,

    /// Caption font size in points
    #[arg(long, default_value_t = 54)]
    pub font_size: u32,

    /// Font file for regular captions
    #[arg(long, default_value = "Poppins-Black.ttf", value_name = "FILE")]
    pub font: String,

    /// Font file for emphasis captions
    #[arg(long, default_value = "Poppins-ExtraBold.ttf", value_name = "FILE")]
    pub emphasis_font: String,

    /// Font file for qualifier captions
    #[arg(long, default_value = "Poppins-BlackItalic.ttf", value_name = "FILE")]
    pub qualifier_font: String,

    /// Distance of each band from the bottom edge, in pixels
    #[arg(long, value_delimiter = ',', default_value = "260,320", value_name = "PX")]
    pub band_offsets: Vec<u32>,

    /// Extra distance for each band beyond the listed offsets
    #[arg(long, default_value_t = 60, value_name = "PX")]
    pub band_step: u32,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            font_size: 54,
            font: "Poppins-Black.ttf".to_string(),
            emphasis_font: "Poppins-ExtraBold.ttf".to_string(),
            qualifier_font: "Poppins-BlackItalic.ttf".to_string(),
            band_offsets: vec![260, 320],
            band_step: 60,
        }
    }
}

/// Resolved canvas layout.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub font_size: u32,
    fonts: [String; 3],
    band_offsets: Vec<u32>,
    band_step: u32,
}

/// Font and color for one caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Look<'a> {
    pub font_file: &'a str,
    pub color: &'static str,
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = eyre::Error;

    fn try_from(args: RenderArgs) -> Result<Self> {
        if args.width == 0 || args.height == 0 {
            bail!("canvas must be non-empty: {}x{}", args.width, args.height);
        }
        if args.band_offsets.is_empty() {
            bail!("at least one band offset is required");
        }
        if let Some(&px) = args.band_offsets.iter().find(|&&px| px > args.height) {
            bail!("band offset {px}px lies above a {}px canvas", args.height);
        }

        Ok(Self {
            width: args.width,
            height: args.height,
            font_size: args.font_size,
            fonts: [args.font, args.emphasis_font, args.qualifier_font],
            band_offsets: args.band_offsets,
            band_step: args.band_step,
        })
    }
}

impl RenderConfig {
    /// Distance from the bottom edge for a band.
    ///
    /// Bands past the listed offsets keep stacking upward by `band_step`.
    pub fn band_offset(&self, band: usize) -> u32 {
        match self.band_offsets.get(band) {
            Some(&px) => px,
            None => {
                let last = self.band_offsets.last().copied().unwrap_or_default();
                let extra = (band + 1 - self.band_offsets.len()) as u32;
                last + extra * self.band_step
            }
        }
    }

    /// Distance from the top edge for a band, clamped to the canvas.
    pub fn band_y(&self, band: usize) -> u32 {
        self.height.saturating_sub(self.band_offset(band))
    }

    pub fn look(&self, style: Style) -> Look<'_> {
        let [regular, emphasis, qualifier] = &self.fonts;

        match style {
            Style::Default => Look {
                font_file: regular,
                color: "white",
            },
            Style::Emphasis => Look {
                font_file: emphasis,
                color: "yellow",
            },
            Style::Qualifier => Look {
                font_file: qualifier,
                color: "white",
            },
        }
    }
}
