//! Engine configuration and its validation.
//!
//! Every structural check happens in [`EngineConfig::validate`], before any
//! segment is looked at. Per-segment problems are never configuration errors.

use crate::error::ConfigError;
use crate::style::{DEFAULT_EMPHASIS_WORDS, DEFAULT_QUALIFIER_WORDS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default number of vertical display bands (primary and secondary)
const DEFAULT_BAND_COUNT: usize = 2;

/// Default line-wrap budget in characters
const DEFAULT_MAX_CHARS_PER_LINE: usize = 28;

/// Caption timing offsets in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Shown this long before the word is spoken
    pub lead_in: f64,
    /// Shortest time a caption stays on screen
    pub min_visibility: f64,
    /// Gap left before the next word's caption appears
    pub overlap_trim: f64,
}

impl Timing {
    /// Progressive builder timing: early appearance, short floor, small gap.
    pub const PROGRESSIVE: Self = Self {
        lead_in: 0.18,
        min_visibility: 0.12,
        overlap_trim: 0.05,
    };

    /// Rate-adaptive timing: captions start exactly on the first word.
    pub const ADAPTIVE: Self = Self {
        lead_in: 0.0,
        min_visibility: 0.20,
        overlap_trim: 0.0,
    };

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("lead-in", self.lead_in),
            ("minimum visibility", self.min_visibility),
            ("overlap trim", self.overlap_trim),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTiming { name, value });
            }
        }

        if self.min_visibility == 0.0 {
            return Err(ConfigError::ZeroVisibility);
        }

        Ok(())
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::ADAPTIVE
    }
}

/// Fixed-size trailing window, one caption state per word.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlidingConfig {
    /// Maximum words shown at once (default: 5)
    pub window_size: usize,
}

impl SlidingConfig {
    pub const DEFAULT: Self = Self { window_size: 5 };
}

impl Default for SlidingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Non-overlapping word groups sized by speaking rate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    /// Smallest group, used for fast speech (default: 1)
    pub min_chunk: usize,
    /// Largest group, used for slow speech (default: 3)
    pub max_chunk: usize,
    /// Words per second above which speech counts as fast (default: 5.0)
    pub fast_wps: f64,
    /// Words per second below which speech counts as slow (default: 2.0)
    pub slow_wps: f64,
}

impl AdaptiveConfig {
    pub const DEFAULT: Self = Self {
        min_chunk: 1,
        max_chunk: 3,
        fast_wps: 5.0,
        slow_wps: 2.0,
    };
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Word grouping policy of the caption window builder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Policy {
    Sliding(SlidingConfig),
    Adaptive(AdaptiveConfig),
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Adaptive(AdaptiveConfig::DEFAULT)
    }
}

impl Policy {
    /// Minimum slot length each synthesized word gets.
    ///
    /// Sliding captions show a single new word per state, so every word needs
    /// the full visibility floor. Adaptive groups share it across the group.
    pub fn per_word_minimum(&self, min_visibility: f64) -> f64 {
        match self {
            Policy::Sliding(_) => min_visibility,
            Policy::Adaptive(c) => min_visibility / c.max_chunk.max(1) as f64,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Policy::Sliding(SlidingConfig { window_size }) => {
                if window_size == 0 {
                    return Err(ConfigError::ZeroWindow);
                }
            }
            Policy::Adaptive(AdaptiveConfig {
                min_chunk,
                max_chunk,
                fast_wps,
                slow_wps,
            }) => {
                if min_chunk == 0 || min_chunk > max_chunk {
                    return Err(ConfigError::InvalidChunkRange {
                        min: min_chunk,
                        max: max_chunk,
                    });
                }

                let positive = |v: f64| v.is_finite() && v > 0.0;
                if !positive(fast_wps) || !positive(slow_wps) || slow_wps >= fast_wps {
                    return Err(ConfigError::InvalidRateThresholds {
                        slow: slow_wps,
                        fast: fast_wps,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Full engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub timing: Timing,
    pub policy: Policy,
    /// Number of vertical display bands (default: 2)
    pub band_count: usize,
    /// Line-wrap budget in characters (default: 28)
    pub max_chars_per_line: usize,
    /// Words that tag a caption as emphasis
    pub emphasis_words: BTreeSet<String>,
    /// Words that tag a caption as qualifier
    pub qualifier_words: BTreeSet<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timing: Timing::ADAPTIVE,
            policy: Policy::default(),
            band_count: DEFAULT_BAND_COUNT,
            max_chars_per_line: DEFAULT_MAX_CHARS_PER_LINE,
            emphasis_words: word_set(DEFAULT_EMPHASIS_WORDS),
            qualifier_words: word_set(DEFAULT_QUALIFIER_WORDS),
        }
    }
}

impl EngineConfig {
    /// Sliding five-word builder with progressive timing.
    pub fn progressive() -> Self {
        Self {
            timing: Timing::PROGRESSIVE,
            policy: Policy::Sliding(SlidingConfig::DEFAULT),
            ..Self::default()
        }
    }

    /// Rate-adaptive one-to-three word groups.
    pub fn adaptive() -> Self {
        Self::default()
    }

    /// Fail fast on structural inconsistencies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.policy.validate()?;

        if self.band_count == 0 {
            return Err(ConfigError::ZeroBands);
        }

        if self.max_chars_per_line == 0 {
            return Err(ConfigError::ZeroLineWidth);
        }

        Ok(())
    }
}

/// Build an owned word set from static words.
pub fn word_set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
        assert_eq!(EngineConfig::progressive().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_chunk_range() {
        let config = EngineConfig {
            policy: Policy::Adaptive(AdaptiveConfig {
                min_chunk: 4,
                max_chunk: 2,
                ..AdaptiveConfig::DEFAULT
            }),
            ..EngineConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidChunkRange { min: 4, max: 2 })
        );
    }

    #[test]
    fn rejects_zero_min_chunk() {
        let config = EngineConfig {
            policy: Policy::Adaptive(AdaptiveConfig {
                min_chunk: 0,
                ..AdaptiveConfig::DEFAULT
            }),
            ..EngineConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidChunkRange { min: 0, .. })
        ));
    }

    #[test]
    fn rejects_zero_bands() {
        let config = EngineConfig {
            band_count: 0,
            ..EngineConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroBands));
    }

    #[test]
    fn rejects_zero_window() {
        let config = EngineConfig {
            policy: Policy::Sliding(SlidingConfig { window_size: 0 }),
            ..EngineConfig::progressive()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroWindow));
    }

    #[test]
    fn rejects_negative_lead_in() {
        let config = EngineConfig {
            timing: Timing {
                lead_in: -0.1,
                ..Timing::PROGRESSIVE
            },
            ..EngineConfig::progressive()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTiming { name: "lead-in", .. })
        ));
    }

    #[test]
    fn rejects_zero_visibility() {
        let config = EngineConfig {
            timing: Timing {
                min_visibility: 0.0,
                ..Timing::ADAPTIVE
            },
            ..EngineConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroVisibility));
    }

    #[test]
    fn rejects_swapped_rate_thresholds() {
        let config = EngineConfig {
            policy: Policy::Adaptive(AdaptiveConfig {
                fast_wps: 2.0,
                slow_wps: 3.0,
                ..AdaptiveConfig::DEFAULT
            }),
            ..EngineConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRateThresholds { .. })
        ));
    }

    #[test]
    fn per_word_minimum_depends_on_policy() {
        let sliding = Policy::Sliding(SlidingConfig::DEFAULT);
        let adaptive = Policy::Adaptive(AdaptiveConfig::DEFAULT);

        assert!((sliding.per_word_minimum(0.12) - 0.12).abs() < 1e-9);
        assert!((adaptive.per_word_minimum(0.3) - 0.1).abs() < 1e-9);
    }
}
