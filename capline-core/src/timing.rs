//! Per-word timing synthesized from segment-level timing.
//!
//! True word timing is unknown at this point, so the segment is split into
//! equal slots. The result is an ordering signal, not prosody.

use crate::types::WordInterval;

/// Split text into words on whitespace, keeping punctuation attached.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Synthesize `word_count` uniform word slots over `[start, end)`.
///
/// Every slot is at least `per_word_min` long, which stretches the timeline
/// past `end` for short segments. Each timestamp is then clamped into
/// `[start, end]` on its own, so trailing words of a stretched segment may get
/// zero-length slots at `end`.
pub fn synthesize(start: f64, end: f64, word_count: usize, per_word_min: f64) -> Vec<WordInterval> {
    if word_count == 0 {
        return Vec::new();
    }

    let total = end - start;
    let actual = total.max(word_count as f64 * per_word_min);
    let slot = actual / word_count as f64;

    let clamp = |t: f64| t.clamp(start, end);

    (0..word_count)
        .map(|i| WordInterval {
            word: i,
            start: clamp(start + i as f64 * slot),
            end: clamp(start + (i + 1) as f64 * slot),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn tokenizes_on_any_whitespace() {
        assert_eq!(tokenize("  Hello,\tworld \n again. "), ["Hello,", "world", "again."]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn zero_words_yield_nothing() {
        assert!(synthesize(0.0, 1.0, 0, 0.1).is_empty());
    }

    #[test]
    fn splits_evenly_when_long_enough() {
        let words = synthesize(1.0, 3.0, 4, 0.1);

        assert_eq!(words.len(), 4);
        for (i, w) in words.iter().enumerate() {
            assert_eq!(w.word, i);
            assert!((w.start - (1.0 + 0.5 * i as f64)).abs() < EPS);
            assert!((w.end - (1.5 + 0.5 * i as f64)).abs() < EPS);
        }
    }

    #[test]
    fn covers_segment_exactly() {
        let words = synthesize(0.0, 2.535, 9, 0.12);

        match &words[..] {
            [first, .., last] => {
                assert!((first.start - 0.0).abs() < EPS);
                assert!((last.end - 2.535).abs() < EPS);
            }
            _ => panic!("expected 9 words, got {}", words.len()),
        }

        for pair in words.windows(2) {
            assert!((pair[0].end - pair[1].start).abs() < EPS);
        }
    }

    #[test]
    fn stretches_then_clamps_short_segment() {
        // 5 words * 0.2s = 1.0s needed, segment is 0.5s: slots of 0.2s
        let words = synthesize(0.0, 0.5, 5, 0.2);

        let starts: Vec<f64> = words.iter().map(|w| w.start).collect();
        let ends: Vec<f64> = words.iter().map(|w| w.end).collect();

        assert!((starts[2] - 0.4).abs() < EPS);
        assert!((ends[2] - 0.5).abs() < EPS);

        // tail words collapse onto the segment end
        assert!((starts[3] - 0.5).abs() < EPS);
        assert!((ends[4] - 0.5).abs() < EPS);
        assert!(words.iter().all(|w| w.end <= 0.5 + EPS));
    }

    #[test]
    fn intervals_are_monotonic() {
        let words = synthesize(3.0, 3.3, 7, 0.12);

        for pair in words.windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].end <= pair[1].end);
        }
    }
}
