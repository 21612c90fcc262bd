//! Invariants that hold for every run, checked over a mixed transcript.

use capline_core::style::StyleClassifier;
use capline_core::timing::synthesize;
use capline_core::{ClipWindow, Engine, EngineConfig, Policy, Segment, SlidingConfig, Timeline};

const EPS: f64 = 1e-9;

/// Fast, slow, overlapping, empty, malformed and tiny segments.
fn transcript() -> Vec<Segment> {
    vec![
        Segment::new(0, "Wait, you have to see this.", 0.0, 1.4),
        Segment::new(1, "It's honestly the best trick I have ever learned", 1.4, 3.0),
        Segment::new(2, "maybe", 3.0, 3.05),
        Segment::new(3, "", 3.1, 3.5),
        Segment::new(4, "and this part overlaps the next one", 3.5, 5.5),
        Segment::new(5, "while somebody else keeps talking", 4.5, 6.0),
        Segment::new(6, "reversed", 7.0, 6.5),
        Segment::new(7, "slow and steady words here", 8.0, 14.0),
        Segment::new(8, "rapid fire words spoken really really really fast now", 14.0, 14.6),
        Segment::new(9, "Like, I think it could work.", 15.0, 17.5),
    ]
}

fn configs() -> Vec<EngineConfig> {
    vec![
        EngineConfig::progressive(),
        EngineConfig::adaptive(),
        EngineConfig {
            policy: Policy::Sliding(SlidingConfig { window_size: 2 }),
            band_count: 1,
            ..EngineConfig::progressive()
        },
        EngineConfig {
            band_count: 3,
            ..EngineConfig::adaptive()
        },
    ]
}

fn timelines() -> Vec<(EngineConfig, Timeline)> {
    let clip = ClipWindow::new(0.0, Some(16.0)).unwrap();

    configs()
        .into_iter()
        .map(|config| {
            let timeline = Engine::new(config.clone()).unwrap().run(&transcript(), clip);
            (config, timeline)
        })
        .collect()
}

#[test]
fn active_states_respect_visibility_floor() {
    for (config, timeline) in timelines() {
        let floor = config.timing.min_visibility;
        for state in timeline.active() {
            assert!(state.duration() + EPS >= floor, "{state:?}");
        }
    }
}

#[test]
fn same_band_states_never_overlap() {
    for (_, timeline) in timelines() {
        let active: Vec<_> = timeline.active().collect();
        for (i, a) in active.iter().enumerate() {
            for b in &active[i + 1..] {
                if a.band == b.band {
                    assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
                }
            }
        }
    }
}

#[test]
fn bands_stay_within_band_count() {
    for (config, timeline) in timelines() {
        assert!(timeline.active().all(|s| s.band < config.band_count));
    }
}

#[test]
fn states_are_sorted_by_on_time() {
    for (_, timeline) in timelines() {
        for pair in timeline.states().windows(2) {
            assert!(pair[0].on <= pair[1].on, "{:?} before {:?}", pair[0], pair[1]);
        }
    }
}

#[test]
fn states_stay_inside_clip() {
    for (_, timeline) in timelines() {
        for state in timeline.states() {
            assert!(state.on >= 0.0, "{state:?}");
            assert!(state.off <= 16.0 + EPS, "{state:?}");
        }
    }
}

#[test]
fn identical_input_gives_identical_output() {
    for config in configs() {
        let engine = Engine::new(config).unwrap();
        let clip = ClipWindow::new(0.0, Some(16.0)).unwrap();

        let first = serde_json::to_string(engine.run(&transcript(), clip).states()).unwrap();
        let second = serde_json::to_string(engine.run(&transcript(), clip).states()).unwrap();

        assert_eq!(first, second);
    }
}

#[test]
fn malformed_segment_is_counted_not_fatal() {
    for (_, timeline) in timelines() {
        assert_eq!(timeline.summary().malformed, 1);
        assert!(timeline.states().iter().all(|s| s.segment != 6));
    }
}

#[test]
fn word_intervals_cover_segment() {
    for segment in transcript().iter().filter(|s| s.validate().is_ok()) {
        let count = segment.text.split_whitespace().count();
        let words = synthesize(segment.start, segment.end, count, 0.12);

        if let [first, .., last] = &words[..] {
            assert!((first.start - segment.start).abs() < EPS);
            assert!((last.end - segment.end).abs() < EPS);
        }
    }
}

#[test]
fn style_is_stable_across_calls_and_case() {
    let config = EngineConfig::default();
    let classifier = StyleClassifier::from_sets(&config.emphasis_words, &config.qualifier_words);

    for text in ["Like,", "like", "LIKE!", "WOW.", "nothing special"] {
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    assert_eq!(classifier.classify("Like,"), classifier.classify("like"));
    assert_eq!(classifier.classify("Wow!"), classifier.classify("wow"));
}

#[test]
fn adaptive_groups_never_repeat_words_within_segment() {
    let engine = Engine::new(EngineConfig::adaptive()).unwrap();
    let segments = transcript();
    let timeline = engine.run(&segments, ClipWindow::FULL);

    for segment in segments.iter().filter(|s| s.validate().is_ok()) {
        let covered: Vec<&str> = timeline
            .states()
            .iter()
            .filter(|s| s.segment == segment.index)
            .flat_map(|s| s.text.split(' '))
            .collect();
        let words: Vec<&str> = segment.text.split_whitespace().collect();

        assert_eq!(covered, words, "segment {}", segment.index);
    }
}
