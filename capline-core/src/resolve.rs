//! Band assignment and same-band collision shrinking.
//!
//! Both passes expect states sorted by `(on, segment)` and leave skipped
//! states untouched.

use crate::EPSILON;
use crate::types::{CaptionState, SkipReason};
use std::collections::BTreeMap;

/// Resolves temporal overlaps between caption states.
#[derive(Clone, Copy, Debug)]
pub struct Resolver {
    /// Number of vertical bands available
    pub band_count: usize,
    /// Floor that shrinking never goes below
    pub min_visibility: f64,
    /// Clip-relative end of the timeline
    pub limit: f64,
}

impl Resolver {
    /// Shorten states that run into the next state of the same band.
    ///
    /// Each state starts no earlier than the previous one ends and ends no
    /// later than the next one starts. When the visibility floor of a state
    /// reaches past the start of the next one, the next one is dropped: the
    /// earlier state always wins.
    pub fn shrink(&self, states: &mut [CaptionState]) {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, state) in states.iter().enumerate() {
            if !state.is_skipped() {
                groups.entry(state.band).or_default().push(i);
            }
        }

        for ids in groups.values() {
            self.shrink_group(states, ids);
        }
    }

    fn shrink_group(&self, states: &mut [CaptionState], ids: &[usize]) {
        let mut prev_off: Option<f64> = None;

        for (pos, &id) in ids.iter().enumerate() {
            if states[id].is_skipped() {
                continue;
            }

            let on = prev_off.map_or(states[id].on, |p| states[id].on.max(p));
            let floor = on + self.min_visibility;

            if floor > self.limit + EPSILON {
                tracing::debug!(text = states[id].text, on, "no room left after previous caption");
                states[id].skip = Some(SkipReason::Collision);
                continue;
            }

            let mut off = states[id].off.max(floor);

            for &next in &ids[pos + 1..] {
                if states[next].is_skipped() {
                    continue;
                }

                let next_on = states[next].on;
                if floor > next_on + EPSILON {
                    tracing::debug!(
                        kept = states[id].text,
                        dropped = states[next].text,
                        next_on,
                        "caption collides with earlier caption"
                    );
                    states[next].skip = Some(SkipReason::Collision);
                    continue;
                }

                off = off.min(next_on);
                break;
            }

            let off = off.min(self.limit);

            states[id].on = on;
            states[id].off = off;
            prev_off = Some(off);
        }
    }

    /// Greedy interval partitioning over a fixed number of bands.
    ///
    /// Bands are tried in order, so band 0 is always preferred. A state that
    /// fits in no band is marked skipped and leaves every band unchanged.
    pub fn assign_bands(&self, states: &mut [CaptionState]) {
        let mut last_off: Vec<Option<f64>> = vec![None; self.band_count];

        for state in states.iter_mut().filter(|s| !s.is_skipped()) {
            let free = last_off
                .iter()
                .position(|last| last.is_none_or(|off| off <= state.on));

            match free {
                Some(band) => {
                    state.band = band;
                    last_off[band] = Some(state.off);
                }
                None => {
                    tracing::debug!(text = state.text, on = state.on, off = state.off, "no free band");
                    state.skip = Some(SkipReason::NoFreeBand);
                }
            }
        }
    }
}
