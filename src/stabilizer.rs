//! Temporal debouncing of per-frame gesture symbols.
//!
//! A sustained gesture classifies identically on every frame; without
//! gating, a single head turn at 30 fps would fire dozens of commands. The
//! stabilizer emits a symbol when it first appears and then suppresses
//! repeats until either the symbol changes or a minimum interval elapses.

use std::time::Duration;

/// Time-gated symbol debouncer.
///
/// Generic over the symbol type so the head movement and hand gesture
/// streams share the same policy. All state is owned here and mutated only
/// by [`observe`](Self::observe); construct one per stream.
#[derive(Debug, Clone)]
pub struct Stabilizer<S> {
    min_interval: Duration,
    min_hold: Duration,
    last_symbol: Option<S>,
    last_emit_time: Option<Duration>,
    candidate: Option<(S, Duration)>,
    last_observed: Option<Duration>,
}

impl<S: Copy + PartialEq> Stabilizer<S> {
    /// Create a stabilizer.
    ///
    /// `min_interval` suppresses re-emission of an unchanged symbol;
    /// `min_hold` is how long a symbol must be observed continuously before
    /// its first emission (zero disables the hold gate).
    #[must_use]
    pub fn new(min_interval: Duration, min_hold: Duration) -> Self {
        Self {
            min_interval,
            min_hold,
            last_symbol: None,
            last_emit_time: None,
            candidate: None,
            last_observed: None,
        }
    }

    /// Feed one frame's classification result; returns the symbol to act
    /// on, if any.
    ///
    /// Must be called once per frame in frame-acquisition order. `now` is a
    /// monotonic offset (e.g. since pipeline start); feeding a timestamp
    /// earlier than the previous one is a contract violation: fatal in
    /// debug builds, logged and tolerated in release.
    pub fn observe(&mut self, symbol: Option<S>, now: Duration) -> Option<S> {
        if let Some(previous) = self.last_observed {
            if now < previous {
                debug_assert!(false, "stabilizer observed out of frame order ({now:?} < {previous:?})");
                log::warn!("stabilizer observed out of frame order ({now:?} < {previous:?})");
            }
        }
        self.last_observed = Some(now);

        let Some(symbol) = symbol else {
            // A neutral frame immediately re-arms detection; no minimum
            // return-to-center duration is enforced.
            self.last_symbol = None;
            self.candidate = None;
            return None;
        };

        if !self.min_hold.is_zero() {
            match self.candidate {
                Some((candidate, since)) if candidate == symbol => {
                    if now.saturating_sub(since) < self.min_hold {
                        return None;
                    }
                }
                _ => {
                    self.candidate = Some((symbol, now));
                    return None;
                }
            }
        }

        let changed = self.last_symbol != Some(symbol);
        let interval_elapsed = self
            .last_emit_time
            .map_or(true, |last| now.saturating_sub(last) > self.min_interval);

        if changed || interval_elapsed {
            self.last_symbol = Some(symbol);
            self.last_emit_time = Some(now);
            Some(symbol)
        } else {
            None
        }
    }

    /// Clear all carried state.
    pub fn reset(&mut self) {
        self.last_symbol = None;
        self.last_emit_time = None;
        self.candidate = None;
        self.last_observed = None;
    }
}
