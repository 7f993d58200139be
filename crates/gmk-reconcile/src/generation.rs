//! Refresh generation gate.
//!
//! # Purpose
//!
//! Source callbacks complete in any order, or never. Without a gate, a
//! slow response from an earlier refresh can land after a newer refresh
//! already resolved and overwrite fresh marker state with stale data.
//! Each dispatched refresh is tagged with a monotonically increasing
//! generation; a result is accepted only while its generation is still the
//! newest dispatched.
//!
//! # Invariants
//!
//! - Generations increase by one per dispatch and are never reused.
//! - A result whose generation is older than the latest dispatch is stale.
//! - Staleness checks do not advance the gate; only dispatch does.
//! - Pure, no IO.

/// Tag carried by an in-flight refresh and its eventual results.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(pub u64);

/// Result of checking a tagged result against the gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// The result belongs to the newest dispatched refresh.
    Fresh,

    /// A newer refresh was dispatched after this result's; the result
    /// must be discarded. Fields carry evidence for logging.
    Stale {
        /// The newest dispatched generation.
        latest: u64,
        /// The generation carried by the rejected result.
        got: u64,
    },
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh)
    }
}

/// Monotonic counter over refresh dispatches.
///
/// Call [`dispatch`][GenerationGate::dispatch] once per user-triggered
/// refresh and attach the returned tag to every asynchronous query made on
/// its behalf. Call [`accept`][GenerationGate::accept] on each completion
/// and drop the result unless it is [`Freshness::Fresh`].
#[derive(Clone, Debug, Default)]
pub struct GenerationGate {
    latest: u64,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new refresh: advances the gate and returns its tag.
    /// Any result still in flight for an earlier tag becomes stale.
    pub fn dispatch(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Check a tagged result. Does not advance the gate.
    pub fn accept(&self, gen: Generation) -> Freshness {
        if gen.0 < self.latest {
            return Freshness::Stale {
                latest: self.latest,
                got: gen.0,
            };
        }
        Freshness::Fresh
    }

    /// The newest dispatched generation, `0` before the first dispatch.
    pub fn latest(&self) -> u64 {
        self.latest
    }
}
