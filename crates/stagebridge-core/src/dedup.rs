//! Back-to-back duplicate suppression
//!
//! Game engines resend identical UDP state; the effects layer must not
//! re-trigger cue transitions on a resend. The gate keeps the last
//! (kind, payload) pair for the life of the dispatcher and drops an incoming
//! packet only when kind, length, and every payload byte match it.

/// Outcome of a dedup check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Novelty {
    /// Seen back-to-back, drop before any handler runs
    Duplicate,
    /// New content, stored pair replaced
    Novel,
}

/// Last-seen packet gate
#[derive(Debug, Default)]
pub struct DedupGate {
    last: Option<(u8, Vec<u8>)>,
}

impl DedupGate {
    /// Create an empty gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare against the stored pair, replacing it when novel
    pub fn check(&mut self, kind: u8, payload: &[u8]) -> Novelty {
        if let Some((last_kind, last_payload)) = &self.last {
            if *last_kind == kind && last_payload.as_slice() == payload {
                return Novelty::Duplicate;
            }
        }
        self.last = Some((kind, payload.to_vec()));
        Novelty::Novel
    }

    /// Forget the stored pair (dispatcher restart)
    pub fn reset(&mut self) {
        self.last = None;
    }
}
