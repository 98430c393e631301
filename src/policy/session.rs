use super::traces::TraceBank;
use crate::battle::action::ActionId;
use crate::encode::{MasterKey, SubKey};
use crate::reward::Shaper;

/// per-match decision context. one `Session` per in-flight match, owned
/// by the caller and passed explicitly into the agent, so many matches
/// can share one agent's tables without their bookkeeping interleaving.
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub(crate) last: Option<(MasterKey, ActionId)>,
    pub(crate) last_sub: Option<SubKey>,
    pub(crate) last_sub_greedy: bool,
    pub(crate) traces: TraceBank,
    pub(crate) shaper: Shaper,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// forget everything about the current match
    pub fn reset(&mut self) {
        self.last = None;
        self.last_sub = None;
        self.last_sub_greedy = false;
        self.traces.clear();
        self.shaper.reset();
    }

    /// true once at least one decision has been recorded
    pub fn in_flight(&self) -> bool {
        self.last.is_some()
    }

    #[cfg(test)]
    pub(crate) fn traces(&self) -> &TraceBank {
        &self.traces
    }
}
