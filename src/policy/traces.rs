use super::config::Hyper;
use super::master::MasterTable;
use super::sub::SubTable;
use crate::battle::action::ActionId;
use crate::encode::{MasterKey, SubKey};
use crate::Value;
use rustc_hash::FxHashMap;

/// eligibility bookkeeping for both policy levels. traces are transient
/// per-match state; the value tables they write into persist.
///
/// the update is Watkins' Q(lambda): accumulate on visit, decay by
/// gamma*lambda while the trajectory stays greedy, hard-reset the moment
/// an exploratory choice breaks the chain. the sub table decays under the
/// coupled condition, its chain also severs when the parent delegate
/// choice was exploratory.
#[derive(Debug, Default, Clone)]
pub struct TraceBank {
    master: FxHashMap<(MasterKey, ActionId), Value>,
    sub: FxHashMap<SubKey, Value>,
}

impl TraceBank {
    /// one backward-looking bootstrapped update. `last` is the previous
    /// decision's (state, action); `max_next_q` is the value of the state
    /// we just arrived in (0.0 for terminal); `next_greedy` is whether
    /// the step that produced this transition was greedy.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        master: &mut MasterTable,
        sub: &mut SubTable,
        last: &(MasterKey, ActionId),
        last_sub: Option<&SubKey>,
        sub_was_greedy: bool,
        reward: Value,
        max_next_q: Value,
        next_greedy: bool,
        h: &Hyper,
    ) {
        let old_q = master.get(&last.0, last.1);
        let delta = reward + h.gamma * max_next_q - old_q;

        // accumulating-trace convention: visits stack
        if let Some(key) = last_sub {
            *self.sub.entry(key.clone()).or_insert(0.0) += 1.0;
        }
        let keep_sub = next_greedy && sub_was_greedy;
        self.sub.retain(|key, e| {
            sub.bump(key, h.alpha * delta * *e);
            if keep_sub {
                *e *= h.gamma * h.lambda;
                *e >= h.trace_floor
            } else {
                false
            }
        });

        *self.master.entry(last.clone()).or_insert(0.0) += 1.0;
        self.master.retain(|key, e| {
            master.bump(key, h.alpha * delta * *e);
            if next_greedy {
                *e *= h.gamma * h.lambda;
                *e >= h.trace_floor
            } else {
                false
            }
        });
    }

    pub fn clear(&mut self) {
        self.master.clear();
        self.sub.clear();
    }

    pub fn master_trace(&self, key: &(MasterKey, ActionId)) -> Value {
        self.master.get(key).copied().unwrap_or(0.0)
    }

    pub fn sub_trace(&self, key: &SubKey) -> Value {
        self.sub.get(key).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.master.is_empty() && self.sub.is_empty()
    }
}
