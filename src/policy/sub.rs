use crate::encode::SubKey;
use crate::{Probability, Value};
use rand::Rng;
use rustc_hash::FxHashMap;

/// the switch specialist's value table: sub-state -> learned value. the
/// action is implicit, each key already names the candidate it scores.
#[derive(Debug, Default, Clone)]
pub struct SubTable {
    entries: FxHashMap<SubKey, Value>,
}

impl SubTable {
    pub fn get(&self, key: &SubKey) -> Value {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, key: SubKey, value: Value) {
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &SubKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn bump(&mut self, key: &SubKey, delta: Value) {
        *self.entries.entry(key.clone()).or_insert(0.0) += delta;
    }

    /// Monte-Carlo style nudge toward `target`, used for the terminal
    /// reward on the last switch context
    pub fn nudge(&mut self, key: &SubKey, target: Value, alpha: Value) {
        let old = self.get(key);
        self.set(key.clone(), old + alpha * (target - old));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SubKey, &Value)> {
        self.entries.iter()
    }

    pub fn from_entries(entries: Vec<(SubKey, Value)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// epsilon-greedy pick among candidate contexts, mirroring the master
    /// rule but over concrete candidates. returns the chosen index and
    /// whether the pick attained the arg-max. `None` iff `keys` is empty.
    pub fn select<R: Rng>(
        &self,
        keys: &[SubKey],
        epsilon: Probability,
        rng: &mut R,
    ) -> Option<(usize, bool)> {
        if keys.is_empty() {
            return None;
        }
        let values: Vec<Value> = keys.iter().map(|k| self.get(k)).collect();
        let max_q = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let best: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, q)| **q == max_q)
            .map(|(i, _)| i)
            .collect();
        let greedy_idx = best[rng.gen_range(0..best.len())];
        if rng.gen::<f64>() < epsilon {
            let idx = rng.gen_range(0..keys.len());
            Some((idx, values[idx] == max_q))
        } else {
            Some((greedy_idx, true))
        }
    }
}
