use crate::battle::action::ActionId;
use crate::encode::MasterKey;
use crate::{Probability, Value};
use rand::Rng;
use rustc_hash::FxHashMap;

/// the master value table: (state, action) -> learned value. grows
/// without bound as new states are encountered; unseen entries read 0.0
/// unless the heuristic seeded them first.
#[derive(Debug, Default, Clone)]
pub struct MasterTable {
    entries: FxHashMap<(MasterKey, ActionId), Value>,
}

impl MasterTable {
    pub fn get(&self, key: &MasterKey, action: ActionId) -> Value {
        self.entries
            .get(&(key.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, key: MasterKey, action: ActionId, value: Value) {
        self.entries.insert((key, action), value);
    }

    pub fn contains(&self, key: &MasterKey, action: ActionId) -> bool {
        self.entries.contains_key(&(key.clone(), action))
    }

    pub fn bump(&mut self, key: &(MasterKey, ActionId), delta: Value) {
        *self.entries.entry(key.clone()).or_insert(0.0) += delta;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(MasterKey, ActionId), &Value)> {
        self.entries.iter()
    }

    pub fn from_entries(entries: Vec<((MasterKey, ActionId), Value)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// highest value among `actions` in state `key`; 0.0 for an empty set
    pub fn max_over(&self, key: &MasterKey, actions: &[ActionId]) -> Value {
        if actions.is_empty() {
            return 0.0;
        }
        actions
            .iter()
            .map(|a| self.get(key, *a))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// epsilon-greedy selection among the legal actions. ties in the
    /// greedy set break uniformly at random; an exploratory pick that
    /// happens to attain the maximum still counts as greedy so it does
    /// not sever the eligibility chain. `None` iff `legal` is empty.
    pub fn select<R: Rng>(
        &self,
        key: &MasterKey,
        legal: &[ActionId],
        epsilon: Probability,
        rng: &mut R,
    ) -> Option<(ActionId, bool)> {
        if legal.is_empty() {
            return None;
        }
        let values: Vec<Value> = legal.iter().map(|a| self.get(key, *a)).collect();
        let max_q = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let best: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, q)| **q == max_q)
            .map(|(i, _)| i)
            .collect();
        let greedy_idx = best[rng.gen_range(0..best.len())];
        if rng.gen::<f64>() < epsilon {
            let idx = rng.gen_range(0..legal.len());
            Some((legal[idx], values[idx] == max_q))
        } else {
            Some((legal[greedy_idx], true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn key() -> MasterKey {
        MasterKey {
            own_species: "tauros".to_string(),
            own_health: 2,
            own_status: 0,
            own_ability: "none".to_string(),
            own_boosted: false,
            own_max_boosted: false,
            faster: true,
            foe_species: "chansey".to_string(),
            foe_health: 2,
            foe_status: 0,
            foe_boosted: false,
            foe_max_boosted: false,
        }
    }

    #[test]
    fn empty_legal_set_yields_none() {
        let table = MasterTable::default();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(table.select(&key(), &[], 0.0, &mut rng).is_none());
    }

    #[test]
    fn fresh_state_breaks_ties_randomly_and_greedily() {
        let table = MasterTable::default();
        let legal = [ActionId::Slot(0), ActionId::Slot(1)];
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false, false];
        for _ in 0..64 {
            let (action, greedy) = table.select(&key(), &legal, 0.0, &mut rng).unwrap();
            assert!(greedy);
            match action {
                ActionId::Slot(0) => seen[0] = true,
                ActionId::Slot(1) => seen[1] = true,
                other => panic!("illegal action {:?}", other),
            }
        }
        assert!(seen[0] && seen[1]);
    }

    #[test]
    fn greedy_selection_is_deterministic() {
        let mut table = MasterTable::default();
        table.set(key(), ActionId::Slot(0), 5.0);
        table.set(key(), ActionId::Slot(1), 1.0);
        let legal = [ActionId::Slot(0), ActionId::Slot(1)];
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..32 {
            let (action, greedy) = table.select(&key(), &legal, 0.0, &mut rng).unwrap();
            assert_eq!(action, ActionId::Slot(0));
            assert!(greedy);
        }
    }

    #[test]
    fn exploration_labels_by_value_equality() {
        let mut table = MasterTable::default();
        table.set(key(), ActionId::Slot(0), 5.0);
        table.set(key(), ActionId::Slot(1), 1.0);
        table.set(key(), ActionId::Delegate, 5.0);
        let legal = [ActionId::Slot(0), ActionId::Slot(1), ActionId::Delegate];
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..128 {
            let (action, greedy) = table.select(&key(), &legal, 1.0, &mut rng).unwrap();
            // both value-5 actions count as greedy even when explored into
            assert_eq!(greedy, action != ActionId::Slot(1));
        }
    }

    #[test]
    fn max_over_legal_subset() {
        let mut table = MasterTable::default();
        table.set(key(), ActionId::Slot(0), -2.0);
        table.set(key(), ActionId::Slot(1), 3.0);
        assert_eq!(
            table.max_over(&key(), &[ActionId::Slot(0), ActionId::Slot(1)]),
            3.0
        );
        assert_eq!(table.max_over(&key(), &[ActionId::Slot(0)]), -2.0);
    }
}
