use crate::battle::snapshot::Snapshot;
use crate::Value;

/// aggregate features of one side-pair, differenced between consecutive
/// decision points to produce the dense step reward
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    pub own_health: f64,
    pub foe_health: f64,
    pub own_fainted: i64,
    pub foe_fainted: i64,
    pub own_statused: i64,
    pub foe_statused: i64,
    pub own_boost_total: i64,
}

impl Aggregates {
    pub fn of(snapshot: &Snapshot) -> Self {
        Self {
            own_health: snapshot.own_roster.iter().map(|u| u.hp_fraction()).sum(),
            foe_health: snapshot.foe_roster.iter().map(|u| u.hp_fraction()).sum(),
            own_fainted: snapshot.own_roster.iter().filter(|u| u.fainted).count() as i64,
            foe_fainted: snapshot.foe_roster.iter().filter(|u| u.fainted).count() as i64,
            own_statused: snapshot
                .own_roster
                .iter()
                .filter(|u| u.status.is_some())
                .count() as i64,
            foe_statused: snapshot
                .foe_roster
                .iter()
                .filter(|u| u.status.is_some())
                .count() as i64,
            own_boost_total: snapshot
                .own_active
                .as_ref()
                .map(|u| u.boosts.total() as i64)
                .unwrap_or(0),
        }
    }
}

/// dense per-decision reward from the delta between consecutive
/// aggregate snapshots. the first decision point of a match yields 0.0,
/// there is nothing to difference against yet.
#[derive(Debug, Clone, Default)]
pub struct Shaper {
    prev: Option<Aggregates>,
}

impl Shaper {
    /// record the current aggregates and return the shaped reward for
    /// the transition since the previous call
    pub fn observe(&mut self, snapshot: &Snapshot) -> Value {
        let curr = Aggregates::of(snapshot);
        let reward = match self.prev {
            Some(prev) => Self::step(&prev, &curr),
            None => 0.0,
        };
        self.prev = Some(curr);
        reward
    }

    fn step(prev: &Aggregates, curr: &Aggregates) -> Value {
        let mut reward = 0.0;
        reward += (curr.foe_fainted - prev.foe_fainted) as f64 * crate::W_FAINT;
        reward -= (curr.own_fainted - prev.own_fainted) as f64 * crate::W_FAINT;
        let foe_health_lost = prev.foe_health - curr.foe_health;
        let own_health_lost = prev.own_health - curr.own_health;
        reward += crate::W_HEALTH * (foe_health_lost - own_health_lost);
        let foe_newly_statused = curr.foe_statused - prev.foe_statused;
        let own_newly_statused = curr.own_statused - prev.own_statused;
        reward += crate::W_STATUS * (foe_newly_statused - own_newly_statused) as f64;
        reward += crate::W_BOOST * (curr.own_boost_total - prev.own_boost_total) as f64;
        reward
    }

    pub fn reset(&mut self) {
        self.prev = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::element::Element;
    use crate::battle::status::Status;
    use crate::battle::unit::{Boosts, Stats, Unit};

    fn unit(species: &str, hp: u32) -> Unit {
        Unit {
            species: species.to_string(),
            hp,
            max_hp: 100,
            fainted: hp == 0,
            status: None,
            boosts: Boosts::default(),
            ability: None,
            elements: vec![Element::Normal],
            stats: Stats::default(),
            moves: vec![],
        }
    }

    fn snapshot(own: &[u32], foe: &[u32]) -> Snapshot {
        Snapshot {
            own_roster: own.iter().map(|hp| unit("own", *hp)).collect(),
            foe_roster: foe.iter().map(|hp| unit("foe", *hp)).collect(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn first_observation_yields_nothing() {
        let mut shaper = Shaper::default();
        assert_eq!(shaper.observe(&snapshot(&[100, 100], &[100, 100])), 0.0);
    }

    #[test]
    fn unchanged_aggregates_yield_exactly_zero() {
        let mut shaper = Shaper::default();
        let snap = snapshot(&[100, 60, 30], &[100, 100, 0]);
        shaper.observe(&snap);
        assert_eq!(shaper.observe(&snap), 0.0);
    }

    #[test]
    fn opponent_health_loss_is_positive() {
        let mut shaper = Shaper::default();
        shaper.observe(&snapshot(&[100], &[100]));
        let reward = shaper.observe(&snapshot(&[100], &[70]));
        assert!((reward - crate::W_HEALTH * 0.3).abs() < 1e-9);
    }

    #[test]
    fn faints_dominate_health_exchange() {
        let mut shaper = Shaper::default();
        shaper.observe(&snapshot(&[100, 100], &[10, 100]));
        // the opponent's damaged unit goes down
        let reward = shaper.observe(&snapshot(&[100, 100], &[0, 100]));
        let expect = crate::W_FAINT + crate::W_HEALTH * 0.1;
        assert!((reward - expect).abs() < 1e-9);
        // symmetric loss on our side
        let mut shaper = Shaper::default();
        shaper.observe(&snapshot(&[10, 100], &[100, 100]));
        let reward = shaper.observe(&snapshot(&[0, 100], &[100, 100]));
        assert!((reward + expect).abs() < 1e-9);
    }

    #[test]
    fn status_and_boosts_are_small_positives() {
        let mut shaper = Shaper::default();
        let before = snapshot(&[100], &[100]);
        shaper.observe(&before);
        let mut after = snapshot(&[100], &[100]);
        after.foe_roster[0].status = Some(Status::Poison);
        let mut active = unit("own", 100);
        active.boosts.atk = 2;
        after.own_active = Some(active);
        let reward = shaper.observe(&after);
        let expect = crate::W_STATUS + crate::W_BOOST * 2.0;
        assert!((reward - expect).abs() < 1e-9);
    }
}
