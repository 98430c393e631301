use super::data;
use crate::battle::element::Element;
use crate::battle::snapshot::{Hazards, Snapshot};
use crate::battle::status::Status;
use crate::battle::unit::{Boosts, Move, MoveKind, Unit};
use crate::battle::Choice;
use rand::Rng;

/// damage scale: tuned so a neutral hit takes roughly a quarter of a
/// typical health bar
const DAMAGE_SCALE: f64 = 0.42;
/// entry hazard chip, fraction of max health
const HAZARD_CHIP: f64 = 0.125;
/// end-of-turn ailment chip, fraction of max health
const STATUS_CHIP: f64 = 0.125;
/// turns before the match is declared stalled and abandoned
const TURN_LIMIT: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// both sides pick simultaneously
    Turn,
    /// the agent's side must send a replacement
    ReplaceOwn,
    /// the scripted side must send a replacement
    ReplaceFoe,
    Done,
}

/// a toy match engine. it owns all match mechanics and exposes only
/// snapshots and choice entry points, the same shape of interface the
/// learning core expects from a real engine.
pub struct Battle {
    own: Vec<Unit>,
    foe: Vec<Unit>,
    own_active: usize,
    foe_active: usize,
    own_hazards: Hazards,
    foe_hazards: Hazards,
    phase: Phase,
    turns: usize,
}

impl Battle {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            own: data::roster(rng),
            foe: data::roster(rng),
            own_active: 0,
            foe_active: 0,
            own_hazards: Hazards::default(),
            foe_hazards: Hazards::default(),
            phase: Phase::Turn,
            turns: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn over(&self) -> bool {
        self.phase == Phase::Done
    }

    /// abandoned rather than finished once the turn limit is reached
    pub fn stalled(&self) -> bool {
        self.turns >= TURN_LIMIT && !self.over()
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn won(&self) -> bool {
        self.foe.iter().all(|u| u.fainted) && self.own.iter().any(|u| !u.fainted)
    }

    fn bench(units: &[Unit], active: usize) -> Vec<usize> {
        (0..units.len())
            .filter(|i| *i != active && !units[*i].fainted)
            .collect()
    }

    fn view(units: &[Unit], active: usize, hazards: Hazards, force_switch: bool) -> Snapshot {
        let active_unit = units[active].clone();
        Snapshot {
            available_moves: if force_switch || active_unit.fainted {
                vec![]
            } else {
                active_unit.moves.iter().map(|m| m.id.clone()).collect()
            },
            switch_candidates: Self::bench(units, active)
                .into_iter()
                .map(|i| units[i].clone())
                .collect(),
            own_active: Some(active_unit),
            own_roster: units.to_vec(),
            hazards,
            force_switch,
            ..Snapshot::default()
        }
    }

    /// the agent's view of the current decision point
    pub fn snapshot_own(&self) -> Snapshot {
        let mut snapshot = Self::view(
            &self.own,
            self.own_active,
            self.own_hazards,
            self.phase == Phase::ReplaceOwn,
        );
        snapshot.foe_active = Some(self.foe[self.foe_active].clone());
        snapshot.foe_roster = self.foe.to_vec();
        snapshot
    }

    /// the scripted side's mirrored view
    pub fn snapshot_foe(&self) -> Snapshot {
        let mut snapshot = Self::view(
            &self.foe,
            self.foe_active,
            self.foe_hazards,
            self.phase == Phase::ReplaceFoe,
        );
        snapshot.foe_active = Some(self.own[self.own_active].clone());
        snapshot.foe_roster = self.own.to_vec();
        snapshot
    }

    fn effective_speed(unit: &Unit) -> f64 {
        unit.stats.spe as f64 * Boosts::multiplier(unit.boosts.spe)
    }

    fn immobilized<R: Rng>(unit: &Unit, rng: &mut R) -> bool {
        match unit.status {
            Some(Status::Paralysis) => rng.gen::<f64>() < 0.25,
            Some(Status::Sleep) | Some(Status::Freeze) => rng.gen::<f64>() < 0.5,
            _ => false,
        }
    }

    fn damage<R: Rng>(attacker: &Unit, defender: &Unit, mv: &Move, rng: &mut R) -> u32 {
        let (atk, def, atk_stage, def_stage) = match mv.kind {
            MoveKind::Physical => (
                attacker.stats.atk,
                defender.stats.def,
                attacker.boosts.atk,
                defender.boosts.def,
            ),
            _ => (
                attacker.stats.spa,
                defender.stats.spd,
                attacker.boosts.spa,
                defender.boosts.spd,
            ),
        };
        let atk = atk as f64 * Boosts::multiplier(atk_stage);
        let def = (def as f64 * Boosts::multiplier(def_stage)).max(1.0);
        let stab = if attacker.elements.contains(&mv.element) {
            1.5
        } else {
            1.0
        };
        let effectiveness = mv.element.against(&defender.elements);
        let roll = rng.gen_range(0.85..=1.0);
        (mv.power * (atk / def) * stab * effectiveness * roll * DAMAGE_SCALE) as u32
    }

    fn apply_damage(unit: &mut Unit, amount: u32) {
        unit.hp = unit.hp.saturating_sub(amount);
        if unit.hp == 0 {
            unit.fainted = true;
            unit.status = None;
            unit.boosts = Boosts::default();
        }
    }

    fn chip(unit: &mut Unit) {
        if matches!(
            unit.status,
            Some(Status::Burn) | Some(Status::Poison) | Some(Status::Toxic)
        ) && !unit.fainted
        {
            let amount = (unit.max_hp as f64 * STATUS_CHIP) as u32;
            Self::apply_damage(unit, amount.max(1));
        }
    }

    fn switch_in(units: &mut [Unit], active: &mut usize, bench_pick: usize, hazards: Hazards) {
        units[*active].boosts = Boosts::default();
        let bench = Self::bench(units, *active);
        let Some(target) = bench.get(bench_pick).copied() else {
            return;
        };
        *active = target;
        let unit = &mut units[*active];
        if hazards.0[Hazards::SPIKES] {
            let amount = (unit.max_hp as f64 * HAZARD_CHIP) as u32;
            Self::apply_damage(unit, amount.max(1));
        }
        if hazards.0[Hazards::ROCKS] && !unit.fainted {
            // rock chip scales with the entrant's elemental exposure
            let scale = Element::Rock.against(&unit.elements);
            let amount = (unit.max_hp as f64 * HAZARD_CHIP * scale) as u32;
            Self::apply_damage(unit, amount.max(1));
        }
        if hazards.0[Hazards::WEB] && !unit.fainted {
            unit.boosts.spe = (unit.boosts.spe - 1).max(-crate::MAX_BOOST_STAGE);
        }
        if hazards.0[Hazards::TOXIC_SPIKES] && !unit.fainted && unit.status.is_none() {
            unit.status = Some(Status::Poison);
        }
    }

    fn act<R: Rng>(&mut self, own_side: bool, move_id: &str, rng: &mut R) {
        let (attacker_units, attacker_idx, defender_units, defender_idx) = if own_side {
            (&self.own, self.own_active, &mut self.foe, self.foe_active)
        } else {
            (&self.foe, self.foe_active, &mut self.own, self.own_active)
        };
        let attacker = attacker_units[attacker_idx].clone();
        if attacker.fainted || Self::immobilized(&attacker, rng) {
            return;
        }
        let Some(mv) = attacker.move_by_id(move_id).cloned() else {
            return;
        };
        if rng.gen::<f64>() >= mv.accuracy {
            return;
        }
        match mv.kind {
            MoveKind::Physical | MoveKind::Special => {
                let defender = &mut defender_units[defender_idx];
                let amount = Self::damage(&attacker, defender, &mv, rng);
                Self::apply_damage(defender, amount);
            }
            MoveKind::Ailment(status) => {
                let defender = &mut defender_units[defender_idx];
                if defender.status.is_none() && !defender.fainted {
                    defender.status = Some(status);
                }
            }
            MoveKind::Empower => {
                let units = if own_side { &mut self.own } else { &mut self.foe };
                let user = &mut units[attacker_idx];
                user.boosts.atk = (user.boosts.atk + 1).min(crate::MAX_BOOST_STAGE);
                user.boosts.spa = (user.boosts.spa + 1).min(crate::MAX_BOOST_STAGE);
            }
            MoveKind::Hazard(slot) => {
                let hazards = if own_side {
                    &mut self.foe_hazards
                } else {
                    &mut self.own_hazards
                };
                hazards.0[slot] = true;
            }
        }
    }

    fn refresh_phase(&mut self) {
        let own_alive = self.own.iter().any(|u| !u.fainted);
        let foe_alive = self.foe.iter().any(|u| !u.fainted);
        if !own_alive || !foe_alive {
            self.phase = Phase::Done;
        } else if self.own[self.own_active].fainted {
            self.phase = Phase::ReplaceOwn;
        } else if self.foe[self.foe_active].fainted {
            self.phase = Phase::ReplaceFoe;
        } else {
            self.phase = Phase::Turn;
        }
    }

    /// resolve one simultaneous turn. switches happen before moves;
    /// moves go in effective-speed order.
    pub fn step_turn<R: Rng>(&mut self, own: Choice, foe: Choice, rng: &mut R) {
        debug_assert_eq!(self.phase, Phase::Turn);
        self.turns += 1;
        let own_move = match own {
            Choice::Switch(i) => {
                Self::switch_in(&mut self.own, &mut self.own_active, i, self.own_hazards);
                None
            }
            Choice::Move(id) => Some(id),
        };
        let foe_move = match foe {
            Choice::Switch(i) => {
                Self::switch_in(&mut self.foe, &mut self.foe_active, i, self.foe_hazards);
                None
            }
            Choice::Move(id) => Some(id),
        };
        let own_first = Self::effective_speed(&self.own[self.own_active])
            >= Self::effective_speed(&self.foe[self.foe_active]);
        let order: [(bool, &Option<String>); 2] = if own_first {
            [(true, &own_move), (false, &foe_move)]
        } else {
            [(false, &foe_move), (true, &own_move)]
        };
        for (side, mv) in order {
            if let Some(id) = mv {
                self.act(side, id, rng);
            }
        }
        Self::chip(&mut self.own[self.own_active]);
        Self::chip(&mut self.foe[self.foe_active]);
        self.refresh_phase();
    }

    /// send the agent's replacement after a faint
    pub fn replace_own(&mut self, choice: Choice) {
        debug_assert_eq!(self.phase, Phase::ReplaceOwn);
        if let Choice::Switch(i) = choice {
            Self::switch_in(&mut self.own, &mut self.own_active, i, self.own_hazards);
        }
        self.refresh_phase();
    }

    /// send the scripted side's replacement after a faint
    pub fn replace_foe(&mut self, choice: Choice) {
        debug_assert_eq!(self.phase, Phase::ReplaceFoe);
        if let Choice::Switch(i) = choice {
            Self::switch_in(&mut self.foe, &mut self.foe_active, i, self.foe_hazards);
        }
        self.refresh_phase();
    }
}
