use super::master::MasterTable;
use super::sub::SubTable;
use crate::battle::action::{self, ActionId};
use crate::battle::snapshot::Snapshot;
use crate::battle::unit::{Boosts, Move, MoveKind, Unit};
use crate::encode::{self, MasterKey, SubKey};
use crate::Value;

const SPEED_TIER_COEFFICIENT: f64 = 0.1;
const HP_FRACTION_COEFFICIENT: f64 = 0.4;

/// rough effective stat after boost stages, on the classic base-stat scale
fn stat_estimation(unit: &Unit, stat: &str) -> f64 {
    let (base, stage) = match stat {
        "atk" => (unit.stats.atk, unit.boosts.atk),
        "def" => (unit.stats.def, unit.boosts.def),
        "spa" => (unit.stats.spa, unit.boosts.spa),
        "spd" => (unit.stats.spd, unit.boosts.spd),
        _ => (unit.stats.spe, unit.boosts.spe),
    };
    ((2.0 * base as f64 + 31.0) + 5.0) * Boosts::multiplier(stage)
}

/// expected-damage style desirability of a direct move. pure function of
/// the snapshot; no lookahead, no simulation.
pub fn move_score(mv: &Move, user: Option<&Unit>, target: Option<&Unit>) -> f64 {
    let (user, target) = match (user, target) {
        (Some(u), Some(t)) => (u, t),
        _ => return 0.0,
    };
    let (atk, def) = match mv.kind {
        MoveKind::Physical => (
            stat_estimation(user, "atk"),
            stat_estimation(target, "def"),
        ),
        _ => (
            stat_estimation(user, "spa"),
            stat_estimation(target, "spd"),
        ),
    };
    let ratio = if def > 0.0 { atk / def } else { 1.0 };
    let stab = if user.elements.contains(&mv.element) {
        1.5
    } else {
        1.0
    };
    let effectiveness = mv.element.against(&target.elements);
    mv.power * stab * ratio * mv.accuracy * effectiveness
}

/// matchup quality of sending `candidate` in against `foe`
pub fn matchup_score(candidate: &Unit, foe: Option<&Unit>) -> f64 {
    let foe = match foe {
        Some(f) => f,
        None => return 0.0,
    };
    let offense = candidate
        .elements
        .iter()
        .map(|e| e.against(&foe.elements))
        .fold(0.0, f64::max);
    let exposure = foe
        .elements
        .iter()
        .map(|e| e.against(&candidate.elements))
        .fold(0.0, f64::max);
    let mut score = offense - exposure;
    if candidate.stats.spe > foe.stats.spe {
        score += SPEED_TIER_COEFFICIENT;
    } else if foe.stats.spe > candidate.stats.spe {
        score -= SPEED_TIER_COEFFICIENT;
    }
    score += candidate.hp_fraction() * HP_FRACTION_COEFFICIENT;
    score -= foe.hp_fraction() * HP_FRACTION_COEFFICIENT;
    score
}

/// numerically stable softmax with a flattening temperature
fn softmax(scores: &[f64], temperature: f64) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores
        .iter()
        .map(|s| ((s - max) / temperature).exp())
        .collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// seed every not-yet-visited (state, action) entry for this decision
/// point with its softmax share of the heuristic scores. entries already
/// present are left untouched, so seeding is idempotent and one-shot.
pub fn seed_master(
    table: &mut MasterTable,
    key: &MasterKey,
    legal: &[ActionId],
    snapshot: &Snapshot,
    temperature: Value,
) {
    if legal.iter().all(|a| table.contains(key, *a)) {
        return;
    }
    let user = snapshot.own_active.as_ref();
    let target = snapshot.foe_active.as_ref();
    let scores: Vec<f64> = legal
        .iter()
        .map(|a| match a {
            ActionId::Delegate => crate::DELEGATE_BASELINE_SCORE,
            ActionId::Slot(slot) => action::resolve_slot(snapshot, *slot)
                .map(|mv| move_score(mv, user, target))
                .unwrap_or(0.0),
        })
        .collect();
    let seeds = softmax(&scores, temperature);
    for (a, seed) in legal.iter().zip(seeds) {
        if !table.contains(key, *a) {
            table.set(key.clone(), *a, seed);
        }
    }
}

/// mirror of `seed_master` for the switch specialist, scored by matchup
/// quality across all candidates at once
pub fn seed_sub(table: &mut SubTable, snapshot: &Snapshot, keys: &[SubKey], temperature: Value) {
    debug_assert_eq!(keys.len(), snapshot.switch_candidates.len());
    if keys.iter().all(|k| table.contains(k)) {
        return;
    }
    let foe = snapshot.foe_active.as_ref();
    let scores: Vec<f64> = snapshot
        .switch_candidates
        .iter()
        .map(|cand| matchup_score(cand, foe))
        .collect();
    let seeds = softmax(&scores, temperature);
    for (key, seed) in keys.iter().zip(seeds) {
        if !table.contains(key) {
            table.set(key.clone(), seed);
        }
    }
}
