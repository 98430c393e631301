use crate::battle::snapshot::Snapshot;
use crate::battle::unit::MoveKind;
use crate::battle::Choice;
use rand::Rng;

/// scripted opponents for training runs. `Random` plays uniformly;
/// `MaxPower` always throws its strongest effective hit and switches
/// only when forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scripted {
    Random,
    MaxPower,
}

impl std::str::FromStr for Scripted {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::Random),
            "maxpower" => Ok(Self::MaxPower),
            other => Err(format!("unknown opponent '{}'", other)),
        }
    }
}

impl Scripted {
    pub fn act<R: Rng>(&self, view: &Snapshot, rng: &mut R) -> Choice {
        if view.available_moves.is_empty() {
            // forced replacement, or nothing else to do
            let n = view.switch_candidates.len().max(1);
            return Choice::Switch(rng.gen_range(0..n));
        }
        match self {
            Self::Random => {
                let idx = rng.gen_range(0..view.available_moves.len());
                Choice::Move(view.available_moves[idx].clone())
            }
            Self::MaxPower => {
                let active = view.own_active.as_ref();
                let target = view.foe_active.as_ref();
                let best = active
                    .map(|unit| {
                        unit.moves
                            .iter()
                            .filter(|m| view.available_moves.contains(&m.id))
                            .map(|m| {
                                let effectiveness = target
                                    .map(|t| m.element.against(&t.elements))
                                    .unwrap_or(1.0);
                                let power = match m.kind {
                                    MoveKind::Physical | MoveKind::Special => m.power,
                                    _ => 0.0,
                                };
                                (m.id.clone(), power * effectiveness)
                            })
                            .max_by(|a, b| a.1.total_cmp(&b.1))
                    })
                    .flatten();
                match best {
                    Some((id, _)) => Choice::Move(id),
                    None => {
                        let idx = rng.gen_range(0..view.available_moves.len());
                        Choice::Move(view.available_moves[idx].clone())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skirmish::battle::Battle;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn max_power_prefers_effective_hits() {
        let mut rng = SmallRng::seed_from_u64(9);
        let battle = Battle::new(&mut rng);
        let view = battle.snapshot_foe();
        match Scripted::MaxPower.act(&view, &mut rng) {
            Choice::Move(id) => assert!(view.available_moves.contains(&id)),
            Choice::Switch(_) => panic!("should not switch with moves available"),
        }
    }

    #[test]
    fn random_always_answers() {
        let mut rng = SmallRng::seed_from_u64(10);
        let battle = Battle::new(&mut rng);
        for _ in 0..16 {
            match Scripted::Random.act(&battle.snapshot_foe(), &mut rng) {
                Choice::Move(id) => assert!(!id.is_empty()),
                Choice::Switch(i) => assert!(i < battle.snapshot_foe().switch_candidates.len()),
            }
        }
    }
}
