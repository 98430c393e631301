use crate::battle::element::Element;
use crate::battle::status::Status;
use crate::battle::unit::{Boosts, Move, MoveKind, Stats, Unit};
use crate::battle::Hazards;
use rand::seq::SliceRandom;
use rand::Rng;

/// roster size per side
pub const TEAM_SIZE: usize = 6;

fn mv(id: &str, element: Element, kind: MoveKind, power: f64, accuracy: f64) -> Move {
    Move {
        id: id.to_string(),
        power,
        accuracy,
        element,
        kind,
    }
}

pub fn move_pool() -> Vec<Move> {
    use Element::*;
    use MoveKind::*;
    vec![
        mv("slash", Normal, Physical, 70.0, 1.0),
        mv("bodyslam", Normal, Physical, 85.0, 1.0),
        mv("flamethrower", Fire, Special, 95.0, 1.0),
        mv("surf", Water, Special, 90.0, 1.0),
        mv("thunderbolt", Electric, Special, 95.0, 1.0),
        mv("razorleaf", Grass, Special, 55.0, 0.95),
        mv("blizzard", Ice, Special, 110.0, 0.9),
        mv("submission", Fighting, Physical, 80.0, 0.8),
        mv("sludge", Poison, Physical, 65.0, 1.0),
        mv("earthquake", Ground, Physical, 100.0, 1.0),
        mv("drillpeck", Flying, Physical, 80.0, 1.0),
        mv("psychic", Psychic, Special, 90.0, 1.0),
        mv("rockslide", Rock, Physical, 75.0, 0.9),
        mv("toxin", Poison, Ailment(Status::Toxic), 0.0, 0.9),
        mv("thunderwave", Electric, Ailment(Status::Paralysis), 0.0, 0.9),
        mv("hypnosis", Psychic, Ailment(Status::Sleep), 0.0, 0.6),
        mv("sharpen", Normal, Empower, 0.0, 1.0),
        mv("spikes", Ground, Hazard(Hazards::SPIKES), 0.0, 1.0),
        mv("rocktrap", Rock, Hazard(Hazards::ROCKS), 0.0, 1.0),
        mv("webbing", Grass, Hazard(Hazards::WEB), 0.0, 1.0),
        mv("toxicspikes", Poison, Hazard(Hazards::TOXIC_SPIKES), 0.0, 1.0),
    ]
}

struct Template {
    species: &'static str,
    elements: &'static [Element],
    hp: u32,
    stats: Stats,
    moves: &'static [&'static str],
}

fn bestiary() -> Vec<Template> {
    use Element::*;
    vec![
        Template {
            species: "tauros",
            elements: &[Normal],
            hp: 290,
            stats: Stats { atk: 100, def: 95, spa: 70, spd: 70, spe: 110 },
            moves: &["bodyslam", "earthquake", "rockslide", "thunderwave"],
        },
        Template {
            species: "starmie",
            elements: &[Water, Psychic],
            hp: 260,
            stats: Stats { atk: 75, def: 85, spa: 100, spd: 100, spe: 115 },
            moves: &["surf", "psychic", "thunderbolt", "thunderwave"],
        },
        Template {
            species: "golem",
            elements: &[Rock, Ground],
            hp: 270,
            stats: Stats { atk: 110, def: 130, spa: 55, spd: 55, spe: 45 },
            moves: &["earthquake", "rockslide", "rocktrap", "spikes"],
        },
        Template {
            species: "jolteon",
            elements: &[Electric],
            hp: 250,
            stats: Stats { atk: 65, def: 60, spa: 110, spd: 95, spe: 130 },
            moves: &["thunderbolt", "thunderwave", "bodyslam", "sharpen"],
        },
        Template {
            species: "arcanine",
            elements: &[Fire],
            hp: 300,
            stats: Stats { atk: 110, def: 80, spa: 100, spd: 80, spe: 95 },
            moves: &["flamethrower", "bodyslam", "slash", "sharpen"],
        },
        Template {
            species: "lapras",
            elements: &[Water, Ice],
            hp: 340,
            stats: Stats { atk: 85, def: 80, spa: 95, spd: 95, spe: 60 },
            moves: &["surf", "blizzard", "bodyslam", "hypnosis"],
        },
        Template {
            species: "exeggutor",
            elements: &[Grass, Psychic],
            hp: 310,
            stats: Stats { atk: 95, def: 85, spa: 125, spd: 125, spe: 55 },
            moves: &["razorleaf", "psychic", "toxin", "hypnosis"],
        },
        Template {
            species: "snorlax",
            elements: &[Normal],
            hp: 380,
            stats: Stats { atk: 110, def: 65, spa: 65, spd: 65, spe: 30 },
            moves: &["bodyslam", "earthquake", "surf", "sharpen"],
        },
        Template {
            species: "machamp",
            elements: &[Fighting],
            hp: 300,
            stats: Stats { atk: 130, def: 80, spa: 65, spd: 65, spe: 55 },
            moves: &["submission", "earthquake", "rockslide", "bodyslam"],
        },
        Template {
            species: "gengar",
            elements: &[Poison],
            hp: 240,
            stats: Stats { atk: 65, def: 60, spa: 130, spd: 130, spe: 110 },
            moves: &["sludge", "psychic", "thunderbolt", "hypnosis"],
        },
        Template {
            species: "articuno",
            elements: &[Ice, Flying],
            hp: 320,
            stats: Stats { atk: 85, def: 100, spa: 125, spd: 125, spe: 85 },
            moves: &["blizzard", "drillpeck", "bodyslam", "toxin"],
        },
        Template {
            species: "victreebel",
            elements: &[Grass, Poison],
            hp: 280,
            stats: Stats { atk: 105, def: 65, spa: 100, spd: 100, spe: 70 },
            moves: &["razorleaf", "sludge", "toxicspikes", "webbing"],
        },
    ]
}

fn build(template: &Template, pool: &[Move]) -> Unit {
    Unit {
        species: template.species.to_string(),
        hp: template.hp,
        max_hp: template.hp,
        fainted: false,
        status: None,
        boosts: Boosts::default(),
        ability: None,
        elements: template.elements.to_vec(),
        stats: template.stats,
        moves: template
            .moves
            .iter()
            .map(|id| {
                pool.iter()
                    .find(|m| m.id == *id)
                    .expect("bestiary references a pooled move")
                    .clone()
            })
            .collect(),
    }
}

/// a random team of distinct species
pub fn roster<R: Rng>(rng: &mut R) -> Vec<Unit> {
    let pool = move_pool();
    let mut all = bestiary();
    all.shuffle(rng);
    all.iter().take(TEAM_SIZE).map(|t| build(t, &pool)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn rosters_are_full_and_distinct() {
        let mut rng = SmallRng::seed_from_u64(0);
        let team = roster(&mut rng);
        assert_eq!(team.len(), TEAM_SIZE);
        let mut species: Vec<_> = team.iter().map(|u| u.species.clone()).collect();
        species.sort();
        species.dedup();
        assert_eq!(species.len(), TEAM_SIZE);
        for unit in team {
            assert_eq!(unit.moves.len(), 4);
            assert!(unit.hp > 0 && unit.hp == unit.max_hp);
        }
    }
}
