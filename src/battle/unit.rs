use super::element::Element;
use super::status::Status;

/// stat modification stages, each clamped to [-6, +6] by the match engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Boosts {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl Boosts {
    pub fn stages(&self) -> [i8; 7] {
        [
            self.atk,
            self.def,
            self.spa,
            self.spd,
            self.spe,
            self.accuracy,
            self.evasion,
        ]
    }

    pub fn total(&self) -> i32 {
        self.stages().iter().map(|s| *s as i32).sum()
    }

    /// conventional stage multiplier: +n -> (2+n)/2, -n -> 2/(2+n)
    pub fn multiplier(stage: i8) -> f64 {
        if stage >= 0 {
            (2 + stage as i32) as f64 / 2.0
        } else {
            2.0 / (2 - stage as i32) as f64
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Physical,
    Special,
    /// inflicts an ailment instead of damage
    Ailment(Status),
    /// raises the user's offensive stages
    Empower,
    /// lays an entry hazard on the target's side
    Hazard(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub id: String,
    pub power: f64,
    pub accuracy: f64,
    pub element: Element,
    pub kind: MoveKind,
}

/// observable view of one unit, as supplied by the match engine
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub species: String,
    pub hp: u32,
    pub max_hp: u32,
    pub fainted: bool,
    pub status: Option<Status>,
    pub boosts: Boosts,
    pub ability: Option<String>,
    pub elements: Vec<Element>,
    pub stats: Stats,
    /// all moves revealed so far; for the own active unit this is the full set
    pub moves: Vec<Move>,
}

impl Unit {
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }

    pub fn move_by_id(&self, id: &str) -> Option<&Move> {
        self.moves.iter().find(|m| m.id == id)
    }
}
