use super::unit::Unit;

/// entry hazards on one side of the field, in a fixed slot order
/// (spikes, rocks, web, toxic spikes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hazards(pub [bool; 4]);

impl Hazards {
    pub const SPIKES: usize = 0;
    pub const ROCKS: usize = 1;
    pub const WEB: usize = 2;
    pub const TOXIC_SPIKES: usize = 3;

    pub fn flags(&self) -> [bool; 4] {
        self.0
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|f| *f)
    }
}

/// everything the match engine exposes at one decision point.
/// the learning core consumes this read-only; it never advances a match.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub own_active: Option<Unit>,
    pub foe_active: Option<Unit>,
    /// full rosters, active units included, for reward aggregation
    pub own_roster: Vec<Unit>,
    pub foe_roster: Vec<Unit>,
    /// hazards on the agent's side
    pub hazards: Hazards,
    /// the engine demands a replacement; direct moves are illegal
    pub force_switch: bool,
    /// ids of moves usable this turn (a subset of the active unit's moves)
    pub available_moves: Vec<String>,
    /// bench units eligible to switch in
    pub switch_candidates: Vec<Unit>,
}

impl Snapshot {
    /// all known move ids of the own active unit, sorted for a stable
    /// slot order across decision points
    pub fn sorted_known_moves(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .own_active
            .iter()
            .flat_map(|u| u.moves.iter().map(|m| m.id.as_str()))
            .collect();
        ids.sort_unstable();
        ids
    }
}
