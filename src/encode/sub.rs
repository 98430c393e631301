use super::{hp_bucket, speed_check, NONE_SPECIES};
use crate::battle::snapshot::Snapshot;
use crate::battle::status;
use crate::battle::unit::Unit;
use serde::{Deserialize, Serialize};

/// discretized sub-policy state: the matchup a switch candidate would
/// walk into, plus the hazards it would cross on the way in. produced
/// fresh per candidate evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubKey {
    pub foe_species: String,
    pub foe_health: u8,
    pub foe_status: u8,
    pub cand_species: String,
    pub cand_health: u8,
    pub cand_status: u8,
    pub hazards: [bool; 4],
    pub faster: bool,
}

pub fn sub(snapshot: &Snapshot, candidate: &Unit) -> SubKey {
    let foe = snapshot.foe_active.as_ref();
    SubKey {
        foe_species: foe
            .map(|u| u.species.clone())
            .unwrap_or_else(|| NONE_SPECIES.to_string()),
        foe_health: foe.map(|u| hp_bucket(u.hp, u.max_hp)).unwrap_or(0),
        foe_status: status::code_of(foe.and_then(|u| u.status)),
        cand_species: candidate.species.clone(),
        cand_health: hp_bucket(candidate.hp, candidate.max_hp),
        cand_status: status::code_of(candidate.status),
        hazards: snapshot.hazards.flags(),
        faster: speed_check(Some(candidate), foe),
    }
}
