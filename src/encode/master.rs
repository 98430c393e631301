use super::{boost_flags, hp_bucket, speed_check, NONE_SPECIES};
use crate::battle::snapshot::Snapshot;
use crate::battle::status;
use serde::{Deserialize, Serialize};

/// discretized master-policy state. structural equality makes two
/// snapshots with the same buckets the same state, which is the
/// deliberate generalization that keeps the table tractable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasterKey {
    pub own_species: String,
    pub own_health: u8,
    pub own_status: u8,
    pub own_ability: String,
    pub own_boosted: bool,
    pub own_max_boosted: bool,
    pub faster: bool,
    pub foe_species: String,
    pub foe_health: u8,
    pub foe_status: u8,
    pub foe_boosted: bool,
    pub foe_max_boosted: bool,
}

/// encode the master state. total: unrevealed units degrade to neutral
/// sentinel features, never an error.
pub fn master(snapshot: &Snapshot) -> MasterKey {
    let own = snapshot.own_active.as_ref();
    let foe = snapshot.foe_active.as_ref();
    let (own_boosted, own_max_boosted) = own.map(boost_flags).unwrap_or((false, false));
    let (foe_boosted, foe_max_boosted) = foe.map(boost_flags).unwrap_or((false, false));
    MasterKey {
        own_species: own
            .map(|u| u.species.clone())
            .unwrap_or_else(|| NONE_SPECIES.to_string()),
        own_health: own.map(|u| hp_bucket(u.hp, u.max_hp)).unwrap_or(0),
        own_status: status::code_of(own.and_then(|u| u.status)),
        own_ability: own
            .and_then(|u| u.ability.clone())
            .unwrap_or_else(|| NONE_SPECIES.to_string()),
        own_boosted,
        own_max_boosted,
        faster: speed_check(own, foe),
        foe_species: foe
            .map(|u| u.species.clone())
            .unwrap_or_else(|| NONE_SPECIES.to_string()),
        foe_health: foe.map(|u| hp_bucket(u.hp, u.max_hp)).unwrap_or(0),
        foe_status: status::code_of(foe.and_then(|u| u.status)),
        foe_boosted,
        foe_max_boosted,
    }
}
