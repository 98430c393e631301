use super::snapshot::Snapshot;
use super::unit::Move;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// number of direct ability slots in the master action set
pub const SLOTS: u8 = 4;

/// abstract action identity in the master policy. slots index into the
/// active unit's sorted known moves, so the mapping is stable across
/// decision points within a match; `Delegate` hands the choice to the
/// switch sub-policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionId {
    Slot(u8),
    Delegate,
}

/// concrete order handed back to the match engine, resolved from an
/// `ActionId` against the current snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Move(String),
    /// index into `Snapshot::switch_candidates`
    Switch(usize),
}

/// legal master actions at this decision point. may be empty, which
/// signals an engine-contract violation the caller must fall back from.
pub fn legal(snapshot: &Snapshot) -> SmallVec<[ActionId; 5]> {
    let mut out = SmallVec::new();
    let alive = snapshot
        .own_active
        .as_ref()
        .map(|u| !u.fainted)
        .unwrap_or(false);
    if !snapshot.force_switch && alive {
        let known = snapshot.sorted_known_moves();
        for slot in 0..SLOTS {
            if let Some(id) = known.get(slot as usize) {
                if snapshot.available_moves.iter().any(|m| m == id) {
                    out.push(ActionId::Slot(slot));
                }
            }
        }
    }
    if !snapshot.switch_candidates.is_empty() {
        out.push(ActionId::Delegate);
    }
    out
}

/// the move a slot denotes under the sorted-known-moves convention
pub fn resolve_slot(snapshot: &Snapshot, slot: u8) -> Option<&Move> {
    let known = snapshot.sorted_known_moves();
    let id = known.get(slot as usize)?;
    snapshot.own_active.as_ref()?.move_by_id(id)
}
