pub mod action;
pub mod element;
pub mod snapshot;
pub mod status;
pub mod unit;

pub use action::{ActionId, Choice};
pub use element::Element;
pub use snapshot::{Hazards, Snapshot};
pub use status::Status;
pub use unit::{Boosts, Move, MoveKind, Stats, Unit};
