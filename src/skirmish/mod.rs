pub mod battle;
pub mod data;
pub mod opponent;

pub use battle::{Battle, Phase};
pub use opponent::Scripted;
