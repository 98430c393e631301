pub mod shaper;

pub use shaper::{Aggregates, Shaper};
