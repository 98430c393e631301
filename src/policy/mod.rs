pub mod agent;
pub mod config;
pub mod heuristic;
pub mod master;
pub mod session;
pub mod sub;
pub mod traces;

pub use agent::Agent;
pub use config::Hyper;
pub use master::MasterTable;
pub use session::Session;
pub use sub::SubTable;
pub use traces::TraceBank;
