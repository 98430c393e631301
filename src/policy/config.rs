use crate::{Probability, Value};

/// tuning parameters, fixed at construction. the orchestration layer may
/// decay epsilon between matches; nothing else mutates at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Hyper {
    /// learning rate
    pub alpha: Value,
    /// discount
    pub gamma: Value,
    /// trace decay
    pub lambda: Value,
    /// exploration rate
    pub epsilon: Probability,
    /// eligibility entries below this are dropped
    pub trace_floor: Value,
    /// seed unseen table entries from the heuristic instead of 0.0
    pub heuristic_init: bool,
    /// softmax temperatures for heuristic seeding
    pub master_temperature: Value,
    pub sub_temperature: Value,
}

impl Default for Hyper {
    fn default() -> Self {
        Self {
            alpha: crate::DEFAULT_ALPHA,
            gamma: crate::DEFAULT_GAMMA,
            lambda: crate::DEFAULT_LAMBDA,
            epsilon: crate::DEFAULT_EPSILON,
            trace_floor: crate::TRACE_FLOOR,
            heuristic_init: true,
            master_temperature: crate::MASTER_SEED_TEMPERATURE,
            sub_temperature: crate::SUB_SEED_TEMPERATURE,
        }
    }
}
