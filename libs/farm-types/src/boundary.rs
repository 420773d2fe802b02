use soroban_sdk::{contracttype, Env, Vec};

/// Information stored for each tick that is the edge of a staked position
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoundaryInfo {
    /// Net active-weight change when the tick is crossed (+ when moving right)
    pub net_weight: i128,
    /// Positions whose lower or upper tick is this tick
    pub positions: Vec<u32>,
}

impl BoundaryInfo {
    pub fn new(env: &Env) -> Self {
        Self {
            net_weight: 0,
            positions: Vec::new(env),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
