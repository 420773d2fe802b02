use soroban_sdk::contracttype;

/// Per-owner reward ledger
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserInfo {
    /// Sum of weights of the owner's in-range positions
    pub active_weight: i128,
    /// active_weight * acc_reward_per_weight / REWARD_SCALE at last settlement
    pub reward_debt: i128,
    /// Shares credited on deactivation and debited on activation, plus any
    /// settlement shortfall. Negative while activated shares are unrepaid.
    pub banked_rewards: i128,
    /// Number of positions the owner has staked
    pub position_count: u32,
}

impl UserInfo {
    pub fn new() -> Self {
        Self::default()
    }
}
