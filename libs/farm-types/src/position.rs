use soroban_sdk::{contracttype, Address};

/// A range position staked in the farm
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedPosition {
    pub owner: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    /// Raw liquidity of the underlying position
    pub liquidity: u128,
    /// Appraised reward weight, fixed at deposit
    pub weight: i128,
}

impl StakedPosition {
    /// Net weight change applied when price crosses `tick` moving upward
    pub fn upward_delta_at(&self, tick: i32) -> i128 {
        if tick == self.tick_lower {
            self.weight
        } else if tick == self.tick_upper {
            -self.weight
        } else {
            0
        }
    }
}

/// Position record held by the custody layer (position manager NFT)
#[contracttype]
#[derive(Clone, Debug)]
pub struct PositionData {
    /// Pool contract address
    pub pool: Address,
    /// Lower tick boundary
    pub tick_lower: i32,
    /// Upper tick boundary
    pub tick_upper: i32,
    /// Liquidity amount
    pub liquidity: u128,
    /// Fee growth inside at last action (token0)
    pub fee_growth_inside_0_last_x128: u128,
    /// Fee growth inside at last action (token1)
    pub fee_growth_inside_1_last_x128: u128,
    /// Tokens owed (token0)
    pub tokens_owed_0: u128,
    /// Tokens owed (token1)
    pub tokens_owed_1: u128,
}
