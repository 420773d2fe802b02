use soroban_sdk::{contracttype, Address};

/// Farm configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    /// Account allowed to change the emission schedule
    pub admin: Address,
    /// Pool whose current tick drives activation, and whose positions may be staked
    pub pool: Address,
    /// Custody layer holding staked range-order tokens
    pub position_manager: Address,
    /// Token paid out as rewards
    pub reward_token: Address,
    /// Tick spacing of the pool
    pub tick_spacing: i32,
    /// Appraisal curve offset, in tick-spacing units
    pub appraisal_offset: u32,
}

/// Reward accumulator and active-set state - stored in Instance storage
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmState {
    /// Reward tokens emitted per second while any weight is active
    pub reward_rate: i128,
    /// Emission start (ledger timestamp)
    pub period_start: u64,
    /// Emission end (ledger timestamp)
    pub period_end: u64,
    /// Last time the accumulator was advanced, clamped to the period
    pub last_update_time: u64,
    /// Cumulative reward per unit of active weight, scaled by REWARD_SCALE
    pub acc_reward_per_weight: i128,
    /// Sum of weights of in-range positions
    pub active_weight: i128,
    /// Pool tick observed at the end of the last boundary walk
    pub last_observed_tick: i32,
    /// Sum of weights of all staked positions
    pub total_weight: i128,
    /// Number of staked positions
    pub position_count: u32,
}

impl FarmState {
    pub fn new(
        reward_rate: i128,
        period_start: u64,
        period_end: u64,
        now: u64,
        tick: i32,
    ) -> Self {
        Self {
            reward_rate,
            period_start,
            period_end,
            last_update_time: now.clamp(period_start, period_end),
            acc_reward_per_weight: 0,
            active_weight: 0,
            last_observed_tick: tick,
            total_weight: 0,
            position_count: 0,
        }
    }
}
