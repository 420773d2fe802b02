#![no_std]

mod boundary;
mod collaborators;
mod crossing;
mod error;
mod events;
mod invariants;
mod ledger;
mod registry;
mod rewards;
mod storage;
mod tick;


pub use error::FarmError;

use farm_types::{BoundaryInfo, FarmConfig, FarmState, StakedPosition, UserInfo};
use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};
use storage::{
    get_boundary, get_config, get_position, get_state, get_user, has_config, set_config, set_state,
};

#[contract]
pub struct RangeFarm;

#[contractimpl]
impl RangeFarm {
    /// Initialize the farm against a pool
    ///
    /// Tick spacing and the starting tick are read from the pool.
    pub fn initialize(
        env: Env,
        admin: Address,
        pool: Address,
        position_manager: Address,
        reward_token: Address,
        reward_rate: i128,
        period_start: u64,
        period_end: u64,
        appraisal_offset: u32,
    ) -> Result<(), FarmError> {
        if has_config(&env) {
            return Err(FarmError::AlreadyInitialized);
        }
        admin.require_auth();

        if period_start >= period_end {
            return Err(FarmError::InvalidPeriod);
        }
        if reward_rate < 0 {
            return Err(FarmError::InvalidRewardRate);
        }

        let tick_spacing = collaborators::read_tick_spacing(&env, &pool)?;
        let tick = collaborators::read_tick(&env, &pool)?;

        let config = FarmConfig {
            admin,
            pool,
            position_manager,
            reward_token,
            tick_spacing,
            appraisal_offset,
        };
        set_config(&env, &config);

        let state = FarmState::new(
            reward_rate,
            period_start,
            period_end,
            env.ledger().timestamp(),
            tick,
        );
        set_state(&env, &state);

        events::initialized(&env, &config.pool, &config.reward_token, tick);
        Ok(())
    }

    /// Stake a range position held by `owner`
    ///
    /// # Returns
    /// The appraised reward weight
    pub fn deposit(env: Env, owner: Address, position_id: u32) -> Result<i128, FarmError> {
        owner.require_auth();
        let (config, mut state) = crossing::sync(&env)?;

        let (data, holder) =
            collaborators::read_position(&env, &config.position_manager, position_id)?;
        if holder != owner {
            return Err(FarmError::NotPositionOwner);
        }

        let weight = registry::register(&env, &config, &mut state, &owner, position_id, &data)?;
        set_state(&env, &state);

        collaborators::transfer_position(
            &env,
            &config.position_manager,
            &owner,
            &env.current_contract_address(),
            position_id,
        );

        let active =
            farm_types::in_range(data.tick_lower, data.tick_upper, state.last_observed_tick);
        events::deposited(&env, &owner, position_id, weight, active);
        Ok(weight)
    }

    /// Unstake a position, pay the owner's rewards and return the token
    ///
    /// # Returns
    /// Reward tokens paid
    pub fn withdraw(env: Env, owner: Address, position_id: u32) -> Result<i128, FarmError> {
        owner.require_auth();
        let (config, mut state) = crossing::sync(&env)?;

        registry::deregister(&env, &config, &mut state, &owner, position_id)?;
        set_state(&env, &state);

        let paid = ledger::settle(&env, &config, &state, &owner, &owner)?;

        collaborators::transfer_position(
            &env,
            &config.position_manager,
            &env.current_contract_address(),
            &owner,
            position_id,
        );

        events::withdrawn(&env, &owner, position_id, paid);
        Ok(paid)
    }

    /// Pay the owner's pending rewards without unstaking
    ///
    /// # Returns
    /// Reward tokens paid
    pub fn harvest(env: Env, owner: Address) -> Result<i128, FarmError> {
        owner.require_auth();
        let (config, state) = crossing::sync(&env)?;

        let paid = ledger::settle(&env, &config, &state, &owner, &owner)?;

        events::harvested(&env, &owner, paid);
        Ok(paid)
    }

    /// Accrue rewards and cross any boundaries the pool tick has passed
    pub fn force_update(env: Env) -> Result<FarmState, FarmError> {
        let (_, state) = crossing::sync(&env)?;
        Ok(state)
    }

    // === Admin Functions ===

    /// Change the emission rate; the old rate applies up to now
    pub fn set_reward_rate(env: Env, reward_rate: i128) -> Result<(), FarmError> {
        let config = get_config(&env)?;
        config.admin.require_auth();
        if reward_rate < 0 {
            return Err(FarmError::InvalidRewardRate);
        }

        let (_, mut state) = crossing::sync(&env)?;
        let old_rate = state.reward_rate;
        state.reward_rate = reward_rate;
        set_state(&env, &state);

        events::reward_rate_set(&env, old_rate, reward_rate);
        Ok(())
    }

    /// Move the end of the reward period
    ///
    /// The new end must lie after the period start and not in the past. A
    /// period that already ended resumes from now, not from the old end.
    pub fn set_period_end(env: Env, period_end: u64) -> Result<(), FarmError> {
        let config = get_config(&env)?;
        config.admin.require_auth();

        let (_, mut state) = crossing::sync(&env)?;
        let now = env.ledger().timestamp();
        if period_end <= state.period_start || period_end < now {
            return Err(FarmError::InvalidPeriod);
        }

        let old_end = state.period_end;
        state.period_end = period_end;
        state.last_update_time = now.clamp(state.period_start, period_end);
        set_state(&env, &state);

        log!(&env, "period end", old_end, period_end);
        events::period_end_set(&env, old_end, period_end);
        Ok(())
    }

    // === View Functions ===

    pub fn get_config(env: Env) -> Result<FarmConfig, FarmError> {
        get_config(&env)
    }

    /// State as of the last sync
    pub fn get_state(env: Env) -> Result<FarmState, FarmError> {
        get_state(&env)
    }

    pub fn active_weight(env: Env) -> Result<i128, FarmError> {
        Ok(get_state(&env)?.active_weight)
    }

    pub fn acc_reward_per_weight(env: Env) -> Result<i128, FarmError> {
        Ok(get_state(&env)?.acc_reward_per_weight)
    }

    pub fn last_observed_tick(env: Env) -> Result<i32, FarmError> {
        Ok(get_state(&env)?.last_observed_tick)
    }

    /// Rewards `owner` could claim now
    ///
    /// Projects the accumulator to the current time at the last synced
    /// active weight. Boundaries crossed since the last sync are not walked.
    pub fn pending_reward(env: Env, owner: Address) -> Result<i128, FarmError> {
        let state = get_state(&env)?;
        let projected = rewards::simulate(&env, &state, env.ledger().timestamp())?;
        let owed = ledger::pending(&env, &get_user(&env, &owner), projected.acc_reward_per_weight)?;
        // Floor rounding on exits can leave a unit of negative dust
        Ok(owed.max(0))
    }

    pub fn get_position(env: Env, position_id: u32) -> Option<StakedPosition> {
        get_position(&env, position_id)
    }

    pub fn get_user(env: Env, owner: Address) -> UserInfo {
        get_user(&env, &owner)
    }

    pub fn get_boundary(env: Env, tick: i32) -> Option<BoundaryInfo> {
        get_boundary(&env, tick)
    }

    pub fn is_tick_initialized(env: Env, tick: i32) -> Result<bool, FarmError> {
        let config = get_config(&env)?;
        Ok(tick::is_initialized(&env, tick, config.tick_spacing))
    }

    /// Nearest boundary tick from `from` towards `limit`
    ///
    /// # Returns
    /// (tick, found) - `(limit, false)` when no boundary lies in between
    pub fn next_initialized_tick(
        env: Env,
        from: i32,
        up: bool,
        limit: i32,
    ) -> Result<(i32, bool), FarmError> {
        let config = get_config(&env)?;
        Ok(tick::next_initialized(&env, from, up, limit, config.tick_spacing))
    }

    /// Staked position IDs of `owner` with pagination
    /// Maximum limit is 50 to stay within Soroban's read entry limits
    pub fn positions_of(env: Env, owner: Address, start_index: u32, limit: u32) -> Vec<u32> {
        registry::positions_of(&env, &owner, start_index, limit)
    }

    pub fn deposited_count(env: Env, owner: Address) -> u32 {
        registry::deposited_count(&env, &owner)
    }
}
