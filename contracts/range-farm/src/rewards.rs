use crate::error::FarmError;
use farm_math::{emission_window, emitted_rewards, reward_per_weight};
use farm_types::FarmState;
use soroban_sdk::{log, Env};

/// Advance the reward accumulator to `now`
///
/// Emission is clamped to the reward period. With no active weight the
/// window still closes, so those rewards are never emitted.
pub fn accrue(env: &Env, state: &mut FarmState, now: u64) -> Result<(), FarmError> {
    if now <= state.last_update_time {
        return Ok(());
    }

    let (from, to) = emission_window(
        state.last_update_time,
        now,
        state.period_start,
        state.period_end,
    );
    let reward =
        emitted_rewards(state.reward_rate, from, to).ok_or(FarmError::ArithmeticOverflow)?;

    if state.active_weight > 0 && reward > 0 {
        let growth = reward_per_weight(env, reward, state.active_weight);
        state.acc_reward_per_weight = state
            .acc_reward_per_weight
            .checked_add(growth)
            .ok_or(FarmError::ArithmeticOverflow)?;
        log!(env, "accrue", reward, state.acc_reward_per_weight);
    }

    state.last_update_time = now.clamp(state.period_start, state.period_end);
    Ok(())
}

/// State as it would look after accruing to `now`, without writing it
pub fn simulate(env: &Env, state: &FarmState, now: u64) -> Result<FarmState, FarmError> {
    let mut projected = state.clone();
    accrue(env, &mut projected, now)?;
    Ok(projected)
}
