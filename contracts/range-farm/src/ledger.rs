use crate::error::FarmError;
use crate::storage::{get_user, set_user};
use farm_math::{accrued, add_delta, pending as pending_rewards};
use farm_types::{FarmConfig, FarmState, UserInfo};
use soroban_sdk::{log, token, Address, Env};

/// Apply a signed delta to an active weight
/// A weight that would go negative is a broken ledger, never clamped.
pub fn apply_delta(weight: i128, delta: i128) -> Result<i128, FarmError> {
    add_delta(weight, delta).ok_or(if delta < 0 {
        FarmError::WeightUnderflow
    } else {
        FarmError::ArithmeticOverflow
    })
}

/// Move an owner's active weight, keeping earnings intact
///
/// Deactivated weight credits its accrued share to `banked_rewards`;
/// activated weight debits the same share, so it only earns accumulator
/// growth from here on. `reward_debt` is left for settlement. A crossing
/// and its reverse at the same accumulator restore both fields exactly.
pub fn shift_weight(
    env: &Env,
    user: &mut UserInfo,
    delta: i128,
    acc_reward_per_weight: i128,
) -> Result<(), FarmError> {
    let moved = delta.checked_abs().ok_or(FarmError::ArithmeticOverflow)?;
    let share = accrued(env, moved, acc_reward_per_weight);

    let banked = if delta < 0 {
        user.banked_rewards.checked_add(share)
    } else {
        user.banked_rewards.checked_sub(share)
    };
    user.banked_rewards = banked.ok_or(FarmError::ArithmeticOverflow)?;
    user.active_weight = apply_delta(user.active_weight, delta)?;
    Ok(())
}

/// Load, shift and store an owner's ledger
pub fn apply_weight_change(
    env: &Env,
    owner: &Address,
    delta: i128,
    acc_reward_per_weight: i128,
) -> Result<(), FarmError> {
    let mut user = get_user(env, owner);
    shift_weight(env, &mut user, delta, acc_reward_per_weight)?;
    set_user(env, owner, &user);
    Ok(())
}

/// Rewards owed to `user` at accumulator value `acc_reward_per_weight`
pub fn pending(env: &Env, user: &UserInfo, acc_reward_per_weight: i128) -> Result<i128, FarmError> {
    pending_rewards(
        env,
        user.active_weight,
        acc_reward_per_weight,
        user.reward_debt,
        user.banked_rewards,
    )
    .ok_or(FarmError::ArithmeticOverflow)
}

/// Pay out an owner's pending rewards
///
/// Pays at most the farm's reward-token balance; any shortfall stays
/// banked for a later settlement. Returns the amount transferred.
pub fn settle(
    env: &Env,
    config: &FarmConfig,
    state: &FarmState,
    owner: &Address,
    recipient: &Address,
) -> Result<i128, FarmError> {
    let mut user = get_user(env, owner);
    let owed = pending(env, &user, state.acc_reward_per_weight)?;

    let farm = env.current_contract_address();
    let token = token::Client::new(env, &config.reward_token);
    let paid = owed.min(token.balance(&farm)).max(0);

    user.banked_rewards = owed - paid;
    user.reward_debt = accrued(env, user.active_weight, state.acc_reward_per_weight);
    set_user(env, owner, &user);

    if paid > 0 {
        token.transfer(&farm, recipient, &paid);
    }
    if user.banked_rewards > 0 {
        log!(env, "settle shortfall", owner.clone(), user.banked_rewards);
    }

    Ok(paid)
}
