use farm_types::REWARD_SCALE;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

/// Clamp the interval `[last_update, now]` into the emission period
///
/// Returns `(from, to)` with `period_start <= from <= to <= period_end`
/// whenever `last_update <= now`.
pub fn emission_window(
    last_update: u64,
    now: u64,
    period_start: u64,
    period_end: u64,
) -> (u64, u64) {
    (
        last_update.clamp(period_start, period_end),
        now.clamp(period_start, period_end),
    )
}

/// Rewards emitted over `[from, to)` at `rate` tokens per second
/// Returns None on overflow
pub fn emitted_rewards(rate: i128, from: u64, to: u64) -> Option<i128> {
    if to <= from {
        return Some(0);
    }
    rate.checked_mul((to - from) as i128)
}

/// Accumulator growth for `reward` spread over `active_weight` (rounds down)
///
/// Zero active weight suppresses growth: nothing is emitted while the
/// active set is empty.
pub fn reward_per_weight(env: &Env, reward: i128, active_weight: i128) -> i128 {
    if active_weight <= 0 || reward <= 0 {
        return 0;
    }
    reward.fixed_mul_floor(env, &REWARD_SCALE, &active_weight)
}

/// Share of the accumulator owned by `weight` (rounds down)
pub fn accrued(env: &Env, weight: i128, acc_reward_per_weight: i128) -> i128 {
    if weight == 0 || acc_reward_per_weight == 0 {
        return 0;
    }
    weight.fixed_mul_floor(env, &acc_reward_per_weight, &REWARD_SCALE)
}

/// Rewards owed to a ledger entry: accrued - reward_debt + banked
pub fn pending(
    env: &Env,
    weight: i128,
    acc_reward_per_weight: i128,
    reward_debt: i128,
    banked_rewards: i128,
) -> Option<i128> {
    accrued(env, weight, acc_reward_per_weight)
        .checked_sub(reward_debt)?
        .checked_add(banked_rewards)
}
