use crate::boundary;
use crate::collaborators::read_tick;
use crate::error::FarmError;
use crate::events;
use crate::invariants::{accumulator_monotonic, active_weight_bounded, update_time_in_period};
use crate::ledger::{apply_delta, apply_weight_change};
use crate::rewards;
use crate::storage::{get_config, get_position, get_state, set_state};
use crate::tick::next_initialized;
use farm_math::directed_delta;
use farm_types::{FarmConfig, FarmState};
use soroban_sdk::{log, Env};

/// Bring the farm up to date with the clock and the pool's current tick
///
/// Order matters: rewards for the elapsed interval accrue at the old
/// active weight before any boundary crossed since then changes it.
/// Every mutating entry point calls this before touching the ledger.
pub fn sync(env: &Env) -> Result<(FarmConfig, FarmState), FarmError> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;

    let acc_before = state.acc_reward_per_weight;
    rewards::accrue(env, &mut state, env.ledger().timestamp())?;
    debug_assert!(accumulator_monotonic(acc_before, state.acc_reward_per_weight));
    debug_assert!(update_time_in_period(&state));

    let tick = read_tick(env, &config.pool)?;
    walk(env, &config, &mut state, tick)?;
    debug_assert!(active_weight_bounded(&state));

    set_state(env, &state);
    Ok((config, state))
}

/// Cross every initialized boundary between the last observed tick and
/// `new_tick`, in price order
///
/// Moving up crosses ticks t with last < t <= new; moving down crosses
/// ticks t with new < t <= last. Returns the number of boundaries crossed.
pub fn walk(
    env: &Env,
    config: &FarmConfig,
    state: &mut FarmState,
    new_tick: i32,
) -> Result<u32, FarmError> {
    let from_tick = state.last_observed_tick;
    let mut current = from_tick;
    let mut crossings = 0u32;

    if new_tick > current {
        loop {
            let (next, found) = next_initialized(env, current, true, new_tick, config.tick_spacing);
            if !found {
                break;
            }
            cross(env, state, next, true)?;
            crossings += 1;
            current = next;
        }
    } else if new_tick < current {
        let limit = new_tick + 1;
        loop {
            let (next, found) = next_initialized(env, current, false, limit, config.tick_spacing);
            if !found {
                break;
            }
            cross(env, state, next, false)?;
            crossings += 1;
            current = next - 1;
        }
    }

    state.last_observed_tick = new_tick;

    if crossings > 0 {
        events::ticks_crossed(env, from_tick, new_tick, crossings, state.active_weight);
    }
    Ok(crossings)
}

/// Apply one boundary to the global active weight and to each anchored
/// owner's ledger
fn cross(env: &Env, state: &mut FarmState, tick: i32, upward: bool) -> Result<(), FarmError> {
    let info = boundary::load(env, tick)?;

    let net = directed_delta(info.net_weight, upward).ok_or(FarmError::ArithmeticOverflow)?;
    state.active_weight = apply_delta(state.active_weight, net)?;

    for position_id in info.positions.iter() {
        let position = get_position(env, position_id).ok_or(FarmError::PositionNotFound)?;
        let delta = directed_delta(position.upward_delta_at(tick), upward)
            .ok_or(FarmError::ArithmeticOverflow)?;
        apply_weight_change(env, &position.owner, delta, state.acc_reward_per_weight)?;
    }

    log!(env, "cross", tick, upward, state.active_weight);
    Ok(())
}
