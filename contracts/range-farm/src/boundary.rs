use crate::error::FarmError;
use crate::storage::{get_boundary, set_boundary};
use crate::tick;
use farm_types::BoundaryInfo;
use soroban_sdk::Env;

/// Load the boundary at `tick`
/// A set tick-index bit with no boundary entry is a broken index.
pub fn load(env: &Env, tick: i32) -> Result<BoundaryInfo, FarmError> {
    get_boundary(env, tick).ok_or(FarmError::BoundaryMissing)
}

/// Anchor a position edge at `tick`
///
/// `net_delta` is the weight change applied when price crosses the tick
/// moving upward: +weight for a lower edge, -weight for an upper edge.
/// The first anchor at a tick flips its tick-index bit on.
pub fn anchor(
    env: &Env,
    tick: i32,
    tick_spacing: i32,
    position_id: u32,
    net_delta: i128,
) -> Result<(), FarmError> {
    let mut info = match get_boundary(env, tick) {
        Some(info) => info,
        None => {
            tick::set_bit(env, tick, tick_spacing)?;
            BoundaryInfo::new(env)
        }
    };

    info.net_weight = info
        .net_weight
        .checked_add(net_delta)
        .ok_or(FarmError::ArithmeticOverflow)?;
    info.positions.push_back(position_id);

    set_boundary(env, tick, &info);
    Ok(())
}

/// Release a position edge previously anchored at `tick`
///
/// Releasing the last anchor deletes the boundary and clears its bit.
pub fn release(
    env: &Env,
    tick: i32,
    tick_spacing: i32,
    position_id: u32,
    net_delta: i128,
) -> Result<(), FarmError> {
    let mut info = load(env, tick)?;

    let index = info
        .positions
        .first_index_of(position_id)
        .ok_or(FarmError::BoundaryMissing)?;
    info.positions.remove(index);

    info.net_weight = info
        .net_weight
        .checked_sub(net_delta)
        .ok_or(FarmError::ArithmeticOverflow)?;

    if info.is_empty() {
        debug_assert!(info.net_weight == 0);
        tick::clear_bit(env, tick, tick_spacing)?;
    }

    set_boundary(env, tick, &info);
    Ok(())
}
