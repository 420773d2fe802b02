use crate::error::FarmError;
use farm_types::{PositionData, MAX_TICK, MIN_TICK};
use soroban_sdk::{contractclient, Address, Env};

/// Current-tick source, implemented by the pool the farm tracks
#[allow(dead_code)]
#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracle {
    fn tick(env: Env) -> i32;
    fn tick_spacing(env: Env) -> i32;
}

/// Custody layer for range-order tokens (the position manager)
#[allow(dead_code)]
#[contractclient(name = "PositionCustodyClient")]
pub trait PositionCustody {
    fn get_position(env: Env, position_id: u32) -> PositionData;
    fn owner_of(env: Env, position_id: u32) -> Address;
    fn transfer_from(env: Env, from: Address, to: Address, position_id: u32);
}

/// Read the pool's current tick
pub fn read_tick(env: &Env, pool: &Address) -> Result<i32, FarmError> {
    let tick = match PriceOracleClient::new(env, pool).try_tick() {
        Ok(Ok(tick)) => tick,
        _ => return Err(FarmError::OracleUnavailable),
    };
    if !(MIN_TICK..=MAX_TICK).contains(&tick) {
        return Err(FarmError::TickOutOfRange);
    }
    Ok(tick)
}

/// Read the pool's tick spacing
/// Accepted spacings lie in `1..=MAX_TICK`, keeping bitmap tick arithmetic inside `i32`.
pub fn read_tick_spacing(env: &Env, pool: &Address) -> Result<i32, FarmError> {
    match PriceOracleClient::new(env, pool).try_tick_spacing() {
        Ok(Ok(spacing)) if (1..=MAX_TICK).contains(&spacing) => Ok(spacing),
        Ok(Ok(_)) => Err(FarmError::InvalidTickRange),
        _ => Err(FarmError::OracleUnavailable),
    }
}

/// Fetch a position record and its current holder from custody
pub fn read_position(
    env: &Env,
    custody: &Address,
    position_id: u32,
) -> Result<(PositionData, Address), FarmError> {
    let client = PositionCustodyClient::new(env, custody);
    let data = match client.try_get_position(&position_id) {
        Ok(Ok(data)) => data,
        _ => return Err(FarmError::PositionNotFound),
    };
    let holder = match client.try_owner_of(&position_id) {
        Ok(Ok(holder)) => holder,
        _ => return Err(FarmError::PositionNotFound),
    };
    Ok((data, holder))
}

/// Move a position token between holders
pub fn transfer_position(
    env: &Env,
    custody: &Address,
    from: &Address,
    to: &Address,
    position_id: u32,
) {
    PositionCustodyClient::new(env, custody).transfer_from(from, to, &position_id);
}
