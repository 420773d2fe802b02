use crate::boundary;
use crate::error::FarmError;
use crate::invariants::position_active;
use crate::ledger::{apply_delta, shift_weight};
use crate::storage::{
    get_owner_position_at, get_owner_position_count, get_position, get_position_index, get_user,
    has_position, remove_owner_position_at, remove_position, remove_position_index,
    set_owner_position_at, set_owner_position_count, set_position, set_position_index, set_user,
};
use farm_math::appraise;
use farm_types::{
    FarmConfig, FarmState, PositionData, StakedPosition, MAX_PAGE_SIZE, MAX_TICK, MIN_TICK,
};
use soroban_sdk::{Address, Env, Vec};

/// Validate a range against the pool's spacing and the tick domain
pub fn check_ticks(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<(), FarmError> {
    if tick_lower >= tick_upper {
        return Err(FarmError::InvalidTickRange);
    }
    if tick_lower < MIN_TICK || tick_upper > MAX_TICK {
        return Err(FarmError::TickOutOfRange);
    }
    if tick_lower % tick_spacing != 0 || tick_upper % tick_spacing != 0 {
        return Err(FarmError::TickNotOnSpacing);
    }
    Ok(())
}

/// Stake a position and return its reward weight
///
/// `state` must already be synced to the pool's current tick: the position
/// starts active iff `tick_lower <= last_observed_tick < tick_upper`.
pub fn register(
    env: &Env,
    config: &FarmConfig,
    state: &mut FarmState,
    owner: &Address,
    position_id: u32,
    data: &PositionData,
) -> Result<i128, FarmError> {
    if has_position(env, position_id) {
        return Err(FarmError::PositionAlreadyStaked);
    }
    if data.pool != config.pool {
        return Err(FarmError::PoolMismatch);
    }
    check_ticks(data.tick_lower, data.tick_upper, config.tick_spacing)?;

    let weight = appraise(
        env,
        data.tick_lower,
        data.tick_upper,
        config.tick_spacing,
        data.liquidity,
        config.appraisal_offset,
    )
    .ok_or(FarmError::ArithmeticOverflow)?;
    if weight <= 0 {
        return Err(FarmError::ZeroWeight);
    }

    let position = StakedPosition {
        owner: owner.clone(),
        tick_lower: data.tick_lower,
        tick_upper: data.tick_upper,
        liquidity: data.liquidity,
        weight,
    };
    set_position(env, position_id, &position);

    boundary::anchor(env, position.tick_lower, config.tick_spacing, position_id, weight)?;
    boundary::anchor(env, position.tick_upper, config.tick_spacing, position_id, -weight)?;

    let mut user = get_user(env, owner);
    if position_active(&position, state.last_observed_tick) {
        shift_weight(env, &mut user, weight, state.acc_reward_per_weight)?;
        state.active_weight = apply_delta(state.active_weight, weight)?;
    }
    user.position_count = user
        .position_count
        .checked_add(1)
        .ok_or(FarmError::ArithmeticOverflow)?;
    set_user(env, owner, &user);

    state.total_weight = apply_delta(state.total_weight, weight)?;
    state.position_count = state
        .position_count
        .checked_add(1)
        .ok_or(FarmError::ArithmeticOverflow)?;

    add_to_owner_index(env, owner, position_id);

    Ok(weight)
}

/// Unstake a position owned by `caller`
///
/// Any reward earned while it was active is banked in the owner's ledger.
pub fn deregister(
    env: &Env,
    config: &FarmConfig,
    state: &mut FarmState,
    caller: &Address,
    position_id: u32,
) -> Result<StakedPosition, FarmError> {
    let position = get_position(env, position_id).ok_or(FarmError::PositionNotFound)?;
    if position.owner != *caller {
        return Err(FarmError::NotPositionOwner);
    }

    let mut user = get_user(env, caller);
    if position_active(&position, state.last_observed_tick) {
        shift_weight(env, &mut user, -position.weight, state.acc_reward_per_weight)?;
        state.active_weight = apply_delta(state.active_weight, -position.weight)?;
    }
    user.position_count = user
        .position_count
        .checked_sub(1)
        .ok_or(FarmError::IndexCorrupted)?;
    set_user(env, caller, &user);

    let spacing = config.tick_spacing;
    boundary::release(env, position.tick_lower, spacing, position_id, position.weight)?;
    boundary::release(env, position.tick_upper, spacing, position_id, -position.weight)?;

    remove_position(env, position_id);
    remove_from_owner_index(env, caller, position_id)?;

    state.total_weight = apply_delta(state.total_weight, -position.weight)?;
    state.position_count = state
        .position_count
        .checked_sub(1)
        .ok_or(FarmError::IndexCorrupted)?;

    Ok(position)
}

// === Owner position index ===

/// Append a position to the owner's indexed list
fn add_to_owner_index(env: &Env, owner: &Address, position_id: u32) {
    let count = get_owner_position_count(env, owner);

    set_owner_position_at(env, owner, count, position_id);
    set_position_index(env, position_id, count);
    set_owner_position_count(env, owner, count + 1);
}

/// Remove a position from the owner's indexed list using swap-and-pop
fn remove_from_owner_index(
    env: &Env,
    owner: &Address,
    position_id: u32,
) -> Result<(), FarmError> {
    let count = get_owner_position_count(env, owner);
    let last_index = count.checked_sub(1).ok_or(FarmError::IndexCorrupted)?;

    let index_to_remove = get_position_index(env, position_id).ok_or(FarmError::IndexCorrupted)?;
    if index_to_remove > last_index
        || get_owner_position_at(env, owner, index_to_remove) != Some(position_id)
    {
        return Err(FarmError::IndexCorrupted);
    }

    // Move the last position into the freed slot
    if index_to_remove != last_index {
        let last_position_id =
            get_owner_position_at(env, owner, last_index).ok_or(FarmError::IndexCorrupted)?;
        set_owner_position_at(env, owner, index_to_remove, last_position_id);
        set_position_index(env, last_position_id, index_to_remove);
    }

    remove_owner_position_at(env, owner, last_index);
    remove_position_index(env, position_id);
    set_owner_position_count(env, owner, last_index);
    Ok(())
}

/// Staked position IDs of `owner`, `limit` capped at MAX_PAGE_SIZE
pub fn positions_of(env: &Env, owner: &Address, start_index: u32, limit: u32) -> Vec<u32> {
    let count = get_owner_position_count(env, owner);
    let end_index = start_index
        .saturating_add(limit.min(MAX_PAGE_SIZE))
        .min(count);

    let mut positions = Vec::new(env);
    for i in start_index..end_index {
        if let Some(position_id) = get_owner_position_at(env, owner, i) {
            positions.push_back(position_id);
        }
    }
    positions
}

pub fn deposited_count(env: &Env, owner: &Address) -> u32 {
    get_owner_position_count(env, owner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::Env;

    struct Fixture {
        env: Env,
        contract_id: Address,
        config: FarmConfig,
    }

    fn fixture() -> Fixture {
        let env = Env::default();
        let contract_id = env.register(crate::RangeFarm, ());
        let config = FarmConfig {
            admin: Address::generate(&env),
            pool: Address::generate(&env),
            position_manager: Address::generate(&env),
            reward_token: Address::generate(&env),
            tick_spacing: 10,
            appraisal_offset: 0,
        };
        Fixture { env, contract_id, config }
    }

    fn position_data(
        config: &FarmConfig,
        tick_lower: i32,
        tick_upper: i32,
        liquidity: u128,
    ) -> PositionData {
        PositionData {
            pool: config.pool.clone(),
            tick_lower,
            tick_upper,
            liquidity,
            fee_growth_inside_0_last_x128: 0,
            fee_growth_inside_1_last_x128: 0,
            tokens_owed_0: 0,
            tokens_owed_1: 0,
        }
    }

    #[test]
    fn test_check_ticks() {
        assert_eq!(check_ticks(-100, 100, 10), Ok(()));
        assert_eq!(check_ticks(100, 100, 10), Err(FarmError::InvalidTickRange));
        assert_eq!(check_ticks(100, -100, 10), Err(FarmError::InvalidTickRange));
        assert_eq!(check_ticks(-105, 100, 10), Err(FarmError::TickNotOnSpacing));
        assert_eq!(check_ticks(-443640, 0, 10), Err(FarmError::TickOutOfRange));
        assert_eq!(check_ticks(0, 443640, 10), Err(FarmError::TickOutOfRange));
    }

    #[test]
    fn test_register_in_range() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, 500);

            let weight = register(&f.env, &f.config, &mut state, &owner, 1, &data).unwrap();

            assert_eq!(weight, 500);
            assert_eq!(state.active_weight, 500);
            assert_eq!(state.total_weight, 500);
            assert_eq!(state.position_count, 1);
            assert!(tick::is_initialized(&f.env, -100, 10));
            assert!(tick::is_initialized(&f.env, 100, 10));

            let user = get_user(&f.env, &owner);
            assert_eq!(user.active_weight, 500);
            assert_eq!(user.position_count, 1);
            assert_eq!(deposited_count(&f.env, &owner), 1);
        });
    }

    #[test]
    fn test_register_out_of_range_is_inactive() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            // Current tick sits on the upper edge
            let mut state = FarmState::new(10, 0, 100, 0, 100);
            let data = position_data(&f.config, -100, 100, 500);

            register(&f.env, &f.config, &mut state, &owner, 1, &data).unwrap();

            assert_eq!(state.active_weight, 0);
            assert_eq!(state.total_weight, 500);
            assert_eq!(get_user(&f.env, &owner).active_weight, 0);
        });
    }

    #[test]
    fn test_register_rejects_duplicates_and_foreign_pools() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, 500);
            register(&f.env, &f.config, &mut state, &owner, 1, &data).unwrap();

            assert_eq!(
                register(&f.env, &f.config, &mut state, &owner, 1, &data),
                Err(FarmError::PositionAlreadyStaked)
            );

            let mut foreign = position_data(&f.config, -100, 100, 500);
            foreign.pool = Address::generate(&f.env);
            assert_eq!(
                register(&f.env, &f.config, &mut state, &owner, 2, &foreign),
                Err(FarmError::PoolMismatch)
            );
        });
    }

    #[test]
    fn test_register_rejects_zero_weight() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, 0);

            assert_eq!(
                register(&f.env, &f.config, &mut state, &owner, 1, &data),
                Err(FarmError::ZeroWeight)
            );
        });
    }

    #[test]
    fn test_register_rejects_oversized_liquidity() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, u128::MAX);

            assert_eq!(
                register(&f.env, &f.config, &mut state, &owner, 1, &data),
                Err(FarmError::ArithmeticOverflow)
            );
            assert!(!has_position(&f.env, 1));
        });
    }

    #[test]
    fn test_deregister_restores_everything() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, 500);
            register(&f.env, &f.config, &mut state, &owner, 1, &data).unwrap();

            let removed = deregister(&f.env, &f.config, &mut state, &owner, 1).unwrap();

            assert_eq!(removed.weight, 500);
            assert_eq!(state.active_weight, 0);
            assert_eq!(state.total_weight, 0);
            assert_eq!(state.position_count, 0);
            assert!(!has_position(&f.env, 1));
            assert!(!tick::is_initialized(&f.env, -100, 10));
            assert!(!tick::is_initialized(&f.env, 100, 10));
            assert_eq!(deposited_count(&f.env, &owner), 0);
            assert_eq!(get_user(&f.env, &owner).position_count, 0);
        });
    }

    #[test]
    fn test_deregister_checks_owner() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        let stranger = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, 500);
            register(&f.env, &f.config, &mut state, &owner, 1, &data).unwrap();

            assert_eq!(
                deregister(&f.env, &f.config, &mut state, &stranger, 1).err(),
                Some(FarmError::NotPositionOwner)
            );
            assert_eq!(
                deregister(&f.env, &f.config, &mut state, &owner, 9).err(),
                Some(FarmError::PositionNotFound)
            );
        });
    }

    #[test]
    fn test_deregister_reports_broken_index() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            for id in 1..=2u32 {
                let data = position_data(&f.config, -100, 100, 100);
                register(&f.env, &f.config, &mut state, &owner, id, &data).unwrap();
            }

            remove_position_index(&f.env, 1);
            assert_eq!(
                deregister(&f.env, &f.config, &mut state, &owner, 1).err(),
                Some(FarmError::IndexCorrupted)
            );

            // Index entry pointing at a slot that holds another position
            set_position_index(&f.env, 2, 0);
            assert_eq!(
                deregister(&f.env, &f.config, &mut state, &owner, 2).err(),
                Some(FarmError::IndexCorrupted)
            );
        });
    }

    #[test]
    fn test_deregister_reports_broken_counters() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            let data = position_data(&f.config, -100, 100, 100);
            register(&f.env, &f.config, &mut state, &owner, 1, &data).unwrap();

            let mut user = get_user(&f.env, &owner);
            user.position_count = 0;
            set_user(&f.env, &owner, &user);
            assert_eq!(
                deregister(&f.env, &f.config, &mut state.clone(), &owner, 1).err(),
                Some(FarmError::IndexCorrupted)
            );

            user.position_count = 1;
            set_user(&f.env, &owner, &user);
            state.position_count = 0;
            assert_eq!(
                deregister(&f.env, &f.config, &mut state, &owner, 1).err(),
                Some(FarmError::IndexCorrupted)
            );
        });
    }

    #[test]
    fn test_owner_index_swap_and_pop() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            for id in 1..=4u32 {
                let data = position_data(&f.config, -100, 100, 100);
                register(&f.env, &f.config, &mut state, &owner, id, &data).unwrap();
            }

            deregister(&f.env, &f.config, &mut state, &owner, 2).unwrap();

            // Last entry moved into the freed slot
            let ids = positions_of(&f.env, &owner, 0, 10);
            assert_eq!(ids, soroban_sdk::vec![&f.env, 1u32, 4, 3]);
            assert_eq!(get_position_index(&f.env, 4), Some(1));
        });
    }

    #[test]
    fn test_positions_of_paginates() {
        let f = fixture();
        let owner = Address::generate(&f.env);
        f.env.as_contract(&f.contract_id, || {
            let mut state = FarmState::new(10, 0, 100, 0, 0);
            for id in 1..=3u32 {
                let data = position_data(&f.config, -100, 100, 100);
                register(&f.env, &f.config, &mut state, &owner, id, &data).unwrap();
            }

            assert_eq!(positions_of(&f.env, &owner, 0, 2).len(), 2);
            assert_eq!(positions_of(&f.env, &owner, 2, 2).len(), 1);
            assert_eq!(positions_of(&f.env, &owner, 5, 2).len(), 0);
        });
    }
}
