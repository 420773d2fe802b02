use crate::error::FarmError;
use farm_types::{BoundaryInfo, FarmConfig, FarmState, StakedPosition, UserInfo};
use soroban_sdk::{contracttype, Address, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS - Constraints on the boundary walk:
// ============================================================================
// - Read entries per tx: 100 entries / 200 KB
// - Write entries per tx: 50 entries / 132 KB
//
// Storage design considerations:
// - Config and state live in Instance storage (read on every call)
// - Each boundary (net weight + anchored ids) is a separate entry
// - Each bitmap word (u128 = 128 ticks) is a separate entry
// - Each position and each user ledger is a separate entry
// - Empty boundaries and bitmap words are removed
//
// Boundary walk costs:
// - Each searched bitmap word costs 1 read, empty or not
// - Each crossed boundary costs 1 read, plus 1 position read and
//   1 user read/write per anchored position
// - The walk is never truncated: a walk that exceeds the limits fails
//   the whole transaction
// ============================================================================

/// Storage keys for the farm contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Farm configuration (Instance storage)
    Config,
    /// Accumulator and active-set state (Instance storage)
    State,
    /// Staked position: position_id -> StakedPosition (Persistent storage)
    Position(u32),
    /// Boundary data: tick -> BoundaryInfo (Persistent storage)
    Boundary(i32),
    /// Tick index: word_position -> u128 bitmap (Persistent storage)
    TickBitmap(i32),
    /// User ledger: owner -> UserInfo (Persistent storage)
    User(Address),
    /// Owner -> number of staked positions indexed
    OwnerPositionCount(Address),
    /// Owner -> index -> position ID
    OwnerPositionAt(Address, u32),
    /// Position ID -> index in owner's list
    PositionIndex(u32),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<FarmConfig, FarmError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(FarmError::NotInitialized)
}

pub fn set_config(env: &Env, config: &FarmConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<FarmState, FarmError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(FarmError::NotInitialized)
}

pub fn set_state(env: &Env, state: &FarmState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Position ===

pub fn get_position(env: &Env, position_id: u32) -> Option<StakedPosition> {
    env.storage()
        .persistent()
        .get(&DataKey::Position(position_id))
}

pub fn has_position(env: &Env, position_id: u32) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Position(position_id))
}

pub fn set_position(env: &Env, position_id: u32, position: &StakedPosition) {
    let key = DataKey::Position(position_id);
    env.storage().persistent().set(&key, position);
    extend_persistent_ttl(env, &key);
}

pub fn remove_position(env: &Env, position_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(position_id));
}

// === Boundary ===

pub fn get_boundary(env: &Env, tick: i32) -> Option<BoundaryInfo> {
    env.storage().persistent().get(&DataKey::Boundary(tick))
}

pub fn set_boundary(env: &Env, tick: i32, info: &BoundaryInfo) {
    let key = DataKey::Boundary(tick);
    if info.is_empty() {
        // Remove boundary with no anchored positions
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, info);
        extend_persistent_ttl(env, &key);
    }
}

// === Tick Bitmap ===

pub fn get_tick_bitmap_word(env: &Env, word_pos: i32) -> u128 {
    let key = DataKey::TickBitmap(word_pos);
    env.storage().persistent().get(&key).unwrap_or(0u128)
}

pub fn set_tick_bitmap_word(env: &Env, word_pos: i32, bitmap: u128) {
    let key = DataKey::TickBitmap(word_pos);
    if bitmap == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &bitmap);
        extend_persistent_ttl(env, &key);
    }
}

// === User ===

pub fn get_user(env: &Env, owner: &Address) -> UserInfo {
    env.storage()
        .persistent()
        .get(&DataKey::User(owner.clone()))
        .unwrap_or_default()
}

/// User ledgers are kept even when every balance returns to zero
pub fn set_user(env: &Env, owner: &Address, info: &UserInfo) {
    let key = DataKey::User(owner.clone());
    env.storage().persistent().set(&key, info);
    extend_persistent_ttl(env, &key);
}

// === Owner position index ===

pub fn get_owner_position_count(env: &Env, owner: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerPositionCount(owner.clone()))
        .unwrap_or(0)
}

pub fn set_owner_position_count(env: &Env, owner: &Address, count: u32) {
    let key = DataKey::OwnerPositionCount(owner.clone());
    if count == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &count);
        extend_persistent_ttl(env, &key);
    }
}

pub fn get_owner_position_at(env: &Env, owner: &Address, index: u32) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::OwnerPositionAt(owner.clone(), index))
}

pub fn set_owner_position_at(env: &Env, owner: &Address, index: u32, position_id: u32) {
    let key = DataKey::OwnerPositionAt(owner.clone(), index);
    env.storage().persistent().set(&key, &position_id);
    extend_persistent_ttl(env, &key);
}

pub fn remove_owner_position_at(env: &Env, owner: &Address, index: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::OwnerPositionAt(owner.clone(), index));
}

pub fn get_position_index(env: &Env, position_id: u32) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::PositionIndex(position_id))
}

pub fn set_position_index(env: &Env, position_id: u32, index: u32) {
    let key = DataKey::PositionIndex(position_id);
    env.storage().persistent().set(&key, &index);
    extend_persistent_ttl(env, &key);
}

pub fn remove_position_index(env: &Env, position_id: u32) {
    env.storage()
        .persistent()
        .remove(&DataKey::PositionIndex(position_id));
}
