use soroban_sdk::{Address, Env, Symbol};

pub fn initialized(env: &Env, pool: &Address, reward_token: &Address, tick: i32) {
    env.events().publish(
        (Symbol::new(env, "farm_initialized"),),
        (pool.clone(), reward_token.clone(), tick),
    );
}

pub fn deposited(env: &Env, owner: &Address, position_id: u32, weight: i128, active: bool) {
    env.events().publish(
        (Symbol::new(env, "position_deposited"), owner.clone()),
        (position_id, weight, active),
    );
}

pub fn withdrawn(env: &Env, owner: &Address, position_id: u32, paid: i128) {
    env.events().publish(
        (Symbol::new(env, "position_withdrawn"), owner.clone()),
        (position_id, paid),
    );
}

pub fn harvested(env: &Env, owner: &Address, paid: i128) {
    env.events().publish(
        (Symbol::new(env, "rewards_harvested"), owner.clone()),
        (paid,),
    );
}

/// Emitted once per walk that crossed at least one boundary
pub fn ticks_crossed(env: &Env, from_tick: i32, to_tick: i32, crossings: u32, active_weight: i128) {
    env.events().publish(
        (Symbol::new(env, "ticks_crossed"),),
        (from_tick, to_tick, crossings, active_weight),
    );
}

pub fn reward_rate_set(env: &Env, old_rate: i128, new_rate: i128) {
    env.events().publish(
        (Symbol::new(env, "reward_rate_set"),),
        (old_rate, new_rate),
    );
}

pub fn period_end_set(env: &Env, old_end: u64, new_end: u64) {
    env.events().publish(
        (Symbol::new(env, "period_end_set"),),
        (old_end, new_end),
    );
}
