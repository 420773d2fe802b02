// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Pure predicates over farm state, checked with debug assertions in the
// `release-with-logs` profile and in tests.
//
// 1. ACCUMULATOR INVARIANTS
//    - acc_reward_per_weight never decreases
//    - last_update_time stays inside the reward period
//
// 2. WEIGHT INVARIANTS
//    - Active weights are non-negative
//    - Active weight never exceeds total staked weight
//
// ============================================================================

use farm_types::{in_range, FarmState, StakedPosition};

// ============================================================================
// ACCUMULATOR INVARIANTS
// ============================================================================

/// Property:
///   acc_new >= acc_old
pub fn accumulator_monotonic(old_acc: i128, new_acc: i128) -> bool {
    new_acc >= old_acc
}

/// Property:
///   period_start <= last_update_time <= period_end
pub fn update_time_in_period(state: &FarmState) -> bool {
    state.period_start <= state.last_update_time && state.last_update_time <= state.period_end
}

// ============================================================================
// WEIGHT INVARIANTS
// ============================================================================

/// Property:
///   0 <= active_weight <= total_weight
pub fn active_weight_bounded(state: &FarmState) -> bool {
    state.active_weight >= 0 && state.active_weight <= state.total_weight
}

/// Whether a position contributes to the active set at `tick`
pub fn position_active(position: &StakedPosition, tick: i32) -> bool {
    in_range(position.tick_lower, position.tick_upper, tick)
}
