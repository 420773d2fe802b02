#![no_std]

mod boundary;
mod farm;
mod ledger;
mod position;

pub use boundary::*;
pub use farm::*;
pub use ledger::*;
pub use position::*;

/// Fixed-point scale of `acc_reward_per_weight` (1e12)
pub const REWARD_SCALE: i128 = 1_000_000_000_000;

/// Minimum tick index
/// Matches the tick domain of the pools the farm reads from
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
pub const MAX_TICK: i32 = 443636;

/// Number of ticks packed into one tick-index word
pub const BITMAP_WORD_BITS: i32 = 128;

/// Maximum page size for owner position queries
pub const MAX_PAGE_SIZE: u32 = 50;

/// True if `tick` lies inside the half-open range `[tick_lower, tick_upper)`
pub fn in_range(tick_lower: i32, tick_upper: i32, tick: i32) -> bool {
    tick_lower <= tick && tick < tick_upper
}
