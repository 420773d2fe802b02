use crate::error::FarmError;
use crate::storage::{get_tick_bitmap_word, set_tick_bitmap_word};
use farm_types::BITMAP_WORD_BITS;
use soroban_sdk::Env;

// === Tick Index ===
// Using u128 per word (128 ticks per word), ticks compressed by spacing

/// Word and bit holding the flag for `tick`
/// Compression floors, so ticks below zero land in negative words.
fn bitmap_position(tick: i32, tick_spacing: i32) -> (i32, u8) {
    let compressed = tick.div_euclid(tick_spacing);
    (compressed >> 7, compressed.rem_euclid(BITMAP_WORD_BITS) as u8)
}

fn spaced_position(tick: i32, tick_spacing: i32) -> Result<(i32, u8), FarmError> {
    if tick % tick_spacing != 0 {
        return Err(FarmError::TickNotOnSpacing);
    }
    Ok(bitmap_position(tick, tick_spacing))
}

/// Mark a tick as the edge of at least one staked position
pub fn set_bit(env: &Env, tick: i32, tick_spacing: i32) -> Result<(), FarmError> {
    let (word_pos, bit_pos) = spaced_position(tick, tick_spacing)?;
    let word = get_tick_bitmap_word(env, word_pos);
    set_tick_bitmap_word(env, word_pos, word | (1u128 << bit_pos));
    Ok(())
}

/// Clear a tick's flag once no position is anchored there
pub fn clear_bit(env: &Env, tick: i32, tick_spacing: i32) -> Result<(), FarmError> {
    let (word_pos, bit_pos) = spaced_position(tick, tick_spacing)?;
    let word = get_tick_bitmap_word(env, word_pos);
    set_tick_bitmap_word(env, word_pos, word & !(1u128 << bit_pos));
    Ok(())
}

pub fn is_initialized(env: &Env, tick: i32, tick_spacing: i32) -> bool {
    match spaced_position(tick, tick_spacing) {
        Ok((word_pos, bit_pos)) => get_tick_bitmap_word(env, word_pos) & (1u128 << bit_pos) != 0,
        Err(_) => false,
    }
}

/// Highest set bit of `word` at or below `bit`
fn highest_set_at_or_below(word: u128, bit: u8) -> Option<u8> {
    let masked = word & (u128::MAX >> (127 - bit));
    (masked != 0).then(|| 127 - masked.leading_zeros() as u8)
}

/// Lowest set bit of `word` at or above `bit`
fn lowest_set_at_or_above(word: u128, bit: u8) -> Option<u8> {
    let masked = word & (u128::MAX << bit);
    (masked != 0).then(|| masked.trailing_zeros() as u8)
}

fn tick_at(word_pos: i32, bit: u8, tick_spacing: i32) -> i32 {
    (word_pos * BITMAP_WORD_BITS + bit as i32) * tick_spacing
}

/// Find the next initialized tick within one word
/// Returns (tick, initialized)
///
/// With `lte` the search covers ticks at or below `tick` and stops at the
/// start of the word; otherwise ticks strictly above `tick`, stopping at the
/// end of the word.
pub fn next_initialized_tick_within_one_word(
    env: &Env,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> (i32, bool) {
    // Upward search starts one spaced tick above
    let start = if lte { tick } else { tick + tick_spacing };
    let (word_pos, bit) = bitmap_position(start, tick_spacing);
    let word = get_tick_bitmap_word(env, word_pos);

    let (found, edge) = if lte {
        (highest_set_at_or_below(word, bit), 0)
    } else {
        (lowest_set_at_or_above(word, bit), (BITMAP_WORD_BITS - 1) as u8)
    };

    match found {
        Some(bit) => (tick_at(word_pos, bit, tick_spacing), true),
        None => (tick_at(word_pos, edge, tick_spacing), false),
    }
}

/// Find the nearest initialized tick between `from` and `limit`
/// Returns (tick, found); `(limit, false)` when there is none
///
/// Upward: smallest set tick t with from < t <= limit.
/// Downward: largest set tick t with limit <= t <= from.
///
/// Skips a whole word per step. A set tick past `limit` is never
/// reported as found.
pub fn next_initialized(
    env: &Env,
    from: i32,
    up: bool,
    limit: i32,
    tick_spacing: i32,
) -> (i32, bool) {
    let mut cursor = from;

    if up {
        while cursor < limit {
            let (next, initialized) =
                next_initialized_tick_within_one_word(env, cursor, tick_spacing, false);
            if next > limit {
                break;
            }
            if initialized {
                return (next, true);
            }
            cursor = next;
        }
    } else {
        while cursor >= limit {
            let (next, initialized) =
                next_initialized_tick_within_one_word(env, cursor, tick_spacing, true);
            if next < limit {
                break;
            }
            if initialized {
                return (next, true);
            }
            cursor = next - 1;
        }
    }

    (limit, false)
}
