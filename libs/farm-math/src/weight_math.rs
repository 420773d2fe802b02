/// Apply a signed delta to a non-negative weight
/// Returns None if the result would be negative or overflow
pub fn add_delta(weight: i128, delta: i128) -> Option<i128> {
    let result = weight.checked_add(delta)?;
    if result < 0 {
        None
    } else {
        Some(result)
    }
}

/// Net weight delta for crossing a boundary in the given direction
/// Boundaries store the upward delta; moving down applies its negation.
pub fn directed_delta(net_weight: i128, upward: bool) -> Option<i128> {
    if upward {
        Some(net_weight)
    } else {
        net_weight.checked_neg()
    }
}
