use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::Env;

/// Appraise the reward weight of a range position
///
/// weight = liquidity * width / (width + offset)
///
/// `width` is the range width in tick-spacing units. Narrow ranges hold more
/// liquidity per unit of capital, so the offset discounts them; an offset of
/// zero makes weight equal to liquidity.
///
/// Returns None for an empty or inverted range, or liquidity beyond i128.
pub fn appraise(
    env: &Env,
    tick_lower: i32,
    tick_upper: i32,
    tick_spacing: i32,
    liquidity: u128,
    offset: u32,
) -> Option<i128> {
    if tick_lower >= tick_upper || tick_spacing <= 0 {
        return None;
    }

    let width = (tick_upper.checked_sub(tick_lower)? / tick_spacing) as i128;
    if width == 0 {
        return None;
    }

    let liquidity = i128::try_from(liquidity).ok()?;
    if offset == 0 {
        return Some(liquidity);
    }

    Some(liquidity.fixed_mul_floor(env, &width, &(width + offset as i128)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_appraise_zero_offset_is_identity() {
        let env = Env::default();
        assert_eq!(appraise(&env, -600, 600, 60, 12345, 0), Some(12345));
    }

    #[test]
    fn test_appraise_discounts_narrow_ranges() {
        let env = Env::default();
        // width 1, offset 9 => 10%
        let narrow = appraise(&env, 0, 60, 60, 1000, 9).unwrap();
        // width 91, offset 9 => 91%
        let wide = appraise(&env, 0, 91 * 60, 60, 1000, 9).unwrap();

        assert_eq!(narrow, 100);
        assert_eq!(wide, 910);
    }

    #[test]
    fn test_appraise_rejects_inverted_range() {
        let env = Env::default();
        assert_eq!(appraise(&env, 60, 0, 60, 1000, 0), None);
        assert_eq!(appraise(&env, 60, 60, 60, 1000, 0), None);
    }

    #[test]
    fn test_appraise_rejects_oversized_liquidity() {
        let env = Env::default();
        assert_eq!(appraise(&env, 0, 60, 60, u128::MAX, 0), None);
    }

    #[test]
    fn test_appraise_rounds_down() {
        let env = Env::default();
        // 10 * 1 / 3 = 3.33
        assert_eq!(appraise(&env, 0, 10, 10, 10, 2), Some(3));
    }
}
