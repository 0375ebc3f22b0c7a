/// Saturating arithmetic primitives
///
/// These mirror the on-chain contract's u128 arithmetic exactly: addition
/// and multiplication clamp at `u128::MAX`, subtraction floors at zero,
/// and division by zero yields zero instead of faulting. A quote computed
/// with anything stricter or looser than this will not match what the
/// chain enforces once the pool's k-invariant has saturated.

// ============================================================================
// Saturating Basic Arithmetic
// ============================================================================

/// Saturating addition for u128 values
pub fn sat_add(a: u128, b: u128) -> u128 {
    a.saturating_add(b)
}

/// Saturating subtraction for u128 values, flooring at zero
pub fn sat_sub(a: u128, b: u128) -> u128 {
    a.saturating_sub(b)
}

/// Saturating multiplication for u128 values
pub fn sat_mul(a: u128, b: u128) -> u128 {
    a.saturating_mul(b)
}

/// Division for u128 values, yielding zero on a zero divisor
pub fn sat_div(a: u128, b: u128) -> u128 {
    if b == 0 {
        return 0;
    }
    a / b
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_saturation_identities() {
        assert_eq!(sat_add(u128::MAX, 1), u128::MAX);
        assert_eq!(sat_mul(1 << 127, 1 << 127), u128::MAX);
        assert_eq!(sat_sub(0, 1), 0);
        assert_eq!(sat_sub(5, 7), 0);
        assert_eq!(sat_div(100, 0), 0);
    }

    #[test]
    fn test_plain_arithmetic() {
        assert_eq!(sat_add(100, 200), 300);
        assert_eq!(sat_sub(200, 100), 100);
        assert_eq!(sat_mul(10, 20), 200);
        assert_eq!(sat_div(100, 5), 20);
        assert_eq!(sat_div(7, 2), 3);
    }

    proptest! {
        #[test]
        fn prop_never_panics(a in any::<u128>(), b in any::<u128>()) {
            let _ = sat_add(a, b);
            let _ = sat_sub(a, b);
            let _ = sat_mul(a, b);
            let _ = sat_div(a, b);
        }

        #[test]
        fn prop_sub_floors_at_zero(a in any::<u128>(), b in any::<u128>()) {
            if b >= a {
                prop_assert_eq!(sat_sub(a, b), 0);
            } else {
                prop_assert_eq!(sat_sub(a, b), a - b);
            }
        }
    }
}
