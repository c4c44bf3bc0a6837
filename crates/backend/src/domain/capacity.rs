//! Acreage accounting shared by land products and crop plans.

/// Epsilon for capacity comparisons. Allocation boundaries are exact in
/// the domain (3.0 + 2.0 acres on a 5.0-acre land is legal), so the sum
/// may only exceed the capacity by f64 rounding noise.
const ACRE_EPSILON: f64 = 1e-9;

/// Would allocating `requested` acres on top of `committed` overrun the
/// land's capacity?
pub fn exceeds_capacity(committed: f64, requested: f64, farm_size: f64) -> bool {
    committed + requested > farm_size + ACRE_EPSILON
}

/// Error text carrying both the attempted total and the limit, as the API
/// reports capacity violations.
pub fn capacity_error(committed: f64, requested: f64, farm_size: f64) -> String {
    format!(
        "Total allocated area ({}) exceeds land farm_size ({}).",
        committed + requested,
        farm_size
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_allocation_is_allowed() {
        // 3.0 committed + 2.0 requested on a 5.0-acre land: exactly full
        assert!(!exceeds_capacity(3.0, 2.0, 5.0));
    }

    #[test]
    fn overrun_is_rejected() {
        // 3.0 + 2.5 = 5.5 > 5.0
        assert!(exceeds_capacity(3.0, 2.5, 5.0));
    }

    #[test]
    fn rounding_noise_does_not_reject() {
        // 2.6 + 1.4 sums to 4.000000000000001 in f64
        assert!(!exceeds_capacity(2.6, 1.4, 4.0));
    }

    #[test]
    fn error_names_both_figures() {
        let msg = capacity_error(3.0, 2.5, 5.0);
        assert!(msg.contains("5.5"));
        assert!(msg.contains("(5)") || msg.contains("5."));
    }
}
