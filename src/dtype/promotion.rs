//! Type promotion rules for mixed-kind matrices

use super::ScalarKind;

/// Promote two scalar kinds to a common kind
///
/// Complex dominates decimal, decimal dominates float.
pub fn promote(lhs: ScalarKind, rhs: ScalarKind) -> ScalarKind {
    lhs.max(rhs)
}

/// Returns true when promoting the given kinds together loses precision.
///
/// Decimals promoted to complex are rounded to double precision.
pub fn is_lossy_mix(has_decimal: bool, has_complex: bool) -> bool {
    has_decimal && has_complex
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScalarKind::*;

    #[test]
    fn test_promote_priority() {
        assert_eq!(promote(Float, Float), Float);
        assert_eq!(promote(Float, Decimal), Decimal);
        assert_eq!(promote(Decimal, Float), Decimal);
        assert_eq!(promote(Decimal, Complex), Complex);
        assert_eq!(promote(Complex, Float), Complex);
    }

    #[test]
    fn test_lossy_mix() {
        assert!(is_lossy_mix(true, true));
        assert!(!is_lossy_mix(true, false));
        assert!(!is_lossy_mix(false, true));
    }
}
