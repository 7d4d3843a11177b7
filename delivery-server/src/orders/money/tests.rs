use super::*;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_accumulation_precision() {
    // Sum 0.05 five hundred times: f64 drifts, Decimal does not
    let mut total = Decimal::ZERO;
    for _ in 0..500 {
        total += to_decimal(0.05);
    }
    assert_eq!(to_f64(total), 25.0);
}

#[test]
fn test_rounding_half_up() {
    // 0.125 rounds away from zero to 0.13
    let value = Decimal::new(125, 3);
    assert_eq!(to_f64(value), 0.13);

    // Negative midpoint rounds away from zero too
    let value = Decimal::new(-125, 3);
    assert_eq!(to_f64(value), -0.13);
}

#[test]
fn test_money_eq() {
    assert!(money_eq(100.0, 100.0));
    assert!(money_eq(100.004, 100.006)); // Below tolerance
    assert!(!money_eq(100.0, 100.02));
}

#[test]
fn test_non_finite_defaults_to_zero() {
    assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
}
