use proptest::prelude::*;
use pvmodules_api::validation::{check_decimal, DIMENSION, ELECTRICAL};
use rust_decimal::Decimal;

proptest! {
    #[test]
    fn electrical_values_within_precision_are_stored_at_scale(
        whole in -9_999i64..=9_999,
        cents in 0i64..=99,
    ) {
        let sign = if whole < 0 { -1 } else { 1 };
        let value = Decimal::new(whole * 100 + sign * cents, 2);

        let stored = check_decimal("p_max", value, ELECTRICAL).unwrap();
        prop_assert_eq!(stored, value);
        prop_assert_eq!(stored.scale(), 2);
    }

    #[test]
    fn trailing_zeros_do_not_count(units in 0i64..=999_999, extra in 1u32..=6) {
        // units thousandths fits DIMENSION; padding zeros keeps the value.
        let value = Decimal::new(units, 3);
        let padded = Decimal::new(units * 10i64.pow(extra), 3 + extra);

        let stored = check_decimal("length", padded, DIMENSION).unwrap();
        prop_assert_eq!(stored, value);
        prop_assert_eq!(stored.scale(), 3);
    }

    #[test]
    fn excess_fractional_digits_are_rejected(whole in 0i64..=999, last in 1i64..=9) {
        let value = Decimal::new(whole * 1_000 + last, 3);

        let err = check_decimal("v_oc_stc", value, ELECTRICAL).unwrap_err();
        prop_assert!(err.is_invalid_field("v_oc_stc"));
        prop_assert!(err.to_string().contains("decimal places"));
    }

    #[test]
    fn excess_whole_digits_are_rejected(whole in 10_000i64..=9_999_999) {
        let err = check_decimal("p_max", Decimal::from(whole), ELECTRICAL).unwrap_err();
        prop_assert!(err.is_invalid_field("p_max"));
    }
}
