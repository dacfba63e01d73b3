//! Field-level checks shared by the services.
//!
//! Each check returns the cleaned value or a `ServiceError::ValidationError`
//! naming the field.

mod countries;

use rust_decimal::Decimal;
use validator::Validate;

use crate::errors::ServiceError;

pub use countries::{is_country_code, normalize_country, normalize_country_set};

/// Largest value accepted by a positive small integer column.
pub const SMALL_INT_MAX: i32 = 32_767;

/// Precision of a fixed-point column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimalSpec {
    pub max_digits: u32,
    pub decimal_places: u32,
}

/// Electrical ratings and temperature coefficients.
pub const ELECTRICAL: DecimalSpec = DecimalSpec {
    max_digits: 6,
    decimal_places: 2,
};

/// Physical dimensions and weight.
pub const DIMENSION: DecimalSpec = DecimalSpec {
    max_digits: 6,
    decimal_places: 3,
};

/// Manufacturing capacity in GW/year.
pub const CAPACITY: DecimalSpec = DecimalSpec {
    max_digits: 6,
    decimal_places: 3,
};

impl DecimalSpec {
    pub fn whole_digits(&self) -> u32 {
        self.max_digits - self.decimal_places
    }

    /// Rescales a stored value to exactly `decimal_places` fractional digits.
    pub fn present(&self, value: Decimal) -> Decimal {
        let mut value = value.round_dp(self.decimal_places);
        value.rescale(self.decimal_places);
        value
    }

    pub fn present_opt(&self, value: Option<Decimal>) -> Option<Decimal> {
        value.map(|v| self.present(v))
    }
}

fn digit_count(mut n: u128) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

/// Checks `value` against `spec` and returns it rescaled to the column's
/// fractional digits. Trailing zeros do not count towards the limits.
pub fn check_decimal(field: &str, value: Decimal, spec: DecimalSpec) -> Result<Decimal, ServiceError> {
    let normalized = value.normalize();
    let decimals = normalized.scale();
    let digits = digit_count(normalized.mantissa().unsigned_abs()).max(decimals);
    let whole_digits = digits - decimals;

    if digits > spec.max_digits {
        return Err(ServiceError::invalid_field(
            field,
            format!(
                "Ensure that there are no more than {} digits in total.",
                spec.max_digits
            ),
        ));
    }
    if decimals > spec.decimal_places {
        return Err(ServiceError::invalid_field(
            field,
            format!(
                "Ensure that there are no more than {} decimal places.",
                spec.decimal_places
            ),
        ));
    }
    if whole_digits > spec.whole_digits() {
        return Err(ServiceError::invalid_field(
            field,
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                spec.whole_digits()
            ),
        ));
    }

    let mut stored = normalized;
    stored.rescale(spec.decimal_places);
    Ok(stored)
}

pub fn check_decimal_opt(
    field: &str,
    value: Option<Decimal>,
    spec: DecimalSpec,
) -> Result<Option<Decimal>, ServiceError> {
    value.map(|v| check_decimal(field, v, spec)).transpose()
}

/// Positive small integer (`0..=32767`).
pub fn check_small_count(field: &str, value: Option<i32>) -> Result<Option<i32>, ServiceError> {
    match value {
        Some(v) if !(0..=SMALL_INT_MAX).contains(&v) => Err(ServiceError::invalid_field(
            field,
            format!("Ensure this value is between 0 and {}.", SMALL_INT_MAX),
        )),
        other => Ok(other),
    }
}

/// Trims a required text value; blank input is rejected.
pub fn required_text(field: &str, value: &str) -> Result<String, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::invalid_field(field, "This field is required."));
    }
    Ok(value.to_string())
}

/// Text inputs whose width limits apply to the trimmed value.
pub trait TrimmedInput: Validate + Sized {
    fn trim_text(&mut self);

    /// Trims every text field, then runs the derived width checks.
    fn validate_trimmed(mut self) -> Result<Self, ServiceError> {
        self.trim_text();
        self.validate()?;
        Ok(self)
    }
}

pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn trim_opt_in_place(value: &mut Option<String>) {
    if let Some(v) = value.as_mut() {
        trim_in_place(v);
    }
}

/// Trims optional text; blank collapses to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn accepts_values_within_precision() {
        assert_eq!(check_decimal("p_max", dec!(310), ELECTRICAL).unwrap().to_string(), "310.00");
        assert_eq!(check_decimal("p_max", dec!(9999.99), ELECTRICAL).unwrap(), dec!(9999.99));
        assert_eq!(check_decimal("weight", dec!(999.999), DIMENSION).unwrap(), dec!(999.999));
        assert_eq!(check_decimal("temp_co_p_max", dec!(-0.35), ELECTRICAL).unwrap(), dec!(-0.35));
    }

    #[test]
    fn stores_fixed_places() {
        let stored = check_decimal("mfg_capacity_yr", dec!(5), CAPACITY).unwrap();
        assert_eq!(stored.to_string(), "5.000");
        assert_eq!(stored.scale(), 3);
    }

    #[test]
    fn trailing_zeros_do_not_count() {
        assert_eq!(
            check_decimal("p_max", dec!(305.5000), ELECTRICAL).unwrap().to_string(),
            "305.50"
        );
    }

    #[test]
    fn rejects_too_many_decimal_places() {
        let err = check_decimal("p_max_stc", dec!(305.555), ELECTRICAL).unwrap_err();
        assert!(err.is_invalid_field("p_max_stc"));
        assert!(err.to_string().contains("2 decimal places"));
    }

    #[test]
    fn rejects_too_many_whole_digits() {
        let err = check_decimal("p_max", dec!(10000), ELECTRICAL).unwrap_err();
        assert!(err.to_string().contains("4 digits before the decimal point"));

        let err = check_decimal("length", dec!(1000), DIMENSION).unwrap_err();
        assert!(err.is_invalid_field("length"));
    }

    #[test]
    fn rejects_too_many_digits() {
        let err = check_decimal("eff_stc", dec!(12345.67), ELECTRICAL).unwrap_err();
        assert!(err.to_string().contains("6 digits in total"));
    }

    #[test]
    fn small_fraction_counts_leading_zeros() {
        assert!(check_decimal("thickness", dec!(0.001), DIMENSION).is_ok());
        assert!(check_decimal("thickness", dec!(0.0001), DIMENSION).is_err());
    }

    #[test]
    fn small_counts_are_bounded() {
        assert_eq!(check_small_count("cell_count", Some(144)).unwrap(), Some(144));
        assert_eq!(check_small_count("cell_count", None).unwrap(), None);
        assert!(check_small_count("cell_count", Some(-1)).is_err());
        assert!(check_small_count("year_published", Some(40_000)).is_err());
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(required_text("short_name", "  AcmeCo ").unwrap(), "AcmeCo");
        assert!(required_text("short_name", "   ").unwrap_err().is_invalid_field("short_name"));
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" Shenzhen ".into())), Some("Shenzhen".into()));
    }

    #[test]
    fn present_rescales_lossy_reads() {
        assert_eq!(ELECTRICAL.present(dec!(305.5)).to_string(), "305.50");
        assert_eq!(DIMENSION.present_opt(Some(dec!(2))).unwrap().to_string(), "2.000");
    }
}
