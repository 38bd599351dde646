//! # German Number Formatting
//!
//! The page renders numbers the `de-DE` way: "." groups thousands and ","
//! separates decimals (`1.370 kcal`, `BMI 24,7`, `6,25 × 165`).

/// Group an integer with "." every three digits.
///
/// ```rust
/// use kcal_core::format::group_thousands;
///
/// assert_eq!(group_thousands(1370), "1.370");
/// assert_eq!(group_thousands(-12500), "-12.500");
/// assert_eq!(group_thousands(988), "988");
/// ```
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Fixed number of decimals with a decimal comma, no grouping.
///
/// ```rust
/// use kcal_core::format::decimal_comma;
///
/// assert_eq!(decimal_comma(24.7, 1), "24,7");
/// assert_eq!(decimal_comma(0.45, 2), "0,45");
/// ```
pub fn decimal_comma(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value).replace('.', ",")
}

/// Up to three decimals with trailing zeros dropped, decimal comma.
///
/// Used for formula coefficients and intermediate terms, where `6,25` and
/// `650` should both read naturally.
///
/// ```rust
/// use kcal_core::format::trimmed_decimal;
///
/// assert_eq!(trimmed_decimal(1031.25), "1031,25");
/// assert_eq!(trimmed_decimal(650.0), "650");
/// assert_eq!(trimmed_decimal(1.375), "1,375");
/// ```
pub fn trimmed_decimal(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    trimmed.replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(2259), "2.259");
        assert_eq!(group_thousands(1234567), "1.234.567");
        assert_eq!(group_thousands(-500), "-500");
        assert_eq!(group_thousands(-1500), "-1.500");
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(decimal_comma(18.5, 1), "18,5");
        assert_eq!(decimal_comma(30.0, 1), "30,0");
        assert_eq!(decimal_comma(-0.45, 2), "-0,45");
    }

    #[test]
    fn test_trimmed_decimal() {
        assert_eq!(trimmed_decimal(6.25), "6,25");
        assert_eq!(trimmed_decimal(10.0), "10");
        assert_eq!(trimmed_decimal(1.2), "1,2");
        assert_eq!(trimmed_decimal(0.0), "0");
        assert_eq!(trimmed_decimal(-161.0), "-161");
        assert_eq!(trimmed_decimal(72.5), "72,5");
    }
}
