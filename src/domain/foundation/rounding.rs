//! Decimal rounding and fixed-precision formatting shared by views and exports.

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats with exactly 2 decimals.
pub fn format2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Formats with exactly 1 decimal.
pub fn format1(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(11.0), 11.0);
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(-2.346), -2.35);
    }

    #[test]
    fn format2_pads_trailing_zeros() {
        assert_eq!(format2(11.0), "11.00");
        assert_eq!(format2(0.5), "0.50");
        assert_eq!(format2(-1.2), "-1.20");
    }

    #[test]
    fn format1_rounds_to_one_decimal() {
        assert_eq!(format1(2.0), "2.0");
        assert_eq!(format1(4.24), "4.2");
        assert_eq!(format1(10.96), "11.0");
    }
}
