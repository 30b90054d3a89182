//! Number formatting shared by chart labels and the text report.

/// Shown wherever a ratio or mean is undefined.
pub const UNDEFINED: &str = "n/a";

/// Round to a whole number and group thousands with commas.
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Fixed-precision rendering of an optional value.
pub fn format_decimal(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => UNDEFINED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1,000");
        assert_eq!(format_count(1234567.4), "1,234,567");
        assert_eq!(format_count(-45210.0), "-45,210");
    }

    #[test]
    fn undefined_decimals_print_marker() {
        assert_eq!(format_decimal(Some(666.6666), 2), "666.67");
        assert_eq!(format_decimal(Some(40.0), 1), "40.0");
        assert_eq!(format_decimal(None, 1), "n/a");
        assert_eq!(format_decimal(Some(f64::INFINITY), 0), "n/a");
    }
}
