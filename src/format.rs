/// Formats a dollar value for display: no cents, comma thousands separators,
/// rounded half away from zero. Non-finite input renders as an empty string.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

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
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Renders a percentage the way it appears in links and input fields:
/// `5`, `3.5`, `0.125`.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(300000.0), "$300,000");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
    }

    #[test]
    fn drops_cents_rounding_half_away_from_zero() {
        assert_eq!(format_currency(15000.4), "$15,000");
        assert_eq!(format_currency(15000.5), "$15,001");
        assert_eq!(format_currency(-2.5), "-$3");
    }

    #[test]
    fn negative_values_lead_with_sign() {
        assert_eq!(format_currency(-25000.0), "-$25,000");
    }

    #[test]
    fn zero_and_tiny_values() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(0.49), "$0");
    }

    #[test]
    fn non_finite_is_blank() {
        assert_eq!(format_currency(f64::NAN), "");
        assert_eq!(format_currency(f64::INFINITY), "");
    }

    #[test]
    fn numbers_use_shortest_form() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.0), "0");
    }
}
