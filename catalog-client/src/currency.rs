//! Currency formatting for filter inputs and sort comparisons.
//!
//! Values are formatted the Brazilian way: `R$ 1.234,56` with `.` grouping
//! thousands and `,` as the decimal separator.

/// Turn free-form keystrokes into a formatted currency string. Non-digits
/// are stripped and the remaining digit string is read as cents. An input
/// with no digits yields an empty string — the "no filter applied" sentinel,
/// deliberately not `R$ 0,00`.
pub fn format_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }

    let cents = digits
        .bytes()
        .fold(0u128, |acc, d| acc.saturating_mul(10).saturating_add(u128::from(d - b'0')));

    format!("R$ {},{:02}", group_thousands(cents / 100), cents % 100)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Reverse the formatting into a comparable number. Unparseable input maps
/// to 0.0 so comparisons stay total and sorting stays stable.
pub fn comparable_value(formatted: &str) -> f64 {
    let cleaned: String = formatted
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_become_cents() {
        assert_eq!(format_digits("20000"), "R$ 200,00");
        assert_eq!(format_digits("120000"), "R$ 1.200,00");
        assert_eq!(format_digits("5"), "R$ 0,05");
        assert_eq!(format_digits("123456789"), "R$ 1.234.567,89");
    }

    #[test]
    fn non_digits_are_stripped() {
        assert_eq!(format_digits("R$ 2a0b0,00"), "R$ 200,00");
    }

    #[test]
    fn empty_input_is_the_no_filter_sentinel() {
        assert_eq!(format_digits(""), "");
        assert_eq!(format_digits("abc"), "");
    }

    #[test]
    fn comparable_reverses_formatting() {
        assert_eq!(comparable_value("R$ 200,00"), 200.0);
        assert_eq!(comparable_value("R$ 1.200,50"), 1200.5);
        assert_eq!(comparable_value("R$ 1.234.567,89"), 1234567.89);
    }

    #[test]
    fn unparseable_input_compares_as_zero() {
        assert_eq!(comparable_value(""), 0.0);
        assert_eq!(comparable_value("not a value"), 0.0);
    }

    #[test]
    fn codec_round_trips_its_own_output() {
        for raw in ["1", "20000", "120000", "999999999"] {
            let formatted = format_digits(raw);
            let value = comparable_value(&formatted);
            let reformatted = format_digits(&format!("{:.0}", value * 100.0));
            assert_eq!(formatted, reformatted);
        }
    }
}
