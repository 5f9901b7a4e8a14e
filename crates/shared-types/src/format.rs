//! Number and currency formatting helpers handed to features.

/// Round to the nearest integer with halves going up (towards +inf).
///
/// `-12.5` becomes `-12`, `2.5` becomes `3`. Non-finite input reads as 0.
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

/// `round(part / whole * 100)`, or 0 when `whole` is zero.
pub fn percent_of(part: f64, whole: f64) -> i64 {
    if whole == 0.0 {
        return 0;
    }
    round_half_up(part / whole * 100.0)
}

/// Format an amount as whole won with thousands separators, e.g. `32,600 won`.
pub fn format_won(amount: f64) -> String {
    let rounded = round_half_up(amount);
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{grouped} won")
}

/// Zero-padded `HH:MM`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(1000.6), 1001);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-12.5), -12);
        assert_eq!(round_half_up(-11.89), -12);
        assert_eq!(round_half_up(f64::NAN), 0);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(13_830.0, 21_650.0), 64);
        assert_eq!(percent_of(4_400.0, 10_000.0), 44);
        assert_eq!(percent_of(1.0, 0.0), 0);
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(32_600.0), "32,600 won");
        assert_eq!(format_won(0.0), "0 won");
        assert_eq!(format_won(999.0), "999 won");
        assert_eq!(format_won(1_234_567.4), "1,234,567 won");
        assert_eq!(format_won(-4_400.0), "-4,400 won");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(7, 5), "07:05");
        assert_eq!(format_clock(23, 59), "23:59");
    }

    proptest! {
        #[test]
        fn prop_format_won_keeps_the_digits(amount in 0u64..10_000_000_000) {
            let text = format_won(amount as f64);
            let digits: String = text
                .trim_end_matches(" won")
                .chars()
                .filter(|c| *c != ',')
                .collect();
            prop_assert_eq!(digits, amount.to_string());
        }

        #[test]
        fn prop_percent_of_whole_is_100(whole in 1u64..1_000_000_000) {
            prop_assert_eq!(percent_of(whole as f64, whole as f64), 100);
        }
    }
}
