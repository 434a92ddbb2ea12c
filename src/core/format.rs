//! Display strings for the walkthrough table. Amounts are shown in whole
//! currency units with comma thousands separators.

pub fn group_thousands(value: f64) -> String {
    let digits = (value.abs().round() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Unsigned amount, e.g. `$30,000`. The sign of `value` is dropped.
pub fn format_currency(value: f64, currency_symbol: &str) -> String {
    format!("{currency_symbol}{}", group_thousands(value))
}

/// Signed amount: `-$3,000`, `$0` or `+$1,200`.
pub fn format_signed(value: f64, currency_symbol: &str) -> String {
    let rounded = value.round();
    if rounded < 0.0 {
        format!("-{currency_symbol}{}", group_thousands(rounded))
    } else if rounded == 0.0 {
        format!("{currency_symbol}0")
    } else {
        format!("+{currency_symbol}{}", group_thousands(rounded))
    }
}

pub fn format_count(value: f64) -> String {
    group_thousands(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_thousands_inserts_separators() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1_000.0), "1,000");
        assert_eq!(group_thousands(30_833.0), "30,833");
        assert_eq!(group_thousands(485_920_000.0), "485,920,000");
    }

    #[test]
    fn group_thousands_rounds_fractional_values() {
        assert_eq!(group_thousands(1_234.6), "1,235");
    }

    #[test]
    fn format_currency_drops_sign() {
        assert_eq!(format_currency(-3_000.0, "$"), "$3,000");
        assert_eq!(format_currency(120_000.0, "£"), "£120,000");
    }

    #[test]
    fn format_signed_marks_direction() {
        assert_eq!(format_signed(-3_000.0, "$"), "-$3,000");
        assert_eq!(format_signed(0.0, "$"), "$0");
        assert_eq!(format_signed(-0.0, "£"), "£0");
        assert_eq!(format_signed(1_200.0, "£"), "+£1,200");
        assert_eq!(format_signed(-500_400_000.0, "$"), "-$500,400,000");
    }

    #[test]
    fn format_signed_treats_sub_unit_amounts_as_zero() {
        assert_eq!(format_signed(-0.4, "$"), "$0");
    }

    #[test]
    fn format_count_has_no_symbol() {
        assert_eq!(format_count(25_000.0), "25,000");
    }
}
