//! Display formatting for printable documents.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_CODE: &str = "TZS";

/// `TZS 1,234,567.50`; negatives are prefixed with `-`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{}{} {}.{}", sign, CURRENCY_CODE, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Quantities print without trailing zeros (`2`, `1.5`).
pub fn format_quantity(qty: Decimal) -> String {
    qty.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_with_two_decimals() {
        assert_eq!(format_currency(Decimal::from(991200)), "TZS 991,200.00");
        assert_eq!(format_currency(Decimal::new(123456750, 2)), "TZS 1,234,567.50");
        assert_eq!(format_currency(Decimal::from(100)), "TZS 100.00");
        assert_eq!(format_currency(Decimal::ZERO), "TZS 0.00");
    }

    #[test]
    fn currency_keeps_sign_and_rounds() {
        assert_eq!(format_currency(Decimal::new(-42005, 3)), "-TZS 42.01");
    }

    #[test]
    fn dates_are_day_first() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 27).unwrap();
        assert_eq!(format_date(date), "27/01/2025");
    }

    #[test]
    fn quantities_drop_trailing_zeros() {
        assert_eq!(format_quantity(Decimal::new(2000, 3)), "2");
        assert_eq!(format_quantity(Decimal::new(15, 1)), "1.5");
    }
}
