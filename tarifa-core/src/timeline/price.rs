use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parse scraped price text into a non-negative decimal.
///
/// Every character other than ASCII digits and `.` is stripped first, so
/// currency symbols, thousands separators, signs, and whitespace are ignored:
/// `"$1,200"` parses as `1200`. Returns `None` when nothing is left after
/// stripping or when the remainder is not a valid decimal (e.g. `"1.2.3"`).
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() || !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Round a monetary amount to cents, half away from zero.
pub(crate) fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
