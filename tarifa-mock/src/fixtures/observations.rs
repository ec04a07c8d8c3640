use chrono::NaiveDate;
use tarifa_core::{PriceKind, PriceObservation};

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn row(
    id: &str,
    property_id: &str,
    name: &str,
    checkin: Option<NaiveDate>,
    room: Option<&str>,
    price: Option<&str>,
    kind: PriceKind,
) -> PriceObservation {
    PriceObservation {
        id: id.into(),
        property_id: Some(property_id.to_string()),
        property_name: name.to_string(),
        scrape_date: day(2024, 5, 1),
        checkin_date: checkin,
        room_type: room.map(str::to_string),
        price: price.map(str::to_string),
        kind,
        observed_at: None,
    }
}

/// Every fixture row, in insertion order.
pub fn all() -> Vec<PriceObservation> {
    use PriceKind::{Observed, Predicted};
    vec![
        row("gh-0", "gh", "Grand Hotel", None, None, None, Observed),
        row("gh-1", "gh", "Grand Hotel", day(2024, 5, 10), Some("Doble"), Some("$1,200"), Observed),
        row("gh-2", "gh", "Grand Hotel", day(2024, 5, 10), Some("Suite"), Some("1100.50"), Observed),
        row("gh-3", "gh", "Grand Hotel", day(2024, 5, 10), Some("Triple"), Some("bad"), Observed),
        row("gh-4", "gh", "Grand Hotel", day(2024, 5, 11), Some("Doble"), Some("980"), Observed),
        row("gh-5", "gh", "Grand Hotel", day(2024, 5, 11), Some("Suite"), Some("1,050.00"), Observed),
        row("gh-6", "gh", "Grand Hotel", day(2024, 5, 13), Some("Doble"), Some("900"), Predicted),
        row("hs-1", "hs", "Hostal Sol", day(2024, 3, 15), Some("Individual"), Some("45 €"), Observed),
        row("hs-2", "hs", "Hostal Sol", day(2024, 3, 16), Some("Individual"), Some("42"), Observed),
        row("hs-3", "hs", "Hostal Sol", day(2024, 3, 20), Some("Individual"), Some("39.90"), Observed),
        row("hm-1", "hm", "Hotel Mar", None, Some("Doble"), Some("150"), Observed),
        row("hm-2", "hm", "Hotel Mar", day(2024, 7, 1), Some("Doble"), None, Observed),
        row("hm-3", "hm", "Hotel Mar", day(2024, 7, 2), Some("Doble"), Some("160"), Observed),
    ]
}
