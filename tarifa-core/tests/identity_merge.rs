use std::cmp::Ordering;

use chrono::NaiveDate;
use tarifa_core::{
    Completeness, ObservationExt, PriceObservation, PropertyIdentity, compare_completeness,
    resolve_identities,
};

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn full(id: &str, name: &str) -> PriceObservation {
    PriceObservation::new(id, name)
        .with_checkin(may(10))
        .with_price("120.00")
        .with_room_type("Doble")
}

#[test]
fn completeness_scores() {
    assert_eq!(PriceObservation::new("1", "X").completeness(), Completeness::NameOnly);
    assert_eq!(
        PriceObservation::new("2", "X").with_price("99").completeness(),
        Completeness::PriceOnly
    );
    assert_eq!(full("3", "X").completeness(), Completeness::DailyBreakdown);
    // A triple whose price does not parse is not a daily breakdown.
    assert_eq!(
        full("4", "X").with_price("bad").completeness(),
        Completeness::PriceOnly
    );
}

#[test]
fn breakdown_wins_regardless_of_order() {
    let bare = PriceObservation::new("1", "X");
    let rich = full("2", "X");

    for input in [vec![bare.clone(), rich.clone()], vec![rich.clone(), bare.clone()]] {
        let resolution = resolve_identities(&input);
        let kept = &resolution.representatives[&PropertyIdentity::new("X")];
        assert_eq!(kept.id.as_str(), "2");
        assert!(resolution.ambiguities.is_empty());
    }
    assert_eq!(compare_completeness(&rich, &bare), Ordering::Greater);
}

#[test]
fn ties_keep_first_seen_and_report_once() {
    let input = vec![
        PriceObservation::new("1", "X"),
        full("2", "X"),
        full("3", "X"),
        full("4", "X"),
    ];
    let resolution = resolve_identities(&input);
    assert_eq!(
        resolution.representatives[&PropertyIdentity::new("X")].id.as_str(),
        "2"
    );
    assert_eq!(resolution.ambiguities.len(), 1);
    let amb = &resolution.ambiguities[0];
    assert_eq!(amb.kept.as_str(), "2");
    let tied: Vec<&str> = amb.tied.iter().map(|id| id.as_str()).collect();
    assert_eq!(tied, vec!["3", "4"]);
}

#[test]
fn names_match_case_sensitively() {
    let input = vec![full("1", "Grand Hotel"), full("2", "grand hotel")];
    let resolution = resolve_identities(&input);
    assert_eq!(resolution.representatives.len(), 2);
    assert!(resolution.ambiguities.is_empty());
}

#[test]
fn no_fields_are_merged_across_records() {
    let dated = PriceObservation::new("1", "X").with_checkin(may(1)).with_price("50");
    let typed = PriceObservation::new("2", "X")
        .with_room_type("Suite")
        .with_price("60");
    let resolution = resolve_identities(&[dated, typed]);
    let kept = &resolution.representatives[&PropertyIdentity::new("X")];
    assert_eq!(kept.id.as_str(), "1");
    assert!(kept.room_type.is_none());
}
