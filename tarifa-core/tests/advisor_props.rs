use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tarifa_core::{
    Classification, Event, ObservationId, PriceObservation, RepricingAdvisor, TarifaError,
    UpliftPolicy,
};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, day).unwrap()
}

fn events() -> Vec<Event> {
    vec![Event::single("fest", "Fiesta", d(15))]
}

fn arb_base() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn today_tier_beats_yesterday_tier(base in arb_base()) {
        let advisor = RepricingAdvisor::default();
        let today = advisor.recommend(ObservationId::new("1"), base, d(15), &events());
        let after = advisor.recommend(ObservationId::new("1"), base, d(16), &events());
        prop_assert_eq!(today.classification, Classification::EventToday);
        prop_assert_eq!(after.classification, Classification::EventYesterday);
        prop_assert!(today.percent_increase >= after.percent_increase);
        prop_assert!(today.adjusted_price >= after.adjusted_price);
        prop_assert!(after.adjusted_price >= base);
    }

    #[test]
    fn tiers_stay_distinct_from_one_unit_up(cents in 100i64..10_000_000) {
        let base = Decimal::new(cents, 2);
        let advisor = RepricingAdvisor::default();
        let today = advisor.recommend(ObservationId::new("1"), base, d(15), &events());
        let after = advisor.recommend(ObservationId::new("1"), base, d(16), &events());
        prop_assert!(today.percent_increase > after.percent_increase);
        prop_assert!(after.changes_price());
    }

    #[test]
    fn reported_percent_is_recomputable(base in arb_base(), day in 14u32..18) {
        let advisor = RepricingAdvisor::default();
        let rec = advisor.recommend(ObservationId::new("1"), base, d(day), &events());
        prop_assert_eq!(rec.implied_percent(), rec.percent_increase);
        prop_assert_eq!(rec.changes_price(), !rec.percent_increase.is_zero());
    }

    #[test]
    fn recommendation_is_idempotent(base in arb_base(), day in 10u32..20) {
        let advisor = RepricingAdvisor::default();
        let a = advisor.recommend(ObservationId::new("7"), base, d(day), &events());
        let b = advisor.recommend(ObservationId::new("7"), base, d(day), &events());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn adjusted_price_has_at_most_two_decimals(base in arb_base()) {
        let advisor = RepricingAdvisor::default();
        let rec = advisor.recommend(ObservationId::new("1"), base, d(15), &events());
        prop_assert!(rec.adjusted_price.scale() <= 2);
        prop_assert!(rec.percent_increase.scale() <= 1);
    }
}

#[test]
fn neutral_keeps_base_price() {
    let rec = RepricingAdvisor::default().recommend(
        ObservationId::new("1"),
        dec!(89.90),
        d(1),
        &events(),
    );
    assert_eq!(rec.classification, Classification::Neutral);
    assert_eq!(rec.adjusted_price, dec!(89.90));
    assert_eq!(rec.percent_increase, Decimal::ZERO);
    assert!(rec.event_id.is_none());
    assert!(!rec.changes_price());
}

#[test]
fn zero_base_price_gets_zero_uplift() {
    let rec =
        RepricingAdvisor::default().recommend(ObservationId::new("1"), dec!(0), d(15), &events());
    assert_eq!(rec.classification, Classification::EventToday);
    assert_eq!(rec.percent_increase, Decimal::ZERO);
    assert_eq!(rec.adjusted_price, dec!(0));
}

#[test]
fn tiny_bases_report_the_effective_uplift() {
    let advisor = RepricingAdvisor::default();
    let rec = advisor.recommend(ObservationId::new("1"), dec!(0.01), d(15), &events());
    assert_eq!(rec.classification, Classification::EventToday);
    assert_eq!(rec.adjusted_price, dec!(0.01));
    assert_eq!(rec.percent_increase, Decimal::ZERO);
    assert!(!rec.changes_price());

    let rec = advisor.recommend(ObservationId::new("1"), dec!(1.23), d(16), &events());
    assert_eq!(rec.adjusted_price, dec!(1.35));
    assert_eq!(rec.percent_increase, dec!(9.8));

    let rec = advisor.recommend(ObservationId::new("1"), dec!(0.04), d(15), &events());
    assert_eq!(rec.adjusted_price, dec!(0.05));
    assert_eq!(rec.percent_increase, dec!(25));
}

#[test]
fn custom_tiers_are_validated_and_applied() {
    assert!(matches!(
        RepricingAdvisor::new(UpliftPolicy::new(dec!(5), dec!(5))),
        Err(TarifaError::InvalidArg(_))
    ));
    let advisor = RepricingAdvisor::new(UpliftPolicy::new(dec!(35.5), dec!(12.5))).unwrap();
    let rec = advisor.recommend(ObservationId::new("1"), dec!(200), d(15), &events());
    assert_eq!(rec.percent_increase, dec!(35.5));
    assert_eq!(rec.adjusted_price, dec!(271.00));
    assert_eq!(rec.implied_percent(), dec!(35.5));
}

#[test]
fn invalid_events_degrade_to_neutral_or_surface_as_error() {
    let mut broken = Event::single("b", "B", d(15));
    broken.date = None;
    let list = vec![Event::single("fest", "Fiesta", d(15)), broken];
    let advisor = RepricingAdvisor::default();

    let rec = advisor.recommend(ObservationId::new("1"), dec!(100), d(15), &list);
    assert_eq!(rec.classification, Classification::Neutral);
    assert_eq!(rec.adjusted_price, dec!(100));

    let err = advisor
        .try_recommend(ObservationId::new("1"), dec!(100), d(15), &list)
        .unwrap_err();
    assert!(matches!(err, TarifaError::InvalidEvent { .. }));
}

#[test]
fn rows_are_priced_independently_per_room() {
    let rows = vec![
        PriceObservation::new("1", "Grand Hotel")
            .with_checkin(d(15))
            .with_room_type("Doble")
            .with_price("$100"),
        PriceObservation::new("2", "Grand Hotel")
            .with_checkin(d(15))
            .with_room_type("Suite")
            .with_price("250.00"),
        PriceObservation::new("3", "Grand Hotel")
            .with_checkin(d(15))
            .with_room_type("Triple")
            .with_price("consultar"),
        PriceObservation::new("4", "Grand Hotel")
            .with_checkin(d(16))
            .with_price("80"),
        PriceObservation::new("5", "Grand Hotel").with_checkin(d(15)),
    ];
    let mut broken = Event::single("b", "B", d(1));
    broken.date = None;
    let mut list = events();
    list.push(broken);

    let out = RepricingAdvisor::default().recommend_rows(d(15), &rows, &list);
    assert_eq!(out.recommendations.len(), 2);
    assert_eq!(out.recommendations[0].adjusted_price, dec!(120.00));
    assert_eq!(out.recommendations[0].room_type.as_deref(), Some("Doble"));
    assert_eq!(out.recommendations[1].adjusted_price, dec!(300.00));
    assert_eq!(out.warnings.len(), 2);
    assert_eq!(out.event_errors.len(), 1);
}
