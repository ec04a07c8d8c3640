use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tarifa_core::{
    Classification, DataQualityWarning, Event, PriceKind, PriceObservation, PropertyIdentity,
    RepricingAdvisor, aggregate, classify,
};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn grand_hotel() -> Vec<PriceObservation> {
    ["$1,200", "1100.50", "bad"]
        .into_iter()
        .enumerate()
        .map(|(i, price)| {
            PriceObservation::new((i + 1).to_string(), "Grand Hotel")
                .with_checkin(d(10))
                .with_room_type("Doble")
                .with_price(price)
        })
        .collect()
}

#[test]
fn grand_hotel_end_to_end() {
    let timeline = aggregate(&grand_hotel());
    let series = timeline.get(&PropertyIdentity::new("Grand Hotel")).unwrap();

    assert_eq!(series.entries.len(), 1);
    let entry = &series.entries[0];
    assert_eq!(entry.date, d(10));
    assert_eq!(entry.price, dec!(1150.25));
    assert_eq!(entry.kind, PriceKind::Observed);
    assert_eq!(series.stats[0].samples, 2);
    assert_eq!(
        series.warnings,
        vec![DataQualityWarning::MalformedPrice {
            observation_id: "3".into(),
            raw: "bad".into(),
        }]
    );

    let events = vec![Event::ranged("feria", "Feria", d(9), d(10))];
    assert!(classify(d(10), &events).unwrap().is_event_day());

    let rec = RepricingAdvisor::default().recommend("agg".into(), entry.price, d(10), &events);
    assert_eq!(rec.classification, Classification::EventToday);
    assert!(rec.percent_increase > dec!(0));
    assert!(rec.adjusted_price > rec.base_price);
    assert_eq!(rec.adjusted_price, dec!(1380.30));
}

#[test]
fn mean_of_three_prices() {
    let obs: Vec<_> = ["100", "200", "300"]
        .into_iter()
        .enumerate()
        .map(|(i, p)| {
            PriceObservation::new(i.to_string(), "X")
                .with_checkin(d(1))
                .with_price(p)
        })
        .collect();
    let timeline = aggregate(&obs);
    let entry = &timeline.get(&PropertyIdentity::new("X")).unwrap().entries[0];
    assert_eq!(entry.price, dec!(200.00));
}

#[test]
fn single_valid_price_passes_through_unchanged() {
    let obs = vec![
        PriceObservation::new("1", "X").with_checkin(d(2)).with_price("n/a"),
        PriceObservation::new("2", "X")
            .with_checkin(d(2))
            .with_price("87.5"),
    ];
    let timeline = aggregate(&obs);
    let entry = &timeline.get(&PropertyIdentity::new("X")).unwrap().entries[0];
    assert_eq!(entry.price, dec!(87.5));
    assert_eq!(timeline.warnings().count(), 1);
}

#[test]
fn missing_fields_produce_warnings_but_name_only_rows_do_not() {
    let obs = vec![
        PriceObservation::new("1", "X"),
        PriceObservation::new("2", "X").with_price("10"),
        PriceObservation::new("3", "X").with_checkin(d(3)),
    ];
    let timeline = aggregate(&obs);
    let warnings: Vec<_> = timeline.warnings().cloned().collect();
    assert_eq!(
        warnings,
        vec![
            DataQualityWarning::MissingCheckinDate {
                observation_id: "2".into()
            },
            DataQualityWarning::MissingPrice {
                observation_id: "3".into()
            },
        ]
    );
    let series = timeline.get(&PropertyIdentity::new("X")).unwrap();
    assert!(series.entries.is_empty());
    assert_eq!(series.representative.id.as_str(), "2");
}

#[test]
fn predicted_only_days_stay_predicted() {
    let obs = vec![
        PriceObservation::new("1", "X")
            .with_checkin(d(4))
            .with_price("100")
            .with_kind(PriceKind::Predicted),
        PriceObservation::new("2", "X")
            .with_checkin(d(5))
            .with_price("100")
            .with_kind(PriceKind::Predicted),
        PriceObservation::new("3", "X").with_checkin(d(5)).with_price("120"),
    ];
    let timeline = aggregate(&obs);
    let series = timeline.get(&PropertyIdentity::new("X")).unwrap();
    assert_eq!(series.entries[0].kind, PriceKind::Predicted);
    assert_eq!(series.entries[1].kind, PriceKind::Observed);
    assert_eq!(series.entries[1].price, dec!(110.00));
}

#[test]
fn summary_averages_daily_prices() {
    let obs = vec![
        PriceObservation::new("1", "X").with_checkin(d(1)).with_price("100"),
        PriceObservation::new("2", "X").with_checkin(d(2)).with_price("151"),
        PriceObservation::new("3", "X").with_checkin(d(3)).with_price("50"),
    ];
    let summary = aggregate(&obs)
        .get(&PropertyIdentity::new("X"))
        .unwrap()
        .summary();
    assert_eq!(summary.nights_counted, 3);
    assert_eq!(summary.average_price, Some(dec!(100.33)));
    assert_eq!(summary.min, Some(dec!(50)));
    assert_eq!(summary.max, Some(dec!(151)));
}
