use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tarifa::{CacheConfig, RetryPolicy, Tarifa, TarifaConfig, TarifaError, UpliftPolicy};
use tarifa_mock::MockStore;

fn with_mock() -> tarifa::TarifaBuilder {
    Tarifa::builder().with_store(Arc::new(MockStore::new()))
}

fn invalid_arg(res: Result<Tarifa, TarifaError>) -> String {
    match res {
        Err(TarifaError::InvalidArg(msg)) => msg,
        Err(other) => panic!("expected InvalidArg, got {other:?}"),
        Ok(_) => panic!("expected InvalidArg, got a built orchestrator"),
    }
}

#[test]
fn store_is_required() {
    let msg = invalid_arg(Tarifa::builder().build());
    assert!(msg.contains("with_store"), "msg: {msg}");
}

#[test]
fn defaults_are_documented_values() {
    let tarifa = with_mock().build().unwrap();
    let cfg = tarifa.config();
    assert_eq!(cfg.uplift, UpliftPolicy::new(dec!(20), dec!(10)));
    assert_eq!(cfg.apply_concurrency, 8);
    assert_eq!(cfg.upcoming_horizon_days, 30);
    assert_eq!(cfg.memoize, None);
    assert_eq!(tarifa.advisor().policy(), cfg.uplift);
}

#[test]
fn inverted_tiers_are_rejected() {
    let msg = invalid_arg(
        with_mock()
            .uplift_policy(UpliftPolicy::new(dec!(10), dec!(20)))
            .build(),
    );
    assert!(msg.contains("event_today_percent"), "msg: {msg}");
}

#[test]
fn zero_concurrency_is_rejected() {
    invalid_arg(with_mock().apply_concurrency(0).build());
}

#[test]
fn unusable_refresh_policies_are_rejected() {
    let base = RetryPolicy::default();
    for policy in [
        RetryPolicy { max_attempts: 0, ..base },
        RetryPolicy { factor: 0, ..base },
        RetryPolicy { jitter_percent: 101, ..base },
        RetryPolicy { min_backoff_ms: 9_000, max_backoff_ms: 8_000, ..base },
    ] {
        invalid_arg(with_mock().refresh_policy(policy).build());
    }
}

#[test]
fn empty_memo_is_rejected() {
    invalid_arg(
        with_mock()
            .memoize(CacheConfig {
                max_entries: 0,
                ..CacheConfig::default()
            })
            .build(),
    );
}

#[test]
fn whole_config_can_be_supplied() {
    let cfg = TarifaConfig {
        apply_concurrency: 2,
        event_location: Some("Valencia".into()),
        ..TarifaConfig::default()
    };
    let tarifa = with_mock().config(cfg).build().unwrap();
    assert_eq!(tarifa.config().apply_concurrency, 2);
    assert_eq!(tarifa.config().event_location.as_deref(), Some("Valencia"));
}

proptest! {
    #[test]
    fn valid_tier_pairs_always_build(today in 1u32..=1000, below in 1u32..=1000) {
        // tenths of a percent keep at most one decimal place
        let today_pct = Decimal::new(i64::from(today), 1);
        let yesterday_pct = Decimal::new(i64::from(today.saturating_sub(below)), 1);
        let res = with_mock().uplift_policy(UpliftPolicy::new(today_pct, yesterday_pct)).build();
        prop_assert!(res.is_ok());
    }
}
