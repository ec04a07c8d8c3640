// Shared fixtures for the orchestrator tests; `use helpers::*;`.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use tarifa::{PriceObservation, StoreConnector, Tarifa, TarifaBuilder};
use tarifa_mock::MockStore;

pub const GRAND: &str = "Grand Hotel";
pub const SOL: &str = "Hostal Sol";
pub const MAR: &str = "Hotel Mar";

/// Calendar date shorthand for readability in tests.
pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

/// A dated, priced row.
pub fn priced(id: &str, name: &str, date: NaiveDate, price: &str) -> PriceObservation {
    PriceObservation::new(id, name)
        .with_checkin(date)
        .with_room_type("Doble")
        .with_price(price)
}

/// Builder preloaded with the fixture store and the Madrid event filter.
pub fn madrid_builder() -> (Arc<MockStore>, TarifaBuilder) {
    let store = Arc::new(MockStore::new());
    let builder = Tarifa::builder()
        .with_store(Arc::clone(&store) as Arc<dyn StoreConnector>)
        .event_location("Madrid");
    (store, builder)
}

pub fn madrid() -> (Arc<MockStore>, Tarifa) {
    let (store, builder) = madrid_builder();
    (store, builder.build().expect("tarifa builds"))
}
