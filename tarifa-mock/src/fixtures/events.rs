use chrono::NaiveDate;
use tarifa_core::Event;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap_or(NaiveDate::MIN)
}

/// Every fixture event, including one without a usable schedule.
pub fn all() -> Vec<Event> {
    let mut undated = Event::single("ev-4", "Mercadillo", day(1, 1))
        .with_location("Madrid")
        .with_venue("Plaza Mayor");
    undated.date = None;

    vec![
        Event::ranged("ev-1", "Feria de Mayo", day(5, 9), day(5, 10))
            .with_location("Madrid")
            .with_venue("IFEMA"),
        Event::single("ev-2", "Concierto de primavera", day(5, 12))
            .with_location("Madrid")
            .with_venue("WiZink Center"),
        Event::ranged("ev-3", "Fallas", day(3, 15), day(3, 19))
            .with_location("Valencia")
            .with_venue("Plaza del Ayuntamiento"),
        undated,
    ]
}

/// Events whose location or venue contains `location`, ignoring case.
pub fn by_location(location: Option<&str>) -> Vec<Event> {
    let Some(needle) = location.map(str::to_lowercase) else {
        return all();
    };
    all()
        .into_iter()
        .filter(|e| {
            [e.location.as_deref(), e.venue.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
