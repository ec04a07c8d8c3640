//! Wire rows as returned by PostgREST, tolerant of the dashboard's
//! Spanish/English column names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tarifa_core::{Event, EventId, ObservationId, PriceKind, PriceObservation};

/// Render a scalar JSON value as text; `null` and empty strings become `None`.
fn text(v: Option<Value>) -> Option<String> {
    match v? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Accept `YYYY-MM-DD` as well as full timestamps.
fn date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw?.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObservationRow {
    id: Value,
    #[serde(default, alias = "nombre")]
    hotel_name: Option<String>,
    #[serde(default, alias = "fecha")]
    checkin_date: Option<String>,
    #[serde(default)]
    scrape_date: Option<String>,
    #[serde(default, alias = "tipo_habitacion")]
    room_type: Option<String>,
    #[serde(default, alias = "precio")]
    price: Option<Value>,
    #[serde(default, alias = "tipo")]
    kind: Option<String>,
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    created_at: Option<String>,
}

impl ObservationRow {
    /// Convert into the domain record; rows without an id are unusable.
    pub(crate) fn into_observation(self, fallback_name: Option<&str>) -> Option<PriceObservation> {
        let id = text(Some(self.id))?;
        let kind = match self.kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("predicho" | "predicted" | "prediccion" | "predicción") => PriceKind::Predicted,
            _ => PriceKind::Observed,
        };
        Some(PriceObservation {
            id: ObservationId::new(id),
            property_id: text(self.user_id),
            property_name: self
                .hotel_name
                .or_else(|| fallback_name.map(str::to_string))
                .unwrap_or_default(),
            scrape_date: date(self.scrape_date.as_deref()),
            checkin_date: date(self.checkin_date.as_deref()),
            room_type: self.room_type.filter(|r| !r.trim().is_empty()),
            price: text(self.price),
            kind,
            observed_at: timestamp(self.created_at.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventRow {
    id: Value,
    #[serde(default, alias = "nombre")]
    name: Option<String>,
    #[serde(default, alias = "lugar")]
    venue: Option<String>,
    #[serde(default, alias = "fecha")]
    date: Option<String>,
    #[serde(default, alias = "fecha_inicio")]
    start_date: Option<String>,
    #[serde(default, alias = "fecha_fin")]
    end_date: Option<String>,
    #[serde(default, alias = "ubicacion", alias = "ciudad")]
    location: Option<String>,
}

impl EventRow {
    pub(crate) fn into_event(self) -> Option<Event> {
        Some(Event {
            id: EventId::new(text(Some(self.id))?),
            name: self.name.unwrap_or_default(),
            venue: self.venue,
            date: date(self.date.as_deref()),
            start_date: date(self.start_date.as_deref()),
            end_date: date(self.end_date.as_deref()),
            location: self.location,
        })
    }
}

/// Case-insensitive match of `location` against the event's location or venue.
pub(crate) fn matches_location(event: &Event, location: &str) -> bool {
    let needle = location.to_lowercase();
    [event.location.as_deref(), event.venue.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}
