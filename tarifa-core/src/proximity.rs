//! Event-day and day-after-event classification.
//!
//! Dates are plain calendar days; no timezone conversion happens anywhere in
//! this module.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tarifa_types::{Classification, Event, EventSpan, TarifaError};

/// Where a date sits relative to the known events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proximity {
    /// The classified date.
    pub date: NaiveDate,
    /// First event (in input order) covering `date`.
    pub event_today: Option<Event>,
    /// First event (in input order) covering the previous calendar day.
    pub event_yesterday: Option<Event>,
}

impl Proximity {
    /// A date with no nearby events.
    #[must_use]
    pub const fn neutral(date: NaiveDate) -> Self {
        Self {
            date,
            event_today: None,
            event_yesterday: None,
        }
    }

    /// Whether the date itself falls inside an event.
    #[must_use]
    pub const fn is_event_day(&self) -> bool {
        self.event_today.is_some()
    }

    /// Whether the previous calendar day falls inside an event.
    #[must_use]
    pub const fn is_day_after_event(&self) -> bool {
        self.event_yesterday.is_some()
    }

    /// Collapse to a single label; an event day wins over a day-after.
    #[must_use]
    pub const fn classification(&self) -> Classification {
        if self.is_event_day() {
            Classification::EventToday
        } else if self.is_day_after_event() {
            Classification::EventYesterday
        } else {
            Classification::Neutral
        }
    }

    /// The event behind [`Proximity::classification`], if any.
    #[must_use]
    pub fn triggering_event(&self) -> Option<&Event> {
        self.event_today.as_ref().or(self.event_yesterday.as_ref())
    }
}

/// Classify `date` against `events`.
///
/// # Errors
/// Returns `InvalidEvent` for the first event that has neither a single date
/// nor a valid start/end range. Use [`partition_events`] to drop such events
/// up front.
pub fn classify(date: NaiveDate, events: &[Event]) -> Result<Proximity, TarifaError> {
    let spans = events
        .iter()
        .map(|e| e.span().map(|s| (e, s)))
        .collect::<Result<Vec<_>, _>>()?;

    let covering = |day: NaiveDate| {
        spans
            .iter()
            .find(|(_, span)| span.contains(day))
            .map(|(e, _)| (*e).clone())
    };

    Ok(Proximity {
        date,
        event_today: covering(date),
        event_yesterday: date.pred_opt().and_then(covering),
    })
}

/// Split events into usable ones and the errors describing the rest.
#[must_use]
pub fn partition_events(events: Vec<Event>) -> (Vec<Event>, Vec<TarifaError>) {
    let mut valid = Vec::with_capacity(events.len());
    let mut errors = Vec::new();
    for event in events {
        match event.span() {
            Ok(_) => valid.push(event),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(event = %event.id, error = %e, "ignoring event with invalid schedule");
                errors.push(e);
            }
        }
    }
    (valid, errors)
}

fn valid_spans(events: &[Event]) -> impl Iterator<Item = (&Event, EventSpan)> {
    events.iter().filter_map(|e| e.span().ok().map(|s| (e, s)))
}

/// Every event day in `from..=to`, for calendar marking.
///
/// Invalid events are skipped.
#[must_use]
pub fn event_dates(events: &[Event], from: NaiveDate, to: NaiveDate) -> BTreeSet<NaiveDate> {
    let mut days = BTreeSet::new();
    for (_, span) in valid_spans(events) {
        let mut day = span.first_day().max(from);
        let last = span.last_day().min(to);
        while day <= last {
            if span.contains(day) {
                days.insert(day);
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
    }
    days
}

/// Events overlapping `today..=today + horizon_days`, ordered by first day.
///
/// Invalid events are skipped.
#[must_use]
pub fn upcoming_events(events: &[Event], today: NaiveDate, horizon_days: u32) -> Vec<Event> {
    let end = today
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut hits: Vec<(NaiveDate, &Event)> = valid_spans(events)
        .filter(|(_, span)| span.overlaps(today, end))
        .map(|(e, span)| (span.first_day(), e))
        .collect();
    hits.sort_by_key(|(first, _)| *first);
    hits.into_iter().map(|(_, e)| e.clone()).collect()
}
