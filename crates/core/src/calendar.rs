//! iCalendar export of a vaccination and treatment schedule.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::health::HealthCostEntry;
use crate::types::BirdType;

const PRODUCT_ID: &str = "-//River Poultry//Vaccination Scheduler//EN";
const UID_DOMAIN: &str = "riverpoultry";

/// One all-day event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Schedule each entry on `arrival + (age in days - 1)`.
///
/// Ages are in the bird type's unit. Entries aged zero or less fall on the
/// arrival day.
#[must_use]
pub fn schedule(entries: &[HealthCostEntry], bird: BirdType, arrival: NaiveDate) -> Vec<CalendarEvent> {
    let unit_days = Decimal::from(bird.age_unit().days());
    entries
        .iter()
        .map(|entry| {
            let age_days = entry.age.saturating_mul(unit_days).trunc().to_u64().unwrap_or(0);
            let offset = Days::new(age_days.saturating_sub(1));
            let notes = entry.notes.trim();
            CalendarEvent {
                title: entry.name.clone(),
                description: (!notes.is_empty()).then(|| notes.to_owned()),
                date: arrival.checked_add_days(offset).unwrap_or(arrival),
            }
        })
        .collect()
}

/// Render events as a `VCALENDAR` with CRLF line endings.
///
/// Each event carries a display alarm one day before.
#[must_use]
pub fn to_ics(events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_owned(),
        "VERSION:2.0".to_owned(),
        format!("PRODID:{PRODUCT_ID}"),
        "CALSCALE:GREGORIAN".to_owned(),
    ];
    for event in events {
        let end = event.date.succ_opt().unwrap_or(event.date);
        lines.push("BEGIN:VEVENT".to_owned());
        lines.push(format!("UID:{}@{UID_DOMAIN}", Uuid::new_v4()));
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!("DTSTART;VALUE=DATE:{}", event.date.format("%Y%m%d")));
        lines.push(format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        if let Some(description) = &event.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }
        lines.push("BEGIN:VALARM".to_owned());
        lines.push("TRIGGER:-P1D".to_owned());
        lines.push("ACTION:DISPLAY".to_owned());
        lines.push(format!("DESCRIPTION:{} reminder", escape_text(&event.title)));
        lines.push("END:VALARM".to_owned());
        lines.push("END:VEVENT".to_owned());
    }
    lines.push("END:VCALENDAR".to_owned());
    lines.join("\r\n")
}

/// Escape backslash, newline, comma and semicolon.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(name: &str, age: i64, notes: &str) -> HealthCostEntry {
        HealthCostEntry {
            id: name.to_owned(),
            name: name.to_owned(),
            age: Decimal::from(age),
            cost: Decimal::ZERO,
            notes: notes.to_owned(),
        }
    }

    fn arrival() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_broiler_ages_are_days() {
        let events = schedule(&[entry("Marek", 1, ""), entry("Gumboro", 14, "")], BirdType::Broiler, arrival());
        assert_eq!(events[0].date, arrival());
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(events[0].description, None);
    }

    #[test]
    fn test_layer_ages_are_weeks() {
        let events = schedule(&[entry("Fowl Pox", 10, "wing web")], BirdType::Layer, arrival());
        // 70 days after arrival, minus one.
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 5, 9).unwrap());
        assert_eq!(events[0].description.as_deref(), Some("wing web"));
    }

    #[test]
    fn test_zero_age_falls_on_arrival() {
        let events = schedule(&[entry("Check", 0, "")], BirdType::Broiler, arrival());
        assert_eq!(events[0].date, arrival());
    }

    #[test]
    fn test_ics_structure() {
        let events = schedule(&[entry("Newcastle; IB", 7, "spray, or water")], BirdType::Broiler, arrival());
        let stamp = Utc.with_ymd_and_hms(2025, 2, 20, 8, 30, 0).unwrap();
        let ics = to_ics(&events, stamp);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.ends_with("END:VCALENDAR"));
        assert!(ics.contains("DTSTAMP:20250220T083000Z"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20250307"));
        assert!(ics.contains("DTEND;VALUE=DATE:20250308"));
        assert!(ics.contains("SUMMARY:Newcastle\\; IB"));
        assert!(ics.contains("DESCRIPTION:spray\\, or water"));
        assert!(ics.contains("TRIGGER:-P1D"));
        assert!(ics.contains("@riverpoultry"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a\\b\nc"), "a\\\\b\\nc");
    }
}
