//! Callback-slot resolution for rescheduled candidates.
//!
//! Candidates phrase callback times the way people talk ("tomorrow at 2pm")
//! and name their zone by US abbreviation. Resolution anchors the phrase to a
//! reference instant and returns an absolute UTC time.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

/// US timezone abbreviations to fixed UTC offsets, in hours.
const US_ZONES: &[(&str, i32)] = &[
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

fn zone_offset(abbrev: &str) -> Option<FixedOffset> {
    let upper = abbrev.trim().to_ascii_uppercase();
    US_ZONES
        .iter()
        .find(|(name, _)| *name == upper)
        .and_then(|(_, hours)| FixedOffset::east_opt(hours * 3600))
}

/// Resolves a spoken callback slot against a reference instant.
///
/// Supported phrasing: an optional day word ("today", "tomorrow") plus a
/// clock time ("2pm", "2:30 pm", "14:00"). Without a day word, a time that
/// has already passed in the candidate's zone rolls to the next day. Unknown
/// zones and unparseable phrases yield `None`.
pub fn resolve_slot(phrase: &str, timezone: &str, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let offset = zone_offset(timezone)?;
    let lower = phrase.to_ascii_lowercase();
    let time = parse_clock_time(&lower)?;

    let local_now = reference.with_timezone(&offset);
    let mut date = local_now.date_naive();
    if lower.contains("tomorrow") {
        date = date.succ_opt()?;
    } else if !lower.contains("today") && time <= local_now.time() {
        date = date.succ_opt()?;
    }

    let local = offset
        .from_local_datetime(&date.and_time(time))
        .single()?;
    Some(local.with_timezone(&Utc))
}

/// Extracts the first clock time in the phrase: "2pm", "2:30pm", "14:00".
fn parse_clock_time(phrase: &str) -> Option<NaiveTime> {
    let bytes = phrase.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let hour: u32 = phrase[start..i].parse().ok()?;
            let mut minute = 0u32;
            if i < bytes.len() && bytes[i] == b':' {
                let mstart = i + 1;
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                if i > mstart {
                    minute = phrase[mstart..i].parse().ok()?;
                }
            }
            let rest = phrase[i..].trim_start();
            let (hour, meridiem) = if rest.starts_with("pm") || rest.starts_with("p.m") {
                (if hour == 12 { 12 } else { hour + 12 }, true)
            } else if rest.starts_with("am") || rest.starts_with("a.m") {
                (if hour == 12 { 0 } else { hour }, true)
            } else {
                (hour, false)
            };
            // a bare number without a meridiem or minutes is too ambiguous
            // to schedule against ("call me in 2")
            if !meridiem && minute == 0 && !phrase[..i].contains(':') {
                continue;
            }
            return NaiveTime::from_hms_opt(hour, minute, 0);
        }
        i += 1;
    }
    None
}

/// A resolved slot plus how far out it is, for logging.
pub fn lead_time(slot: DateTime<Utc>, reference: DateTime<Utc>) -> Duration {
    slot - reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference() -> DateTime<Utc> {
        // 2026-03-10 15:00 UTC = 10:00 EST
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2026, 3, 10)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn tomorrow_afternoon_in_eastern() {
        let slot = resolve_slot("tomorrow at 2pm", "EST", reference()).unwrap();
        assert_eq!(slot, Utc.with_ymd_and_hms(2026, 3, 11, 19, 0, 0).unwrap());
    }

    #[test]
    fn passed_time_without_day_word_rolls_forward() {
        // 9am EST has already passed at the 10:00 EST reference
        let slot = resolve_slot("9am", "EST", reference()).unwrap();
        assert_eq!(slot, Utc.with_ymd_and_hms(2026, 3, 11, 14, 0, 0).unwrap());
    }

    #[test]
    fn today_with_minutes_and_pacific_offset() {
        let slot = resolve_slot("today at 2:30 pm", "PST", reference()).unwrap();
        assert_eq!(slot, Utc.with_ymd_and_hms(2026, 3, 10, 22, 30, 0).unwrap());
    }

    #[test]
    fn twenty_four_hour_times_parse() {
        let slot = resolve_slot("tomorrow at 14:00", "CST", reference()).unwrap();
        assert_eq!(slot, Utc.with_ymd_and_hms(2026, 3, 11, 20, 0, 0).unwrap());
    }

    #[test]
    fn noon_and_midnight_edges() {
        assert_eq!(
            parse_clock_time("tomorrow at 12pm"),
            NaiveTime::from_hms_opt(12, 0, 0)
        );
        assert_eq!(
            parse_clock_time("tomorrow at 12am"),
            NaiveTime::from_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn unknown_zone_or_phrase_is_none() {
        assert!(resolve_slot("tomorrow at 2pm", "CET", reference()).is_none());
        assert!(resolve_slot("sometime next week", "EST", reference()).is_none());
        assert!(resolve_slot("call me in 2", "EST", reference()).is_none());
    }

    #[test]
    fn zone_abbreviations_are_case_insensitive() {
        let a = resolve_slot("tomorrow at 2pm", "est", reference()).unwrap();
        let b = resolve_slot("tomorrow at 2pm", "EST", reference()).unwrap();
        assert_eq!(a, b);
    }
}
