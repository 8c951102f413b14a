//! # Slot Synthesizer
//!
//! Turns a generation request into an ordered list of bookable intervals.
//!
//! The algorithm walks the requested date range one local calendar day at a time
//! in the business timezone:
//!
//! 1. Sundays are skipped. The closure rule is fixed and not configurable.
//! 2. The day's window is built from the local date and the requested time-of-day
//!    bounds, in the business timezone.
//! 3. A cursor starts at the window start. Each step proposes
//!    `[cursor, cursor + duration)`. A slot that would end after the window end
//!    stops the walk for that day, so truncated slots are never emitted. Otherwise the
//!    slot is emitted and the cursor moves forward by `duration + gap`.
//!
//! Only the emitted instants are converted to UTC. Across a daylight-saving
//! transition the UTC offset of the emitted slots shifts with the local clock.
//!
//! Everything here is pure. Identical inputs always yield identical output.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::{
    errors::{SlotError, SlotResult},
    models::time_slot::{GenerateSlotsRequest, SlotInterval},
};

const CLOSED_WEEKDAY: Weekday = Weekday::Sun;

/// Longest date range a single request may cover, inclusive of both ends.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Resolves an IANA zone name, falling back to UTC when it is absent or unknown.
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    match name {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            warn!(timezone = %name, "Unknown timezone, falling back to UTC");
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

/// Parses `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// `SlotError::Validation` when the text is not a valid time of day.
pub fn parse_time_of_day(text: &str) -> SlotResult<NaiveTime> {
    let trimmed = text.trim();
    let normalized = if trimmed.split(':').count() == 2 {
        format!("{trimmed}:00")
    } else {
        trimmed.to_string()
    };

    NaiveTime::parse_from_str(&normalized, "%H:%M:%S")
        .map_err(|e| SlotError::Validation(format!("Invalid time of day '{text}': {e}")))
}

/// Parses a calendar date as seen in `tz`.
///
/// Plain `YYYY-MM-DD` dates are taken as local dates. RFC 3339 timestamps are
/// converted into `tz` and truncated to their local calendar day.
///
/// # Errors
///
/// `SlotError::Validation` when the text is neither form.
pub fn parse_local_date(text: &str, tz: Tz) -> SlotResult<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|instant| instant.with_timezone(&tz).date_naive())
        .map_err(|e| SlotError::Validation(format!("Invalid date '{text}': {e}")))
}

impl GenerateSlotsRequest {
    /// Checks every field that can be checked without looking anything up.
    ///
    /// Dates are compared as UTC calendar days here. [`synthesize`] re-reads them
    /// in the business timezone.
    ///
    /// # Errors
    ///
    /// `SlotError::Validation` for unparsable dates or times, an end date before the
    /// start date, a range longer than [`MAX_RANGE_DAYS`], or a negative gap.
    pub fn validate(&self) -> SlotResult<()> {
        parse_time_of_day(&self.start_time)?;
        parse_time_of_day(&self.end_time)?;
        let start = parse_local_date(&self.start_date, Tz::UTC)?;
        let end = parse_local_date(&self.end_date, Tz::UTC)?;

        if start > end {
            return Err(SlotError::Validation(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(SlotError::Validation(format!(
                "date range covers {days} days, at most {MAX_RANGE_DAYS} are allowed"
            )));
        }
        if self.interval < 0 {
            return Err(SlotError::Validation(format!(
                "interval must be non-negative, got {}",
                self.interval
            )));
        }
        Ok(())
    }
}

/// Generates the candidate slots for `request`.
///
/// `service_duration` is in minutes and comes from the stored service, never from the
/// request. `timezone` is the business's IANA zone. An unknown or absent zone falls back
/// to UTC.
///
/// An empty result is a success, for example when the range only covers Sundays or the
/// window is shorter than one slot.
///
/// # Errors
///
/// `SlotError::Validation` when the request is malformed, `service_duration` is not
/// positive, or a slot would fall outside the representable date range.
pub fn synthesize(
    request: &GenerateSlotsRequest,
    service_duration: i32,
    timezone: Option<&str>,
) -> SlotResult<Vec<SlotInterval>> {
    request.validate()?;
    if service_duration <= 0 {
        return Err(SlotError::Validation(format!(
            "service duration must be positive, got {service_duration}"
        )));
    }

    let tz = resolve_timezone(timezone);
    let start_date = parse_local_date(&request.start_date, tz)?;
    let end_date = parse_local_date(&request.end_date, tz)?;
    let open = parse_time_of_day(&request.start_time)?;
    let close = parse_time_of_day(&request.end_time)?;
    if start_date > end_date {
        return Err(SlotError::Validation(format!(
            "start_date {start_date} is after end_date {end_date} in {tz}"
        )));
    }

    let duration = Duration::minutes(i64::from(service_duration));
    let step = duration + Duration::minutes(i64::from(request.interval));

    debug!(timezone = %tz, %start_date, %end_date, "Synthesizing slots");

    let mut slots = Vec::new();
    for day in start_date.iter_days().take_while(|day| *day <= end_date) {
        if day.weekday() == CLOSED_WEEKDAY {
            continue;
        }

        let window_start = local_instant(tz, day.and_time(open));
        let window_end = local_instant(tz, day.and_time(close));

        let mut cursor = window_start;
        while cursor < window_end {
            let slot_end = advance(cursor, duration)?;
            if slot_end > window_end {
                break;
            }
            slots.push(SlotInterval {
                start: cursor.with_timezone(&Utc),
                end: slot_end.with_timezone(&Utc),
            });
            cursor = advance(cursor, step)?;
        }
    }

    debug!(timezone = %tz, count = slots.len(), "Synthesized slots");
    Ok(slots)
}

fn advance(instant: DateTime<Tz>, by: Duration) -> SlotResult<DateTime<Tz>> {
    instant
        .checked_add_signed(by)
        .ok_or_else(|| SlotError::Validation(format!("slot after {instant} is out of range")))
}

/// Maps a local wall-clock time to an instant in `tz`.
///
/// A time inside a DST fold takes the earlier instant. A time inside a DST gap is
/// read with the offset in force before the transition, which lands it just past the gap.
fn local_instant(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix();
            tz.from_utc_datetime(&(local - before))
        }
    }
}
