use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Default timezone for campus calendar days.
/// Coupons reset and daily budgets roll over at local midnight in this zone.
pub const DEFAULT_CAMPUS_TZ: Tz = chrono_tz::Africa::Lagos;

/// Converts a UTC instant to a campus calendar date in the given timezone.
///
/// This is the single source of truth for deriving "today" from a timestamp.
pub fn campus_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Returns the local instant at 00:00 on the first day of `now`'s month.
///
/// Falls back to `now` itself when midnight does not exist in the zone
/// (a DST gap on the 1st).
pub fn start_of_month(now: &DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    now.date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .unwrap_or(*now)
}

/// Returns `(year, month)` of the calendar month before `date`.
pub fn previous_month(date: NaiveDate) -> (i32, u32) {
    let prev = date
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(1)))
        .unwrap_or(date);
    (prev.year(), prev.month())
}

/// Source of the current instant.
///
/// Services read the clock exactly once per operation and pass the instant
/// down, so domain calculations stay pure.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_campus_date_crosses_midnight_in_lagos() {
        // 23:30 UTC is 00:30 the next day in Lagos (UTC+1)
        let instant = Utc.with_ymd_and_hms(2024, 3, 14, 23, 30, 0).unwrap();
        assert_eq!(
            campus_date_from_utc(instant, DEFAULT_CAMPUS_TZ),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_start_of_month() {
        let now = DEFAULT_CAMPUS_TZ
            .with_ymd_and_hms(2024, 3, 14, 15, 45, 10)
            .unwrap();
        let start = start_of_month(&now);
        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(start.hour(), 0);
        assert_eq!(start.minute(), 0);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(previous_month(date), (2023, 12));

        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(previous_month(date), (2024, 2));
    }
}
