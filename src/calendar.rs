use time::{macros::format_description, Date, Duration, OffsetDateTime, Time, UtcOffset};

/// Inclusive bounds of one calendar day: local midnight to 23:59:59.999.
pub fn day_window(date: Date, offset: UtcOffset) -> (OffsetDateTime, OffsetDateTime) {
    let start = date.with_time(Time::MIDNIGHT).assume_offset(offset);
    let end = start + Duration::DAY - Duration::milliseconds(1);
    (start, end)
}

pub fn today(offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(offset).date()
}

/// Parses a `YYYY-MM-DD` path segment.
pub fn parse_day(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, format).ok()
}
