//! Publication-date parsing and display formatting.

use time::{
    Date, OffsetDateTime,
    format_description::{FormatItem, well_known::Rfc3339},
    macros::format_description,
};

/// en-GB long form: `Friday, 5 April 2019`.
pub const DISPLAY_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday repr:long], [day padding:none] [month repr:long] [year]");

const CALENDAR_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse an ISO-parseable frontmatter date: RFC 3339 first, then a plain
/// calendar date.
pub fn parse_publication_date(value: &str) -> Option<Date> {
    if let Ok(moment) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(moment.date());
    }
    Date::parse(value, CALENDAR_DATE_FORMAT).ok()
}
