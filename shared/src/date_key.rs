use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use time::{macros::format_description, Date, Month, OffsetDateTime, UtcOffset, Weekday};
use crate::date_set::SelectionError;

/// A calendar day without time of day, canonically written `YYYY-MM-DD`.
///
/// Ordering follows the calendar, which matches the lexicographic order of the
/// canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(Date);

impl DateKey {
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// The current day as seen from `offset`.
    pub fn today(offset: UtcOffset) -> Self {
        Self(OffsetDateTime::now_utc().to_offset(offset).date())
    }

    pub const fn date(self) -> Date {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> Month {
        self.0.month()
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Human label used in the selected-dates list, e.g. `Sun, Jun 1 2025`.
    pub fn label(self) -> String {
        let weekday = match self.weekday() {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        };
        let month = month_name(self.month());
        format!("{}, {} {} {}", weekday, &month[..3], self.day(), self.year())
    }
}

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.0.year(), u8::from(self.0.month()), self.0.day())
    }
}

impl FromStr for DateKey {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| SelectionError::InvalidDate(trimmed.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = SelectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        Self(date)
    }
}
