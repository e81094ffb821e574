use serde::{Serialize, Deserialize};
use time::{Date, Month};
use crate::{date_key::{month_name, DateKey}, date_set::DateSet};

pub const GRID_CELLS: usize = 42;
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Previous,
    Next,
}

/// The displayed (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: Month,
}

impl CalendarCursor {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub fn containing(key: DateKey) -> Self {
        Self { year: key.year(), month: key.month() }
    }

    /// Shifts by one month, rolling the year over at the ends. Stays put at the
    /// edge of the representable date range.
    pub fn navigate(self, direction: Direction) -> Self {
        let (year, month) = match direction {
            Direction::Next if self.month == Month::December => (self.year + 1, Month::January),
            Direction::Previous if self.month == Month::January => (self.year - 1, Month::December),
            Direction::Next => (self.year, self.month.next()),
            Direction::Previous => (self.year, self.month.previous()),
        };
        match Date::from_calendar_date(year, month, 1) {
            Ok(_) => Self { year, month },
            Err(_) => self,
        }
    }

    pub fn label(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    fn first_day(self) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, 1).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: DateKey,
    pub day: u8,
    pub other_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub is_selected: bool,
}

impl CalendarCell {
    pub fn interactive(&self) -> bool {
        !self.other_month && !self.is_past
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub cursor: CalendarCursor,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

/// Six weeks starting at the Sunday on or before the 1st of the displayed month.
pub fn render(cursor: CalendarCursor, today: DateKey, selected: &DateSet) -> CalendarGrid {
    let Some(first) = cursor.first_day() else {
        return CalendarGrid { cursor, cells: Vec::new() };
    };

    let lead = first.weekday().number_days_from_sunday();
    let start = (0..lead)
        .try_fold(first, |date, _| date.previous_day())
        .unwrap_or(first);

    let cells = std::iter::successors(Some(start), |date| date.next_day())
        .take(GRID_CELLS)
        .map(|date| {
            let key = DateKey::from_date(date);
            CalendarCell {
                date: key,
                day: date.day(),
                other_month: date.month() != cursor.month || date.year() != cursor.year,
                is_today: key == today,
                is_past: key < today,
                is_selected: selected.contains(key),
            }
        })
        .collect();

    CalendarGrid { cursor, cells }
}
