// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, Month, OffsetDateTime};

use crate::model::{DayCell, DayDataset, DayLabel};
use crate::validation::{ValidationError, ValidationResult, day_key};

pub const GRID_COLUMNS: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = GRID_COLUMNS * GRID_ROWS;

pub const WEEKDAY_LABELS: [&str; GRID_COLUMNS] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> ValidationResult<Self> {
        let month = Month::try_from(month).map_err(|_| ValidationError::InvalidMonth)?;
        Self::from_parts(year, month)
    }

    pub fn from_parts(year: i32, month: Month) -> ValidationResult<Self> {
        Date::from_calendar_date(year, month, 1).map_err(|_| ValidationError::InvalidMonth)?;
        Ok(Self { year, month })
    }

    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(OffsetDateTime::now_utc().date())
    }

    /// Parses `YYYY-MM`, with a leading `-` for years before 0 as
    /// `Display` writes them.
    pub fn parse(value: &str) -> ValidationResult<Self> {
        let value = value.trim();
        let (sign, unsigned) = match value.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, value),
        };
        let (year, month) = unsigned
            .split_once('-')
            .ok_or(ValidationError::InvalidMonth)?;
        if year.is_empty()
            || month.len() != 2
            || !year.bytes().all(|b| b.is_ascii_digit())
            || !month.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::InvalidMonth);
        }
        let year = year
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidMonth)?
            * sign;
        let month = month
            .parse::<u8>()
            .map_err(|_| ValidationError::InvalidMonth)?;
        Self::new(year, month)
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> Month {
        self.month
    }

    pub fn first_day(self) -> Date {
        Date::from_calendar_date(self.year, self.month, 1).unwrap_or(Date::MIN)
    }

    pub fn days_in_month(self) -> u8 {
        time::util::days_in_year_month(self.year, self.month)
    }

    /// Weekday of the 1st, Sunday = 0 through Saturday = 6.
    pub fn first_weekday_offset(self) -> u8 {
        self.first_day().weekday().number_days_from_sunday()
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn shift(self, months: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month as u8) - 1 + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = u8::try_from(index.rem_euclid(12) + 1).ok()?;
        Self::new(year, month).ok()
    }

    pub fn next(self) -> Option<Self> {
        self.shift(1)
    }

    pub fn prev(self) -> Option<Self> {
        self.shift(-1)
    }

    /// Long English title, for example `February 2024`.
    pub fn title(self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.month as u8).cmp(&(other.year, other.month as u8))
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// A six-week calendar page: leading filler, the month itself, trailing
/// filler. Always `GRID_CELLS` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: YearMonth,
    leading: usize,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn leading_count(&self) -> usize {
        self.leading
    }

    pub fn in_month(&self) -> &[DayCell] {
        let end = self.leading + usize::from(self.month.days_in_month());
        &self.cells[self.leading..end]
    }

    pub fn trailing_count(&self) -> usize {
        self.cells.len() - self.leading - usize::from(self.month.days_in_month())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(GRID_COLUMNS)
    }

    pub fn get(&self, index: usize) -> Option<&DayCell> {
        self.cells.get(index)
    }

    /// Grid index of an in-month day.
    pub fn index_of_day(&self, day: u8) -> Option<usize> {
        if day == 0 || day > self.month.days_in_month() {
            return None;
        }
        Some(self.leading + usize::from(day) - 1)
    }
}

pub fn build_grid(month: YearMonth, dataset: &DayDataset) -> MonthGrid {
    let days_in_month = month.days_in_month();
    let offset = month.first_weekday_offset();
    let prev_month_days = month
        .prev()
        .map(YearMonth::days_in_month)
        .unwrap_or(31);

    let mut cells = Vec::with_capacity(GRID_CELLS);

    for i in 0..offset {
        cells.push(DayCell::filler(DayLabel::Leading {
            offset: offset - i,
            day: prev_month_days - offset + i + 1,
        }));
    }

    for day in 1..=days_in_month {
        let cell = match dataset.lookup(&day_key(day)) {
            Some(found) => DayCell {
                label: DayLabel::InMonth(day),
                ..found.clone()
            },
            None => DayCell::in_month(day, Vec::new()),
        };
        cells.push(cell);
    }

    let mut next_day = 1u8;
    while cells.len() < GRID_CELLS {
        cells.push(DayCell::filler(DayLabel::Trailing(next_day)));
        next_day += 1;
    }

    MonthGrid {
        month,
        leading: usize::from(offset),
        cells,
    }
}
