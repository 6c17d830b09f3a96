// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::Date;

use crate::validation::{ValidationError, ValidationResult, day_key};

/// Number of subscriptions a cell shows inline before collapsing the rest
/// into a `+N` badge.
pub const INLINE_SUBSCRIPTIONS: usize = 2;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(value: &str) -> ValidationResult<Self> {
        let hex = value
            .trim()
            .strip_prefix('#')
            .ok_or(ValidationError::InvalidColor)?;
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor);
        }

        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| ValidationError::InvalidColor)
        };
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(ValidationError::InvalidColor),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
    pub logo_ref: String,
    pub payment_cents: i64,
    pub total_cents: i64,
    #[serde(with = "iso_date")]
    pub active_since: Date,
    pub recurrence_label: String,
    pub accent_color: Rgb,
}

/// Background treatment for a calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    Adjacent,
    Plain,
    Charged,
}

impl CellStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adjacent => "adjacent",
            Self::Plain => "plain",
            Self::Charged => "charged",
        }
    }
}

/// Which edge the hover popover anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailPanelSide {
    Left,
    Right,
    #[default]
    Default,
}

impl DetailPanelSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Default => "default",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "" | "default" => Some(Self::Default),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum DayLabel {
    InMonth(u8),
    /// Previous-month filler. `offset` counts back from the 1st of the
    /// active month, `day` is the day number inside the previous month.
    Leading { offset: u8, day: u8 },
    Trailing(u8),
}

impl DayLabel {
    pub const fn calendar_day(self) -> u8 {
        match self {
            Self::InMonth(day) | Self::Trailing(day) => day,
            Self::Leading { day, .. } => day,
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMonth(day) => write!(f, "{day:02}"),
            Self::Leading { offset, .. } => write!(f, "-{offset}"),
            Self::Trailing(day) => write!(f, "+{day}"),
        }
    }
}

impl From<DayLabel> for String {
    fn from(value: DayLabel) -> Self {
        value.to_string()
    }
}

/// Background fill derived from a list of accent colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Fill {
    None,
    Solid { color: Rgb },
    Linear { stops: Vec<ColorStop> },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset_pct: f64,
    pub color: Rgb,
}

impl Fill {
    pub fn from_colors(colors: &[Rgb]) -> Self {
        match colors {
            [] => Self::None,
            [color] => Self::Solid { color: *color },
            _ => Self::Linear {
                stops: color_stops(colors),
            },
        }
    }

    pub fn css(&self) -> String {
        match self {
            Self::None => "none".to_owned(),
            Self::Solid { color } => color.to_string(),
            Self::Linear { stops } => {
                let stops = stops
                    .iter()
                    .map(|stop| format!("{} {}%", stop.color, stop.offset_pct))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("linear-gradient(to right, {stops})")
            }
        }
    }

    pub fn primary(&self) -> Option<Rgb> {
        match self {
            Self::None => None,
            Self::Solid { color } => Some(*color),
            Self::Linear { stops } => stops.first().map(|stop| stop.color),
        }
    }
}

/// Evenly spaced stops across `[0, 100]`. A lone color sits at 100%.
pub fn color_stops(colors: &[Rgb]) -> Vec<ColorStop> {
    let last = colors.len().saturating_sub(1);
    colors
        .iter()
        .enumerate()
        .map(|(index, color)| ColorStop {
            offset_pct: if last == 0 {
                100.0
            } else {
                index as f64 / last as f64 * 100.0
            },
            color: *color,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub label: DayLabel,
    pub style: CellStyle,
    pub subscriptions: Vec<Subscription>,
    pub panel_side: DetailPanelSide,
}

impl DayCell {
    pub fn in_month(day: u8, subscriptions: Vec<Subscription>) -> Self {
        let style = if subscriptions.is_empty() {
            CellStyle::Plain
        } else {
            CellStyle::Charged
        };
        Self {
            label: DayLabel::InMonth(day),
            style,
            subscriptions,
            panel_side: DetailPanelSide::Default,
        }
    }

    pub fn filler(label: DayLabel) -> Self {
        Self {
            label,
            style: CellStyle::Adjacent,
            subscriptions: Vec::new(),
            panel_side: DetailPanelSide::Default,
        }
    }

    pub fn with_panel_side(mut self, side: DetailPanelSide) -> Self {
        self.panel_side = side;
        self
    }

    pub fn has_subscriptions(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn is_filler(&self) -> bool {
        !matches!(self.label, DayLabel::InMonth(_))
    }

    /// Saturates instead of overflowing on hand-built cells.
    pub fn total_payment_cents(&self) -> i64 {
        self.subscriptions
            .iter()
            .fold(0, |total, sub| total.saturating_add(sub.payment_cents))
    }

    pub fn accent_colors(&self) -> Vec<Rgb> {
        self.subscriptions
            .iter()
            .map(|sub| sub.accent_color)
            .collect()
    }

    pub fn fill(&self) -> Fill {
        Fill::from_colors(&self.accent_colors())
    }

    pub fn inline_subscriptions(&self) -> &[Subscription] {
        let shown = self.subscriptions.len().min(INLINE_SUBSCRIPTIONS);
        &self.subscriptions[..shown]
    }

    pub fn overflow_count(&self) -> usize {
        self.subscriptions.len().saturating_sub(INLINE_SUBSCRIPTIONS)
    }
}

/// Read-only table of the days that carry charges, keyed by zero-padded day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayDataset {
    days: BTreeMap<String, DayCell>,
}

impl DayDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from in-month cells. A day listed twice is an error.
    pub fn from_cells<I>(cells: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = DayCell>,
    {
        let mut dataset = Self::new();
        for cell in cells {
            if dataset.insert(cell)?.is_some() {
                return Err(ValidationError::DuplicateDay);
            }
        }
        Ok(dataset)
    }

    /// Inserts an in-month cell, returning the cell it replaced.
    pub fn insert(&mut self, cell: DayCell) -> ValidationResult<Option<DayCell>> {
        let DayLabel::InMonth(day) = cell.label else {
            return Err(ValidationError::InvalidDayKey);
        };
        if !(1..=31).contains(&day) {
            return Err(ValidationError::InvalidDayKey);
        }
        Ok(self.days.insert(day_key(day), cell))
    }

    pub fn lookup(&self, key: &str) -> Option<&DayCell> {
        self.days.get(key)
    }

    pub fn get(&self, day: u8) -> Option<&DayCell> {
        self.lookup(&day_key(day))
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.days.values()
    }

    pub fn charged_days(&self) -> impl Iterator<Item = &DayCell> {
        self.days().filter(|cell| cell.has_subscriptions())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of every subscription payment in the table.
    pub fn monthly_spend_cents(&self) -> i64 {
        self.days()
            .map(DayCell::total_payment_cents)
            .fold(0, i64::saturating_add)
    }

    pub fn subscription_count(&self) -> usize {
        self.days().map(|cell| cell.subscriptions.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Grid,
    Donut,
}

impl ViewKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Donut => "donut",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" | "calendar" => Some(Self::Grid),
            "donut" | "circle" => Some(Self::Donut),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::Donut,
            Self::Donut => Self::Grid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
    Prev,
    Next,
    #[default]
    None,
}

impl NavDirection {
    /// Sign used to pick a slide direction: -1, 0 or 1.
    pub const fn sign(self) -> i8 {
        match self {
            Self::Prev => -1,
            Self::None => 0,
            Self::Next => 1,
        }
    }
}
