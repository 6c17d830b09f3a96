// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::format_description;

pub const DATE_LAYOUT: &str = "YYYY-MM-DD";
pub const MONTH_LAYOUT: &str = "YYYY-MM";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";
/// Largest accepted amount, one billion in whole units. Keeps sums over a
/// full dataset well inside `i64`.
pub const MAX_MONEY_CENTS: i64 = 100_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidMoney,
    NegativeMoney,
    MoneyTooLarge,
    InvalidDate,
    InvalidMonth,
    InvalidColor,
    InvalidDayKey,
    DuplicateDay,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMoney => f.write_str("invalid money value"),
            Self::NegativeMoney => f.write_str("negative money value"),
            Self::MoneyTooLarge => f.write_str("money value too large"),
            Self::InvalidDate => f.write_str("invalid date value; expected YYYY-MM-DD"),
            Self::InvalidMonth => f.write_str("invalid month value; expected YYYY-MM"),
            Self::InvalidColor => f.write_str("invalid color value; expected #rrggbb or #rgb"),
            Self::InvalidDayKey => f.write_str("invalid day key; expected \"01\" through \"31\""),
            Self::DuplicateDay => f.write_str("day appears more than once"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

pub fn parse_required_cents(input: &str) -> ValidationResult<i64> {
    parse_cents(input.trim())
}

pub fn parse_required_date(input: &str) -> ValidationResult<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

/// Parses a dataset day key. Accepts `"7"` and `"07"` alike and returns the
/// day number.
pub fn parse_day_key(input: &str) -> ValidationResult<u8> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.len() > 2 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidDayKey);
    }
    let day = trimmed
        .parse::<u8>()
        .map_err(|_| ValidationError::InvalidDayKey)?;
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(ValidationError::InvalidDayKey)
    }
}

pub fn day_key(day: u8) -> String {
    format!("{day:02}")
}

pub fn format_cents(cents: i64) -> String {
    format_cents_with_symbol(cents, DEFAULT_CURRENCY_SYMBOL)
}

pub fn format_cents_with_symbol(cents: i64, symbol: &str) -> String {
    let (sign, cents) = normalize_sign(cents);
    let whole = cents / 100;
    let remainder = cents % 100;
    format!("{sign}{symbol}{}.{:02}", comma_format(whole), remainder)
}

pub fn format_date(value: Date) -> String {
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

fn parse_cents(input: &str) -> ValidationResult<i64> {
    let clean = input.replace(',', "");
    if clean.starts_with('-') {
        return Err(ValidationError::NegativeMoney);
    }

    let clean = clean
        .strip_prefix('$')
        .or_else(|| clean.strip_prefix('€'))
        .unwrap_or(&clean);
    if clean.is_empty() {
        return Err(ValidationError::InvalidMoney);
    }

    let parts = clean.split('.').collect::<Vec<_>>();
    if parts.len() > 2 {
        return Err(ValidationError::InvalidMoney);
    }

    let whole = parse_digits(parts[0], true)?;
    if whole > MAX_MONEY_CENTS / 100 {
        return Err(ValidationError::MoneyTooLarge);
    }

    let mut frac = 0i64;
    if parts.len() == 2 {
        if parts[1].len() > 2 {
            return Err(ValidationError::InvalidMoney);
        }
        frac = parse_digits(parts[1], false)?;
        if parts[1].len() == 1 {
            frac = frac.checked_mul(10).ok_or(ValidationError::InvalidMoney)?;
        }
    }

    let cents = whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac))
        .ok_or(ValidationError::MoneyTooLarge)?;
    if cents > MAX_MONEY_CENTS {
        return Err(ValidationError::MoneyTooLarge);
    }
    Ok(cents)
}

fn parse_digits(input: &str, allow_empty: bool) -> ValidationResult<i64> {
    if input.is_empty() {
        if allow_empty {
            return Ok(0);
        }
        return Err(ValidationError::InvalidMoney);
    }
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ValidationError::InvalidMoney);
    }
    input
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidMoney)
}

fn comma_format(value: i64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let mut chars = digits.chars().collect::<Vec<_>>();
    let mut count = 0usize;
    while let Some(ch) = chars.pop() {
        if count == 3 {
            out.push(',');
            count = 0;
        }
        out.push(ch);
        count += 1;
    }
    out.chars().rev().collect()
}

fn normalize_sign(cents: i64) -> (&'static str, i64) {
    if cents >= 0 {
        return ("", cents);
    }
    if cents == i64::MIN {
        ("-", i64::MAX)
    } else {
        ("-", -cents)
    }
}
