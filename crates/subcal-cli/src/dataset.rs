// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use subcal_app::validation::{parse_day_key, parse_required_cents, parse_required_date};
use subcal_app::{DayCell, DayDataset, DetailPanelSide, Rgb, Subscription};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    #[serde(default)]
    days: Vec<DayEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DayEntry {
    day: String,
    panel_side: Option<String>,
    #[serde(default)]
    subscriptions: Vec<SubscriptionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubscriptionEntry {
    name: String,
    #[serde(default)]
    logo: String,
    payment: String,
    total: String,
    since: String,
    #[serde(default)]
    every: String,
    color: String,
}

pub fn load_dataset_file(path: &Path) -> Result<DayDataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read dataset file {}", path.display()))?;
    parse_dataset(&raw).with_context(|| format!("load dataset {}", path.display()))
}

pub fn parse_dataset(raw: &str) -> Result<DayDataset> {
    let file: DatasetFile = toml::from_str(raw).context("parse TOML dataset")?;

    let mut dataset = DayDataset::new();
    for entry in file.days {
        let cell = day_cell(&entry)?;
        if dataset.insert(cell)?.is_some() {
            bail!("day {:?} appears more than once", entry.day);
        }
    }
    Ok(dataset)
}

fn day_cell(entry: &DayEntry) -> Result<DayCell> {
    let day = parse_day_key(&entry.day).with_context(|| format!("day {:?}", entry.day))?;
    let side = match entry.panel_side.as_deref() {
        None => DetailPanelSide::Default,
        Some(raw) => DetailPanelSide::parse(raw).with_context(|| {
            format!(
                "day {:?}: panel_side must be left, right or default, got {raw:?}",
                entry.day
            )
        })?,
    };
    let subscriptions = entry
        .subscriptions
        .iter()
        .map(|item| {
            subscription(item)
                .with_context(|| format!("day {:?}, subscription {:?}", entry.day, item.name))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DayCell::in_month(day, subscriptions).with_panel_side(side))
}

fn subscription(entry: &SubscriptionEntry) -> Result<Subscription> {
    if entry.name.trim().is_empty() {
        bail!("name must not be empty");
    }
    Ok(Subscription {
        name: entry.name.clone(),
        logo_ref: entry.logo.clone(),
        payment_cents: parse_required_cents(&entry.payment)
            .with_context(|| format!("payment {:?}", entry.payment))?,
        total_cents: parse_required_cents(&entry.total)
            .with_context(|| format!("total {:?}", entry.total))?,
        active_since: parse_required_date(&entry.since)
            .with_context(|| format!("since {:?}", entry.since))?,
        recurrence_label: entry.every.clone(),
        accent_color: Rgb::parse(&entry.color)
            .with_context(|| format!("color {:?}", entry.color))?,
    })
}

#[cfg(test)]
mod tests {
    use super::{load_dataset_file, parse_dataset};
    use anyhow::Result;
    use subcal_app::{CellStyle, DetailPanelSide, Rgb};

    const SINGLE_DAY: &str = r##"
[[days]]
day = "7"
panel_side = "left"

[[days.subscriptions]]
name = "Make"
logo = "/make.svg"
payment = "2.99"
total = "35.88"
since = "2023-01-01"
every = "Every 07th"
color = "#6d0ccc"
"##;

    fn error_chain(result: Result<subcal_app::DayDataset>) -> String {
        format!("{:#}", result.expect_err("dataset should be rejected"))
    }

    #[test]
    fn parses_day_with_subscription() -> Result<()> {
        let dataset = parse_dataset(SINGLE_DAY)?;
        let cell = dataset.lookup("07").expect("day 07 present");
        assert_eq!(cell.style, CellStyle::Charged);
        assert_eq!(cell.panel_side, DetailPanelSide::Left);

        let make = &cell.subscriptions[0];
        assert_eq!(make.payment_cents, 299);
        assert_eq!(make.total_cents, 3_588);
        assert_eq!(make.accent_color, Rgb::new(0x6d, 0x0c, 0xcc));
        assert_eq!(make.recurrence_label, "Every 07th");
        Ok(())
    }

    #[test]
    fn day_without_subscriptions_is_plain() -> Result<()> {
        let dataset = parse_dataset("[[days]]\nday = \"09\"\n")?;
        let cell = dataset.get(9).expect("day 9 present");
        assert_eq!(cell.style, CellStyle::Plain);
        assert_eq!(cell.panel_side, DetailPanelSide::Default);
        Ok(())
    }

    #[test]
    fn empty_file_is_empty_dataset() -> Result<()> {
        assert!(parse_dataset("")?.is_empty());
        Ok(())
    }

    #[test]
    fn demo_file_matches_demo_dataset() -> Result<()> {
        let dataset = parse_dataset(&subcal_testkit::demo_dataset_toml())?;
        assert_eq!(dataset, subcal_testkit::demo_dataset());
        Ok(())
    }

    #[test]
    fn load_reads_file_from_disk() -> Result<()> {
        let (_dir, path) = subcal_testkit::write_demo_dataset()?;
        let dataset = load_dataset_file(&path)?;
        assert_eq!(dataset.len(), 9);
        Ok(())
    }

    #[test]
    fn missing_file_names_the_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("absent.toml");
        let message = format!(
            "{:#}",
            load_dataset_file(&path).expect_err("missing file should fail")
        );
        assert!(message.contains("read dataset file"));
        assert!(message.contains("absent.toml"));
        Ok(())
    }

    #[test]
    fn duplicate_day_is_rejected() {
        let message = error_chain(parse_dataset(
            "[[days]]\nday = \"07\"\n[[days]]\nday = \"7\"\n",
        ));
        assert!(message.contains("appears more than once"));
    }

    #[test]
    fn out_of_range_day_is_rejected() {
        let message = error_chain(parse_dataset("[[days]]\nday = \"32\"\n"));
        assert!(message.contains("day \"32\""));
        assert!(message.contains("invalid day key"));
    }

    #[test]
    fn bad_subscription_fields_name_the_entry() {
        let bad_money = SINGLE_DAY.replace("\"2.99\"", "\"2.999\"");
        let message = error_chain(parse_dataset(&bad_money));
        assert!(message.contains("subscription \"Make\""));
        assert!(message.contains("payment \"2.999\""));

        let bad_color = SINGLE_DAY.replace("#6d0ccc", "purple");
        assert!(error_chain(parse_dataset(&bad_color)).contains("invalid color"));

        let bad_date = SINGLE_DAY.replace("2023-01-01", "01/01/2023");
        assert!(error_chain(parse_dataset(&bad_date)).contains("invalid date"));

        let negative = SINGLE_DAY.replace("\"35.88\"", "\"-1.00\"");
        assert!(error_chain(parse_dataset(&negative)).contains("negative money"));
    }

    #[test]
    fn amounts_that_could_overflow_totals_are_rejected() {
        let huge = SINGLE_DAY.replace("\"2.99\"", "\"92233720368547758.07\"");
        let message = error_chain(parse_dataset(&huge));
        assert!(message.contains("payment \"92233720368547758.07\""));
        assert!(message.contains("money value too large"));
    }

    #[test]
    fn bad_panel_side_and_unknown_fields_are_rejected() {
        let side = SINGLE_DAY.replace("\"left\"", "\"top\"");
        assert!(error_chain(parse_dataset(&side)).contains("panel_side"));

        let typo = SINGLE_DAY.replace("every =", "evry =");
        assert!(error_chain(parse_dataset(&typo)).contains("parse TOML dataset"));
    }
}
