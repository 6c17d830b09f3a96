// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;
use subcal_app::validation::format_date;
use subcal_app::{DayCell, DayDataset, DetailPanelSide, Rgb, Subscription};
use time::macros::date;
use time::{Date, Duration};

/// The demo table, unwrapped for fixtures.
pub fn demo_dataset() -> DayDataset {
    subcal_app::demo_dataset().expect("demo table is valid")
}

/// Renders a dataset in the TOML file format the CLI reads.
pub fn dataset_toml(dataset: &DayDataset) -> String {
    let mut out = String::new();
    for cell in dataset.days() {
        let _ = writeln!(out, "[[days]]");
        let _ = writeln!(out, "day = \"{}\"", cell.label);
        if cell.panel_side != DetailPanelSide::Default {
            let _ = writeln!(out, "panel_side = \"{}\"", cell.panel_side.as_str());
        }
        let _ = writeln!(out);
        for sub in &cell.subscriptions {
            let _ = writeln!(out, "[[days.subscriptions]]");
            let _ = writeln!(out, "name = {:?}", sub.name);
            let _ = writeln!(out, "logo = {:?}", sub.logo_ref);
            let _ = writeln!(out, "payment = \"{}\"", plain_amount(sub.payment_cents));
            let _ = writeln!(out, "total = \"{}\"", plain_amount(sub.total_cents));
            let _ = writeln!(out, "since = \"{}\"", format_date(sub.active_since));
            let _ = writeln!(out, "every = {:?}", sub.recurrence_label);
            let _ = writeln!(out, "color = \"{}\"", sub.accent_color);
            let _ = writeln!(out);
        }
    }
    out
}

pub fn demo_dataset_toml() -> String {
    dataset_toml(&demo_dataset())
}

pub fn temp_dataset_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("subscriptions.toml");
    Ok((dir, path))
}

pub fn write_demo_dataset() -> Result<(tempfile::TempDir, PathBuf)> {
    let (dir, path) = temp_dataset_path()?;
    std::fs::write(&path, demo_dataset_toml())
        .with_context(|| format!("write dataset {}", path.display()))?;
    Ok((dir, path))
}

fn plain_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

const SERVICE_NAMES: [&str; 16] = [
    "Figma", "Notion", "Slack", "GitHub", "Dropbox", "Zoom", "Canva", "Vercel", "Heroku",
    "Trello", "Asana", "Loom", "Grammarly", "Hulu", "Disney", "Proton",
];

const ACCENT_COLORS: [Rgb; 8] = [
    Rgb::new(0xa2, 0x59, 0xff),
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0x4a, 0x15, 0x4b),
    Rgb::new(0x18, 0x17, 0x17),
    Rgb::new(0x00, 0x61, 0xff),
    Rgb::new(0x2d, 0x8c, 0xff),
    Rgb::new(0x00, 0xc4, 0xcc),
    Rgb::new(0x1c, 0xe7, 0x83),
];

const REFERENCE_DATE: Date = date!(2020 - 01 - 01);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for randomized subscription tables.
#[derive(Debug, Clone)]
pub struct SubscriptionFaker {
    rng: DeterministicRng,
}

impl SubscriptionFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn subscription(&mut self, day: u8) -> Subscription {
        let name = SERVICE_NAMES[self.rng.int_n(SERVICE_NAMES.len())];
        let payment_cents = 99 + self.rng.int_n(2_000) as i64;
        let months = 1 + self.rng.int_n(36) as i64;
        Subscription {
            name: name.to_owned(),
            logo_ref: format!("/{}.svg", name.to_ascii_lowercase()),
            payment_cents,
            total_cents: payment_cents * months,
            active_since: REFERENCE_DATE + Duration::days(30 * months),
            recurrence_label: format!("Every {day:02}th"),
            accent_color: ACCENT_COLORS[self.rng.int_n(ACCENT_COLORS.len())],
        }
    }

    pub fn day(&mut self, day: u8, max_subscriptions: usize) -> DayCell {
        let count = self.rng.int_n(max_subscriptions + 1);
        let subscriptions = (0..count).map(|_| self.subscription(day)).collect();
        let side = match self.rng.int_n(3) {
            0 => DetailPanelSide::Left,
            1 => DetailPanelSide::Right,
            _ => DetailPanelSide::Default,
        };
        DayCell::in_month(day, subscriptions).with_panel_side(side)
    }

    /// Roughly one day in four gets an entry.
    pub fn dataset(&mut self) -> DayDataset {
        let mut cells = Vec::new();
        for day in 1..=31u8 {
            if self.rng.int_n(4) == 0 {
                cells.push(self.day(day, 4));
            }
        }
        DayDataset::from_cells(cells).expect("faker days are distinct")
    }
}
