// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::model::{ColorStop, DayCell, Fill, color_stops};

/// Angular spacing inserted after every segment.
pub const GAP_ANGLE_DEG: f64 = 15.0;
pub const FULL_CIRCLE_DEG: f64 = 360.0;
/// Share of the circle the gaps may take once fixed gaps no longer fit.
const MAX_GAP_SHARE: f64 = 0.5;

/// Rotation that puts 0° at twelve o'clock.
const TOP_OFFSET_DEG: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Circle the segments are laid out on, in view-box units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutGeometry {
    pub center: Point,
    pub radius: f64,
    pub label_radius: f64,
}

impl Default for DonutGeometry {
    fn default() -> Self {
        Self {
            center: Point { x: 200.0, y: 200.0 },
            radius: 150.0,
            label_radius: 220.0,
        }
    }
}

impl DonutGeometry {
    /// Point at `angle_deg` on a circle of `radius`, 0° at the top and
    /// increasing clockwise (screen coordinates, y down).
    pub fn point_at(&self, angle_deg: f64, radius: f64) -> Point {
        let radians = (angle_deg + TOP_OFFSET_DEG).to_radians();
        Point {
            x: self.center.x + radius * radians.cos(),
            y: self.center.y + radius * radians.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcPath {
    pub start: Point,
    pub end: Point,
    pub radius: f64,
    pub large_arc: bool,
}

impl ArcPath {
    pub fn svg_path(&self) -> String {
        format!(
            "M {} {} A {} {} 0 {} 1 {} {}",
            self.start.x,
            self.start.y,
            self.radius,
            self.radius,
            u8::from(self.large_arc),
            self.end.x,
            self.end.y,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSegment {
    pub start_angle_deg: f64,
    pub sweep_angle_deg: f64,
    pub payment_cents: i64,
    pub color_stops: Vec<ColorStop>,
    pub fill: Fill,
    pub arc: ArcPath,
    pub label_anchor: Point,
    pub source_day: DayCell,
}

impl DonutSegment {
    pub fn end_angle_deg(&self) -> f64 {
        self.start_angle_deg + self.sweep_angle_deg
    }

    pub fn mid_angle_deg(&self) -> f64 {
        self.start_angle_deg + self.sweep_angle_deg / 2.0
    }

    /// Whether `angle_deg` (normalized to `[0, 360)`) lies inside the sweep.
    pub fn contains_angle(&self, angle_deg: f64) -> bool {
        let angle = angle_deg.rem_euclid(FULL_CIRCLE_DEG);
        angle >= self.start_angle_deg && angle < self.end_angle_deg()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutLayout {
    pub segments: Vec<DonutSegment>,
    pub total_payment_cents: i64,
    pub gap_angle_deg: f64,
    pub available_angle_deg: f64,
}

impl DonutLayout {
    fn empty() -> Self {
        Self {
            segments: Vec::new(),
            total_payment_cents: 0,
            gap_angle_deg: GAP_ANGLE_DEG,
            available_angle_deg: FULL_CIRCLE_DEG,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segment_at_angle(&self, angle_deg: f64) -> Option<usize> {
        self.segments
            .iter()
            .position(|segment| segment.contains_angle(angle_deg))
    }
}

pub fn layout_donut<'a, I>(days: I) -> DonutLayout
where
    I: IntoIterator<Item = &'a DayCell>,
{
    layout_donut_with(days, DonutGeometry::default())
}

pub fn layout_donut_with<'a, I>(days: I, geometry: DonutGeometry) -> DonutLayout
where
    I: IntoIterator<Item = &'a DayCell>,
{
    let charged = days
        .into_iter()
        .filter(|day| day.has_subscriptions())
        .collect::<Vec<_>>();

    let total_payment_cents = charged
        .iter()
        .map(|day| day.total_payment_cents())
        .fold(0, i64::saturating_add);
    if charged.is_empty() || total_payment_cents <= 0 {
        return DonutLayout::empty();
    }

    let gap_angle_deg = gap_angle_for(charged.len());
    let available_angle_deg = FULL_CIRCLE_DEG - gap_angle_deg * charged.len() as f64;
    // Proportions come from the per-day sums so a saturated total still
    // tiles the circle.
    let total = charged
        .iter()
        .map(|day| day.total_payment_cents() as f64)
        .sum::<f64>();

    let mut cumulative = 0.0;
    let mut segments = Vec::with_capacity(charged.len());
    for day in charged {
        let payment_cents = day.total_payment_cents();
        let sweep = payment_cents as f64 / total * available_angle_deg;
        let start = cumulative;
        let colors = day.accent_colors();

        segments.push(DonutSegment {
            start_angle_deg: start,
            sweep_angle_deg: sweep,
            payment_cents,
            color_stops: color_stops(&colors),
            fill: Fill::from_colors(&colors),
            arc: ArcPath {
                start: geometry.point_at(start, geometry.radius),
                end: geometry.point_at(start + sweep, geometry.radius),
                radius: geometry.radius,
                large_arc: sweep > 180.0,
            },
            label_anchor: geometry.point_at(start + sweep / 2.0, geometry.label_radius),
            source_day: day.clone(),
        });

        cumulative += sweep + gap_angle_deg;
    }

    DonutLayout {
        segments,
        total_payment_cents,
        gap_angle_deg,
        available_angle_deg,
    }
}

/// The fixed gap, unless `segments` of them would leave no arc at all
/// (24 or more days). Then the gaps split half the circle between them.
pub fn gap_angle_for(segments: usize) -> f64 {
    if segments == 0 {
        return GAP_ANGLE_DEG;
    }
    let count = segments as f64;
    if GAP_ANGLE_DEG * count < FULL_CIRCLE_DEG {
        GAP_ANGLE_DEG
    } else {
        FULL_CIRCLE_DEG * MAX_GAP_SHARE / count
    }
}
