// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::date;

use crate::model::{DayCell, DayDataset, DetailPanelSide, Rgb, Subscription};
use crate::validation::ValidationResult;

struct DemoSubscription {
    name: &'static str,
    logo: &'static str,
    payment_cents: i64,
    total_cents: i64,
    since: Date,
    every: &'static str,
    color: Rgb,
}

struct DemoDay {
    day: u8,
    side: DetailPanelSide,
    subscriptions: &'static [DemoSubscription],
}

const DEMO_DAYS: [DemoDay; 9] = [
    DemoDay {
        day: 2,
        side: DetailPanelSide::Default,
        subscriptions: &[DemoSubscription {
            name: "Linear",
            logo: "/linear.svg",
            payment_cents: 699,
            total_cents: 8_388,
            since: date!(2022 - 01 - 08),
            every: "Every 02th",
            color: Rgb::new(0x5e, 0x6a, 0xd2),
        }],
    },
    DemoDay {
        day: 7,
        side: DetailPanelSide::Default,
        subscriptions: &[
            DemoSubscription {
                name: "Make",
                logo: "/make.svg",
                payment_cents: 299,
                total_cents: 3_588,
                since: date!(2023 - 01 - 01),
                every: "Every 07th",
                color: Rgb::new(0x6d, 0x0c, 0xcc),
            },
            DemoSubscription {
                name: "AirBnb",
                logo: "/airbnb.svg",
                payment_cents: 393,
                total_cents: 4_716,
                since: date!(2021 - 01 - 01),
                every: "Every 07th",
                color: Rgb::new(0xff, 0x5a, 0x5f),
            },
        ],
    },
    DemoDay {
        day: 11,
        side: DetailPanelSide::Right,
        subscriptions: &[DemoSubscription {
            name: "Supabase",
            logo: "/supabase.svg",
            payment_cents: 799,
            total_cents: 9_588,
            since: date!(2023 - 01 - 01),
            every: "Every 17th",
            color: Rgb::new(0x3e, 0xcf, 0x8e),
        }],
    },
    DemoDay {
        day: 12,
        side: DetailPanelSide::Right,
        subscriptions: &[
            DemoSubscription {
                name: "JetBrains",
                logo: "/jetbrains.svg",
                payment_cents: 599,
                total_cents: 7_188,
                since: date!(2023 - 05 - 03),
                every: "Every 12th",
                color: Rgb::new(0xff, 0xff, 0xff),
            },
            DemoSubscription {
                name: "Discord",
                logo: "/discord.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 12th",
                color: Rgb::new(0x58, 0x65, 0xf2),
            },
            DemoSubscription {
                name: "Invision",
                logo: "/invision.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 12th",
                color: Rgb::new(0xff, 0x33, 0x66),
            },
            DemoSubscription {
                name: "Miro",
                logo: "/miro.svg",
                payment_cents: 499,
                total_cents: 5_988,
                since: date!(2023 - 01 - 01),
                every: "Every 12th",
                color: Rgb::new(0xfe, 0xd0, 0x2f),
            },
            DemoSubscription {
                name: "Tripadvirsor",
                logo: "/tripadvisor.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 12th",
                color: Rgb::new(0x00, 0xb2, 0xa9),
            },
            DemoSubscription {
                name: "Basecamp",
                logo: "/basecamp.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 12th",
                color: Rgb::new(0xf9, 0xd8, 0x3d),
            },
            DemoSubscription {
                name: "Sketch",
                logo: "/sketch.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 12th",
                color: Rgb::new(0xf7, 0xf7, 0xf7),
            },
        ],
    },
    DemoDay {
        day: 15,
        side: DetailPanelSide::Default,
        subscriptions: &[
            DemoSubscription {
                name: "Spotify",
                logo: "/spotify.svg",
                payment_cents: 299,
                total_cents: 3_588,
                since: date!(2023 - 01 - 01),
                every: "Every 15th",
                color: Rgb::new(0x1d, 0xb9, 0x54),
            },
            DemoSubscription {
                name: "Webflow",
                logo: "/webflow.svg",
                payment_cents: 1_299,
                total_cents: 15_588,
                since: date!(2023 - 01 - 01),
                every: "Every 15th",
                color: Rgb::new(0x43, 0x53, 0xff),
            },
            DemoSubscription {
                name: "Adobe",
                logo: "/adobe.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 15th",
                color: Rgb::new(0xff, 0x00, 0x00),
            },
        ],
    },
    DemoDay {
        day: 24,
        side: DetailPanelSide::Right,
        subscriptions: &[DemoSubscription {
            name: "LinkedIn",
            logo: "/linkedin.svg",
            payment_cents: 899,
            total_cents: 10_788,
            since: date!(2022 - 11 - 01),
            every: "Every 24th",
            color: Rgb::new(0x00, 0x77, 0xb5),
        }],
    },
    DemoDay {
        day: 27,
        side: DetailPanelSide::Left,
        subscriptions: &[DemoSubscription {
            name: "Netflix",
            logo: "/netflix.svg",
            payment_cents: 433,
            total_cents: 5_200,
            since: date!(2021 - 01 - 01),
            every: "Every 07th",
            color: Rgb::new(0xe5, 0x09, 0x14),
        }],
    },
    DemoDay {
        day: 30,
        side: DetailPanelSide::Default,
        subscriptions: &[
            DemoSubscription {
                name: "Amazon",
                logo: "/amazon.svg",
                payment_cents: 345,
                total_cents: 4_140,
                since: date!(2023 - 01 - 01),
                every: "Every 30th",
                color: Rgb::new(0xff, 0x99, 0x00),
            },
            DemoSubscription {
                name: "Godaddy",
                logo: "/godaddy.svg",
                payment_cents: 399,
                total_cents: 4_788,
                since: date!(2023 - 01 - 01),
                every: "Every 30th",
                color: Rgb::new(0xff, 0x69, 0xb4),
            },
        ],
    },
    // In the table but never charged.
    DemoDay {
        day: 9,
        side: DetailPanelSide::Default,
        subscriptions: &[],
    },
];

impl DemoSubscription {
    fn to_subscription(&self) -> Subscription {
        Subscription {
            name: self.name.to_owned(),
            logo_ref: self.logo.to_owned(),
            payment_cents: self.payment_cents,
            total_cents: self.total_cents,
            active_since: self.since,
            recurrence_label: self.every.to_owned(),
            accent_color: self.color,
        }
    }
}

/// The fixed subscription table shown when no dataset file is configured.
pub fn demo_dataset() -> ValidationResult<DayDataset> {
    DayDataset::from_cells(DEMO_DAYS.iter().map(|demo| {
        DayCell::in_month(
            demo.day,
            demo.subscriptions
                .iter()
                .map(DemoSubscription::to_subscription)
                .collect(),
        )
        .with_panel_side(demo.side)
    }))
}
