// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod calendar;
pub mod demo;
pub mod donut;
pub mod model;
pub mod state;
pub mod validation;

pub use calendar::*;
pub use demo::demo_dataset;
pub use donut::*;
pub use model::*;
pub use state::*;
