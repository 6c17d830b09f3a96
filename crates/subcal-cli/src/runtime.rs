// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::dataset::load_dataset_file;
use anyhow::{Context, Result};
use std::path::PathBuf;
use subcal_app::DayDataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Demo,
    File(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Demo => "demo dataset".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Feeds the UI from the demo table or a dataset file. Files are re-read on
/// every load so edits show up on reload.
pub struct DatasetRuntime {
    source: DatasetSource,
}

impl DatasetRuntime {
    pub fn new(source: DatasetSource) -> Self {
        Self { source }
    }

    pub fn load(&self) -> Result<DayDataset> {
        let dataset = match &self.source {
            DatasetSource::Demo => subcal_app::demo_dataset().context("build demo dataset")?,
            DatasetSource::File(path) => load_dataset_file(path)?,
        };
        tracing::debug!(
            source = %self.source.describe(),
            days = dataset.len(),
            subscriptions = dataset.subscription_count(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

impl subcal_tui::AppRuntime for DatasetRuntime {
    fn load_dataset(&mut self) -> Result<DayDataset> {
        self.load()
    }
}
