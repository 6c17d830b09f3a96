// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SUBCAL_LOG";

/// Installs the global subscriber. The terminal belongs to the UI, so events
/// go to a file. Returns the log file path.
pub fn init(config: &Config) -> Result<PathBuf> {
    let path = config.log_path()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let env_value = env::var(LOG_ENV).ok();
    let directive = log_directive(env_value.as_deref(), config.log_level());
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter {directive:?}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(path)
}

fn log_directive<'a>(env_value: Option<&'a str>, configured: &'a str) -> &'a str {
    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => configured,
    }
}
