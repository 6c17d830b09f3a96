// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use subcal_app::ViewKind;
use subcal_app::validation::DEFAULT_CURRENCY_SYMBOL;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "subcal";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_CURRENCY_SYMBOL_CHARS: usize = 4;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            data: Data::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_view: Option<String>,
    pub currency_symbol: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_view: Some(ViewKind::Grid.label().to_owned()),
            currency_symbol: Some(DEFAULT_CURRENCY_SYMBOL.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub dataset_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SUBCAL_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SUBCAL_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [ui], [data], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(view) = &self.ui.start_view
            && ViewKind::parse(view).is_none()
        {
            bail!(
                "ui.start_view in {} must be \"grid\" or \"donut\", got {:?}",
                path.display(),
                view
            );
        }

        if let Some(symbol) = &self.ui.currency_symbol {
            let chars = symbol.chars().count();
            if chars == 0 || chars > MAX_CURRENCY_SYMBOL_CHARS {
                bail!(
                    "ui.currency_symbol in {} must be 1 to {} characters, got {:?}",
                    path.display(),
                    MAX_CURRENCY_SYMBOL_CHARS,
                    symbol
                );
            }
        }

        if let Some(dataset_path) = &self.data.dataset_path
            && dataset_path.trim().is_empty()
        {
            bail!(
                "data.dataset_path in {} must not be empty; remove it to use the demo dataset",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter: {:?}",
                    path.display(),
                    level
                )
            })?;
        }

        Ok(())
    }

    pub fn start_view(&self) -> ViewKind {
        self.ui
            .start_view
            .as_deref()
            .and_then(ViewKind::parse)
            .unwrap_or(ViewKind::Grid)
    }

    pub fn currency_symbol(&self) -> &str {
        self.ui
            .currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    /// `[data].dataset_path`, then `SUBCAL_DATASET_PATH`. `None` means demo data.
    pub fn dataset_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.data.dataset_path {
            return Some(PathBuf::from(path));
        }
        env::var_os("SUBCAL_DATASET_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let root = dirs::cache_dir().unwrap_or_else(env::temp_dir);
        Ok(root.join(APP_NAME).join(format!("{APP_NAME}.log")))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# subcal config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# grid or donut\nstart_view = \"grid\"\ncurrency_symbol = \"{}\"\n\n[data]\n# Optional. Without it (and without SUBCAL_DATASET_PATH) the demo dataset is shown.\n# dataset_path = \"/absolute/path/to/subscriptions.toml\"\n\n[log]\n# tracing filter directive; SUBCAL_LOG overrides it\nlevel = \"{}\"\n# path = \"/absolute/path/to/subcal.log\"\n",
            path.display(),
            DEFAULT_CURRENCY_SYMBOL,
            DEFAULT_LOG_LEVEL,
        )
    }
}
