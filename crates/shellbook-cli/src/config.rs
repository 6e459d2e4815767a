// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use shellbook_tui::{AppOptions, LayoutConfig, ScreenOptions};
use simplelog::LevelFilter;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const MAX_LEFT_WIDTH: u16 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
    pub history_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub left_width: Option<u16>,
    pub top_right_height_percent: Option<u16>,
    pub min_pane_size: Option<u16>,
    pub resize_step: Option<u16>,
    pub relevance_order: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some("info".to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SHELLBOOK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set SHELLBOOK_CONFIG_PATH to the config file"
            )
        })?;

        let app_dir = config_root.join(shellbook_db::APP_NAME);
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
                    "config file {} has no version; add `version = 1` and put values under [storage], [ui], and [log]",
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
        if let Some(db_path) = &self.storage.db_path {
            shellbook_db::validate_db_path(db_path)?;
        }

        if let Some(history_path) = &self.storage.history_path
            && history_path.trim().is_empty()
        {
            bail!(
                "storage.history_path in {} must not be empty; remove it to use ~/.bash_history",
                path.display()
            );
        }

        if let Some(percent) = self.ui.top_right_height_percent
            && !(10..=90).contains(&percent)
        {
            bail!(
                "ui.top_right_height_percent in {} must be between 10 and 90, got {}",
                path.display(),
                percent
            );
        }

        if let Some(width) = self.ui.left_width
            && width > MAX_LEFT_WIDTH
        {
            bail!(
                "ui.left_width in {} must be at most {}, got {}",
                path.display(),
                MAX_LEFT_WIDTH,
                width
            );
        }

        for (field, value) in [
            ("ui.min_pane_size", self.ui.min_pane_size),
            ("ui.resize_step", self.ui.resize_step),
        ] {
            if value == Some(0) {
                bail!("{field} in {} must be positive, got 0", path.display());
            }
        }

        if let Some(level) = &self.log.level {
            parse_level(level).with_context(|| format!("invalid log.level in {}", path.display()))?;
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => shellbook_db::default_db_path(),
        }
    }

    pub fn history_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.history_path {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or_else(|| {
            anyhow!("cannot resolve home directory; set [storage].history_path")
        })?;
        Ok(home.join(".bash_history"))
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        parse_level(self.log.level.as_deref().unwrap_or("info"))
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(shellbook_db::data_dir()?.join("shellbook.log")),
        }
    }

    pub fn app_options(&self) -> AppOptions {
        let defaults = LayoutConfig::default();
        AppOptions {
            layout: LayoutConfig {
                left_width: self.ui.left_width.unwrap_or(defaults.left_width),
                top_right_height_percent: self
                    .ui
                    .top_right_height_percent
                    .unwrap_or(defaults.top_right_height_percent),
                min_pane_size: self.ui.min_pane_size.unwrap_or(defaults.min_pane_size),
                resize_step: self.ui.resize_step.unwrap_or(defaults.resize_step),
            },
            screens: ScreenOptions {
                relevance_order: self.ui.relevance_order.unwrap_or(true),
            },
        }
    }

    pub fn example_config(path: &Path) -> String {
        let layout = LayoutConfig::default();
        format!(
            "# shellbook config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/shellbook/shellbook.db)\n# db_path = \"/absolute/path/to/shellbook.db\"\n# history_path = \"~/.bash_history\"\n\n[ui]\nleft_width = {}\ntop_right_height_percent = {}\nmin_pane_size = {}\nresize_step = {}\nrelevance_order = true\n\n[log]\n# off, error, warn, info, debug or trace\nlevel = \"info\"\n# file = \"/absolute/path/to/shellbook.log\"\n",
            path.display(),
            layout.left_width,
            layout.top_right_height_percent,
            layout.min_pane_size,
            layout.resize_step,
        )
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter> {
    let level = match raw.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => bail!("unknown log level {raw:?}; use one of: off, error, warn, info, debug, trace"),
    };
    Ok(level)
}
