// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use roster_faker::Locale;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "roster";
pub const CONFIG_PATH_ENV: &str = "ROSTER_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_INITIAL_COMPANIES: usize = 40;
const DEFAULT_MORE_COMPANIES: usize = 20;
const DEFAULT_EMPLOYEES_PER_BATCH: usize = 80;
const DEFAULT_EMPLOYEE_DELAY: &str = "100ms";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    pub locale: Option<Locale>,
    pub seed: Option<u64>,
    pub initial_companies: Option<usize>,
    pub more_companies: Option<usize>,
    pub employees_per_batch: Option<usize>,
    pub employee_delay: Option<String>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            locale: Some(Locale::Ru),
            seed: None,
            initial_companies: Some(DEFAULT_INITIAL_COMPANIES),
            more_companies: Some(DEFAULT_MORE_COMPANIES),
            employees_per_batch: Some(DEFAULT_EMPLOYEES_PER_BATCH),
            employee_delay: Some(DEFAULT_EMPLOYEE_DELAY.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub coalesce_load_more: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            coalesce_load_more: Some(true),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
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
                    "config file {} has no version. Add `version = 1` and keep values under [data], [ui], and [log]",
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
        let sizes = [
            ("data.initial_companies", self.data.initial_companies),
            ("data.more_companies", self.data.more_companies),
            ("data.employees_per_batch", self.data.employees_per_batch),
        ];
        for (key, value) in sizes {
            if value == Some(0) {
                bail!("{key} in {} must be positive, got 0", path.display());
            }
        }

        if let Some(delay) = &self.data.employee_delay {
            parse_duration(delay).with_context(|| {
                format!("data.employee_delay in {} is invalid", path.display())
            })?;
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter -- use a level like \"info\" or \"roster_tui=debug\"",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn locale(&self) -> Locale {
        self.data.locale.unwrap_or_default()
    }

    pub fn seed(&self) -> Option<u64> {
        self.data.seed
    }

    pub fn initial_companies(&self) -> usize {
        self.data
            .initial_companies
            .unwrap_or(DEFAULT_INITIAL_COMPANIES)
    }

    pub fn more_companies(&self) -> usize {
        self.data.more_companies.unwrap_or(DEFAULT_MORE_COMPANIES)
    }

    pub fn employees_per_batch(&self) -> usize {
        self.data
            .employees_per_batch
            .unwrap_or(DEFAULT_EMPLOYEES_PER_BATCH)
    }

    pub fn employee_delay(&self) -> Result<Duration> {
        parse_duration(
            self.data
                .employee_delay
                .as_deref()
                .unwrap_or(DEFAULT_EMPLOYEE_DELAY),
        )
    }

    pub fn coalesce_load_more(&self) -> bool {
        self.ui.coalesce_load_more.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_log_path(),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# roster config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# ru or en\nlocale = \"ru\"\n# Optional. Omit for different data on every run\n# seed = 42\ninitial_companies = {}\nmore_companies = {}\nemployees_per_batch = {}\nemployee_delay = \"{}\"\n\n[ui]\ncoalesce_load_more = true\n\n[log]\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/roster/roster.log)\n# file = \"/absolute/path/to/roster.log\"\n",
            path.display(),
            DEFAULT_INITIAL_COMPANIES,
            DEFAULT_MORE_COMPANIES,
            DEFAULT_EMPLOYEES_PER_BATCH,
            DEFAULT_EMPLOYEE_DELAY,
            DEFAULT_LOG_LEVEL,
        )
    }
}

pub fn default_log_path() -> Result<PathBuf> {
    let data_root = dirs::data_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [log].file to an absolute log path")
    })?;
    Ok(data_root.join(APP_NAME).join("roster.log"))
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 100ms or 1s)")
}
