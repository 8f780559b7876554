// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILTER_ENV: &str = "ROSTER_LOG";

static INIT: OnceLock<()> = OnceLock::new();

/// Installs a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr. Later calls are no-ops.
pub fn init(level: &str, path: &Path) -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let filter = filter_directive(level, env::var(LOG_FILTER_ENV).ok());
    let env_filter = EnvFilter::try_new(&filter).with_context(|| {
        format!("invalid log filter {filter:?} -- fix [log].level or {LOG_FILTER_ENV} and retry")
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {} -- set [log].file to a writable path",
                path.display()
            )
        })?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("install tracing subscriber")?;

    let _ = INIT.set(());
    Ok(())
}

fn filter_directive(level: &str, env_override: Option<String>) -> String {
    env_override
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| level.to_owned())
}
