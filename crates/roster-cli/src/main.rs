// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use roster_app::Store;
use runtime::FakerRuntime;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `roster --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let log_path = config.log_file()?;
    logging::init(config.log_level(), &log_path)?;
    info!(
        config = %options.config_path.display(),
        log = %log_path.display(),
        locale = config.locale().as_str(),
        "starting roster"
    );

    let mut runtime = FakerRuntime::from_config(&config, options.seed)?;
    if options.check_only {
        return Ok(());
    }

    if options.dump {
        let dataset = runtime.dump()?;
        let json = serde_json::to_string_pretty(&dataset).context("encode dataset as JSON")?;
        println!("{json}");
        return Ok(());
    }

    let mut store = Store::new();
    let result = roster_tui::run_app(&mut store, &mut runtime);
    if let Err(error) = &result {
        error!(error = %format!("{error:#}"), "ui exited with an error");
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    seed: Option<u64>,
    dump: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        seed: None,
        dump: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires an unsigned integer"))?;
                let seed = value.as_ref().parse::<u64>().with_context(|| {
                    format!(
                        "--seed expects an unsigned integer, got {:?}",
                        value.as_ref()
                    )
                })?;
                options.seed = Some(seed);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--dump" => {
                options.dump = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("roster");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --seed <n>               Generate reproducible data from seed n");
    println!("  --dump                   Print the startup dataset as JSON and exit");
    println!("  --check                  Validate config + logging setup and exit");
    println!("  --help                   Show this help");
}
