// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;

use anyhow::{Context, Result};
use config::Config;
use drilldown_bootstrap::Client;
use drilldown_tui::SelectPanels;
use std::env;
use std::path::PathBuf;

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
            "load config {}; run `drilldown --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let client = Client::new(
        config.endpoint().with_context(|| {
            format!(
                "resolve bootstrap endpoint from {}; set [api].url or [api].base_url",
                options.config_path.display()
            )
        })?,
        config.headers(),
        config.with_credentials(),
        config.timeout()?,
    )
    .with_context(|| format!("invalid [api] config in {}", options.config_path.display()))?;

    if options.check_only {
        return Ok(());
    }

    let ids = config.select_ids();
    let mut panels = SelectPanels::new(&ids);
    let (chain, snapshot) =
        drilldown_bootstrap::init(&client, &mut panels, ids, config.initial_override())
            .with_context(|| format!("bootstrap fetch from {}", client.url()))?;

    drilldown_tui::run_app(chain, panels, snapshot.fetched_at)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
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
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("drilldown");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + client construction, no fetch");
    println!("  --help                   Show this help");
}
