// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod dataset;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::{DatasetRuntime, DatasetSource};
use std::env;
use std::path::PathBuf;
use subcal_app::{
    DayDataset, ViewCommand, ViewKind, ViewState, YearMonth, build_grid, layout_donut,
};
use subcal_tui::UiOptions;

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
            "load config {}; run `subcal --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let source = dataset_source(&options, &config);
    let mut runtime = DatasetRuntime::new(source.clone());
    let active_month = options.month.unwrap_or_else(YearMonth::current);

    if let Some(target) = options.dump {
        let dataset = runtime.load()?;
        println!("{}", dump_json(target, active_month, &dataset)?);
        return Ok(());
    }

    if options.check_only {
        runtime.load().with_context(|| {
            format!(
                "check dataset {} -- set [data].dataset_path, SUBCAL_DATASET_PATH or --dataset",
                source.describe()
            )
        })?;
        return Ok(());
    }

    let log_path = logging::init(&config)?;
    tracing::info!(
        config = %options.config_path.display(),
        log = %log_path.display(),
        dataset = %source.describe(),
        month = %active_month,
        "starting subcal"
    );

    let mut state = ViewState::new(active_month);
    if config.start_view() == ViewKind::Donut {
        state.dispatch(ViewCommand::ToggleView);
    }

    let ui_options = UiOptions {
        currency_symbol: config.currency_symbol().to_owned(),
    };
    subcal_tui::run_app(&mut state, &mut runtime, &ui_options)
}

fn dataset_source(options: &CliOptions, config: &Config) -> DatasetSource {
    if options.demo {
        return DatasetSource::Demo;
    }
    options
        .dataset_path
        .clone()
        .or_else(|| config.dataset_path())
        .map_or(DatasetSource::Demo, DatasetSource::File)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DumpTarget {
    Grid,
    Donut,
}

impl DumpTarget {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "grid" => Ok(Self::Grid),
            "donut" => Ok(Self::Donut),
            other => Err(anyhow!("--dump expects grid or donut, got {other:?}")),
        }
    }
}

fn dump_json(target: DumpTarget, month: YearMonth, dataset: &DayDataset) -> Result<String> {
    let json = match target {
        DumpTarget::Grid => serde_json::to_string_pretty(&build_grid(month, dataset)),
        DumpTarget::Donut => serde_json::to_string_pretty(&layout_donut(dataset.days())),
    };
    json.context("serialize dump")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    dataset_path: Option<PathBuf>,
    month: Option<YearMonth>,
    dump: Option<DumpTarget>,
    print_config_path: bool,
    demo: bool,
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
        dataset_path: None,
        month: None,
        dump: None,
        print_config_path: false,
        demo: false,
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
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--dataset" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--dataset requires a file path"))?;
                options.dataset_path = Some(PathBuf::from(value.as_ref()));
            }
            "--month" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--month requires a YYYY-MM value"))?;
                let month = YearMonth::parse(value.as_ref())
                    .with_context(|| format!("--month {:?}", value.as_ref()))?;
                options.month = Some(month);
            }
            "--dump" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--dump requires grid or donut"))?;
                options.dump = Some(DumpTarget::parse(value.as_ref())?);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
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
    println!("subcal");
    println!("  --config <path>          Use a specific config path");
    println!("  --dataset <path>         Load subscriptions from a TOML dataset file");
    println!("  --month <YYYY-MM>        Open the calendar on this month");
    println!("  --demo                   Use the built-in demo dataset");
    println!("  --dump <grid|donut>      Print the month grid or donut layout as JSON");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config + dataset and exit");
    println!("  --help                   Show this help");
}
