// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{LevelFilter, info, warn};
use simple_logger::SimpleLogger;

use zaws::aws::AwsCloud;
use zaws::cli::Args;
use zaws::config::Config;
use zaws::zabbix::ZabbixSender;
use zaws::{Mode, Output, Pipeline};

fn init_logging(level: LevelFilter) -> Result<()> {
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("failed to initialize logger")
}

#[allow(clippy::print_stdout)]
async fn run(mode: Mode, config: &Config) -> Result<()> {
    let cloud = AwsCloud::connect(config).await;
    let sender = ZabbixSender::from_config(config);
    let pipeline = Pipeline::new(&cloud).with_metric_filter(config.metric_name.as_deref());

    match pipeline.run(mode, config, &sender).await? {
        Output::Document(json) => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
        Output::Delivered(ack) => {
            match ack.summary() {
                Some(summary) if summary.failed > 0 => {
                    warn!("{} rejected part of the batch: {summary}", sender.addr())
                }
                Some(summary) => info!("{} accepted the batch: {summary}", sender.addr()),
                None => info!("{} acknowledged: {}", sender.addr(), ack.info),
            }
            println!("[INFO]: Successful sending data to Zabbix: {}", ack.info);
        }
    }
    Ok(())
}

#[allow(clippy::print_stderr)]
fn usage_error(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("[ERROR]: {message}");
    eprintln!("{}", Args::command().render_usage());
    ExitCode::FAILURE
}

#[allow(clippy::print_stderr)]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let mode = args.command.mode();

    let config = match Config::resolve(args.options) {
        Ok(config) => config,
        Err(err) => return usage_error(err),
    };
    if !matches!(mode, Mode::ListEntities(_))
        && let Err(err) = config.require_target()
    {
        return usage_error(err);
    }

    if let Err(err) = init_logging(config.log_level) {
        eprintln!("[ERROR]: {err:#}");
        return ExitCode::FAILURE;
    }
    info!("zaws {} running {mode:?}", env!("CARGO_PKG_VERSION"));

    match run(mode, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR]: {err:#}");
            ExitCode::FAILURE
        }
    }
}
