//! Annoview CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use annoview_cli::{Args, error_adapter::to_reportables};

fn report(err: &annoview::AnnoviewError) {
    let reporter = miette::GraphicalReportHandler::new();

    // Render each diagnostic independently
    for reportable in to_reportables(err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Annoview");
    debug!(args:?; "Parsed arguments");

    let run_report = match annoview_cli::run(&args) {
        Ok(run_report) => run_report,
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    };

    for (view, err) in &run_report.failures {
        error!(view:?; "View failed to render");
        report(err);
    }

    if !run_report.is_success() {
        process::exit(1);
    }

    info!(files = run_report.written.len(); "Completed successfully");
}
