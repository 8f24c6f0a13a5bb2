// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! commits2pdf: render a repository's commit history as a PDF report
//!
//! Validates the command line, then hands the plan to
//! [`commits2pdf::report::generate`].

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use commits2pdf::config::Config;
use commits2pdf::report::{self, ReportOutcome};
use tracing::{error, info};

fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    let plan = config.validate().context("Invalid arguments")?;
    let outcome = report::generate(&plan).context("Could not generate the commit report")?;

    match outcome {
        ReportOutcome::Listed { commits } => info!(commits, "Listed commits"),
        ReportOutcome::Written {
            commits,
            pages,
            path,
        } => info!(
            commits,
            pages,
            "PDF successfully generated: {}",
            path.display()
        ),
    }
    Ok(())
}
