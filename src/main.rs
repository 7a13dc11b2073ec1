//! Wallboards command-line planner

use std::{io, process::ExitCode};

use clap::Parser;
use tracing::{error, info};

use wallboards::{
    config::WallConfig,
    plan::{PlanError, Planner},
    report::Report,
};

use crate::cli::Cli;

mod cli;
mod logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(init_error) = logging::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        return ExitCode::FAILURE;
    }

    info!(config = %cli.config.display(), "loading wall configuration");

    let config = match WallConfig::load(&cli.config) {
        Ok(config) => config,
        Err(config_error) => {
            error!("configuration error: {config_error}");

            return ExitCode::from(1);
        }
    };

    let planner = match Planner::new(&config) {
        Ok(planner) => planner,
        Err(config_error) => {
            error!("configuration error: {config_error}");

            return ExitCode::from(1);
        }
    };

    let planner = match cli.courses {
        Some(courses) => planner.with_courses(courses),
        None => planner,
    };

    let report = Report::new(&config);
    let stdout = io::stdout();
    let handle = stdout.lock();

    match planner.run() {
        Ok(plan) => {
            if let Err(report_error) = report.write_plan(&plan, handle) {
                error!("failed to write report: {report_error}");

                return ExitCode::FAILURE;
            }

            ExitCode::SUCCESS
        }
        Err(PlanError::Allocation(failure)) => {
            error!("{failure}");

            if let Err(report_error) = report.write_failure(&failure, handle) {
                error!("failed to write report: {report_error}");
            }

            ExitCode::from(2)
        }
        Err(PlanError::Config(config_error)) => {
            error!("configuration error: {config_error}");

            ExitCode::from(1)
        }
    }
}
