use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

mod cli;
mod error_fmt;
mod logging;
mod plan;

use cli::{Cli, Commands, JSON_MODE};
use error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let mut file_guard = None;
    if let Err(err) = run(cli, &mut file_guard) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        tracing::error!(error = %err, "command failed");
        // process::exit skips destructors; flush the log file first
        drop(file_guard);
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli, file_guard: &mut Option<WorkerGuard>) -> eyre::Result<()> {
    color_eyre::install()?;
    let cfg = plan::load_config(cli.config.as_deref())?;
    *file_guard = logging::init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "config loaded");

    match cli.cmd {
        Commands::Plan { strict } => plan::run_plan(&cfg, strict, cli.json),
        Commands::Export { out } => plan::run_export(&cfg, &out, cli.json),
        Commands::Check { file, strict } => plan::run_check(&cfg, &file, strict, cli.json),
        Commands::Catalog => plan::run_catalog(&cfg, cli.json),
    }
}
