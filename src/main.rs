//! # runeline Entry Point
//!
//! Loads settings, wires the terminal to the line editor and runs the shell.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;

use runeline::cmd_args::CommandLineArgs;
use runeline::config::{self, Settings};
use runeline::repl::models::History;
use runeline::{LineEditor, Shell, SystemShellEvaluator, TerminalRenderer, TerminalRuneSource};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    init_tracing_subscriber(&args)?;

    let config_path = args
        .config()
        .map(str::to_string)
        .unwrap_or_else(config::get_config_path);
    let mut settings = Settings::load(&config_path)?;
    settings.apply_args(&args);
    tracing::debug!("settings from '{}': {:?}", config_path, settings);

    let history = match History::load(settings.history_path()) {
        Ok(history) => history,
        Err(err) => {
            tracing::warn!("starting with empty history: {:#}", err);
            History::new()
        }
    };

    let editor = LineEditor::new(TerminalRuneSource::new(), settings.editor_options())
        .with_history(history);
    let evaluator =
        SystemShellEvaluator::new(settings.shell_program.clone(), settings.aliases.clone());
    let renderer = TerminalRenderer::stdout()?;

    let mut shell = Shell::new(editor, renderer, evaluator)
        .with_history_file(settings.history_file.clone(), settings.history_size);
    shell.run()
}

/// Log to `--log-file` when given; the terminal is in raw mode otherwise
fn init_tracing_subscriber(args: &CommandLineArgs) -> Result<()> {
    let Some(log_file) = args.log_file() else {
        return Ok(());
    };

    let filter = match args.log_level() {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level: {level}"))?,
        None => EnvFilter::try_from_env(format!(
            "{}_LOG_LEVEL",
            env!("CARGO_PKG_NAME").to_uppercase()
        ))
        .unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let path = shellexpand::tilde(log_file).into_owned();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
