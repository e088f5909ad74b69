use anyhow::{Result, bail};
use std::io;
use tracing::info;

use rename::cli::{self, Args};
use rename::config;
use rename::logger;
use rename::renamer;
use rename::Engine;

fn main() -> Result<()> {
    let args = cli::parse_args();
    let report = run(args)?;

    if report.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: Args) -> Result<rename::ApplyReport> {
    let config = config::load_config(args.config.as_deref())?;
    let settings = args.settings(&config)?;

    if let Some(log_path) = logger::init_debug_logging(settings.debug)? {
        eprintln!("Debug log: {}", log_path.display());
    }

    // A broken expression is fatal before any file is looked at
    let engine = Engine::new(&args.expression)?;
    info!(expression = %engine.parsed().to_expression(), "compiled expression");

    let reading_stdin = args.files.is_empty();
    if reading_stdin && settings.interactive && !settings.no_action {
        bail!("--interactive needs file names as arguments, stdin is used for the file list");
    }

    let files = if reading_stdin {
        cli::read_file_list(io::stdin().lock())?
    } else {
        args.files
    };

    let report = renamer::execute(
        &engine,
        &files,
        &settings,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;
    info!(
        renamed = report.renamed,
        copied = report.copied,
        skipped = report.skipped,
        failed = report.failed,
        "batch finished"
    );

    Ok(report)
}
