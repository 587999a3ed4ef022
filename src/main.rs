use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use testgap::cli::{setup, Cli};
use testgap::commands::{self, fix};
use testgap::config::{self, TestgapConfig};
use testgap::io::load_sources;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup::init_logging(cli.debug);

    let config = resolve_config(&cli)?;
    let sources = load_sources(&cli.files, &config.ignore);
    let report = commands::analyze_sources(&sources, &config);

    let origins: Vec<String> = cli.files.iter().map(|p| p.display().to_string()).collect();
    let debug = cli.debug > 0;

    if cli.eval {
        print(&fix::header(&origins, debug))?;
        print(&report.coverage)?;
        let status = commands::eval(&sources, &report.stubs).context("Failed to run generated code")?;
        return Ok(exit_code(status));
    }

    print(&commands::render(&report, &origins, debug))?;
    Ok(ExitCode::SUCCESS)
}

// Explicit config file wins over discovery; flags override either.
fn resolve_config(cli: &Cli) -> Result<TestgapConfig> {
    let config = match &cli.config {
        Some(path) => config::load_from_path(path)
            .with_context(|| format!("Invalid configuration {}", path.display()))?,
        None => config::load_config(),
    };
    Ok(config.with_overrides(cli.reverse, cli.full))
}

fn print(text: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn exit_code(status: i32) -> ExitCode {
    u8::try_from(status).map(ExitCode::from).unwrap_or(ExitCode::FAILURE)
}
