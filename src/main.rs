use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;

use nuget_status::config::AppConfig;
use nuget_status::parser::{ProjectFileParser, scan_directory};
use nuget_status::report::progress::{ProgressBar, drain};
use nuget_status::report::{build_report, distinct_package_names, render_table};
use nuget_status::version::progress;
use nuget_status::version::registries::NuGetRegistry;

#[derive(Parser)]
#[command(name = "nuget-status")]
#[command(
    version,
    about = "Show available updates for NuGet packages referenced by .NET projects"
)]
struct Cli {
    /// Directory searched recursively for .csproj and .fsproj files
    #[arg(default_value = ".")]
    path: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the registration base URL
    #[arg(long)]
    registry_url: Option<String>,

    /// Override the per-request timeout
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Do not draw the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = nuget_status::logging::init(cli.verbose, cli.log_file.as_deref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(registry_url) = cli.registry_url {
        config.registry.base_url = registry_url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.registry.timeout_ms = timeout_ms;
    }

    let scan = scan_directory(&cli.path, &ProjectFileParser::new());
    for anomaly in &scan.anomalies {
        eprintln!("{}", anomaly.to_string().yellow());
    }

    if scan.packages.is_empty() {
        println!("No packages found in {}", cli.path.display());
        return Ok(());
    }

    let mut registry = NuGetRegistry::from_config(&config.registry)?;
    let progress_task = if cli.quiet {
        None
    } else {
        let total = distinct_package_names(&scan.packages).len();
        let (sender, receiver) = progress::channel();
        registry = registry.with_progress(sender);
        Some(tokio::spawn(drain(
            receiver,
            ProgressBar::new(std::io::stderr(), total),
        )))
    };

    let report = build_report(&registry, &scan.packages).await;

    // Closes the progress channel so the bar can finish its line
    drop(registry);
    if let Some(task) = progress_task {
        task.await??;
    }

    let rows = report?;

    println!();
    print!("{}", render_table(&rows, !cli.no_color));

    Ok(())
}
