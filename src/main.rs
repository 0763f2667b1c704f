use anyhow::Context;
use clap::Parser;
use perfplot_core::config::Config;
use perfplot_core::export::{export_to_path, ExportFormat};
use perfplot_core::pipeline::Pipeline;
use perfplot_core::render::{PlotSpecRenderer, RenderConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "perfplot", about = "Turn CPU/Memory/Disk usage logs into chart plans")]
struct Cli {
    /// Tab-delimited resource-usage log.
    #[arg(default_value = "./cpu.csv")]
    log: PathBuf,

    /// Directory for plot artifacts (overrides the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the normalized comma-delimited log to this path.
    #[arg(long)]
    normalized_out: Option<PathBuf>,

    /// Write the typed timeseries to this path.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export format (csv or jsonl). Inferred from the --export extension
    /// when omitted.
    #[arg(long, requires = "export")]
    format: Option<ExportFormat>,

    /// Also plan the single-axes overlay of all three metrics.
    #[arg(long)]
    overlay: bool,

    /// Config file layered over the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the built-in defaults only; never touch ~/.config/perfplot.
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Debug-level logging (overrides RUST_LOG).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config = match (&cli.config, cli.no_config) {
        (Some(path), _) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, true) => Config::defaults(),
        (None, false) => Config::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to built-in config");
            Config::defaults()
        }),
    };
    if cli.overlay {
        config.render.overlay = true;
    }

    let mut render = RenderConfig::from_config(&config);
    if let Some(dir) = &cli.output_dir {
        render = render.with_output_dir(dir);
    }

    let pipeline = Pipeline::new(config.parse.clone(), render, PlotSpecRenderer);

    let normalized = perfplot_io::read_normalized(&cli.log)
        .with_context(|| format!("failed to read {}", cli.log.display()))?;
    if let Some(path) = &cli.normalized_out {
        perfplot_io::write_normalized(path, &normalized)?;
    }

    let host = perfplot_io::resolve_host();
    let generated_at = chrono::Local::now().naive_local();
    let report = pipeline
        .run_normalized(&normalized, &host, generated_at)
        .with_context(|| format!("failed to process {}", cli.log.display()))?;

    if let Some(path) = &cli.export {
        let format = cli.format.unwrap_or_else(|| ExportFormat::from_path(path));
        export_to_path(&report.series, path, format)?;
    }

    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
