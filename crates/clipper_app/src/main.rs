//! Command-line exporter: scrap URL in, Markdown document out.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{info, LevelFilter};

use clip_logging::{initialize, LogDestination};
use clipper_core::{build_markdown_document, normalize_scrap};
use clipper_engine::{
    extract_slug, fetch_scrap_blocking, scrap_filename, write_markdown, FetchSettings,
};

#[derive(Parser)]
#[command(name = "clipper_app")]
#[command(about = "Export a scrap discussion thread as Markdown")]
#[command(version)]
struct Cli {
    /// Scrap URL (https://zenn.dev/<user>/scraps/<slug>) or bare slug
    url: String,

    /// Write the document into DIR instead of printing it
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Also write logs to ./clipper.log
    #[arg(long)]
    log_file: bool,

    /// Log warnings and errors only
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let destination = if cli.log_file {
        LogDestination::Both
    } else {
        LogDestination::Terminal
    };
    initialize(destination, level);

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let Some(slug) = extract_slug(&cli.url) else {
        bail!(
            "not a scrap URL: {} (expected https://zenn.dev/<username>/scraps/<slug>)",
            cli.url
        );
    };

    let scrap = fetch_scrap_blocking(FetchSettings::default(), &slug)
        .with_context(|| format!("failed to fetch scrap {slug}"))?;

    let doc = normalize_scrap(&scrap);
    let markdown = build_markdown_document(&doc, Utc::now());

    match cli.out {
        Some(dir) => {
            let filename = scrap_filename(&doc.title, &scrap.slug);
            let path = write_markdown(&dir, &filename, &markdown)
                .with_context(|| format!("failed to write into {}", dir.display()))?;
            println!("{}", path.display());
        }
        None => println!("{markdown}"),
    }

    info!("exported scrap {slug}");
    Ok(())
}
