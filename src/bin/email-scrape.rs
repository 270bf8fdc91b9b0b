//! email-scrape CLI
//!
//! Print the addresses found in saved HTML pages, one `<source>;<email>` line
//! per address.

use anyhow::{Context, Result};
use clap::Parser;
use email_scrape::report::Report;
use email_scrape::{ScrapeOptions, scrape_emails_with};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "email-scrape")]
#[command(version)]
#[command(about = "Extract plain and obfuscated email addresses from HTML pages")]
struct Cli {
    /// HTML files to scan (default: stdin, also selected by `-`)
    inputs: Vec<PathBuf>,

    /// JSON file with scrape options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject inputs larger than this many bytes
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Leave undecodable atob() payloads in place instead of failing the page
    #[arg(long)]
    skip_undecodable: bool,

    /// Print one JSON object per input instead of `source;email` lines
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "Some inputs could not be scraped");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("email_scrape=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Scrape every input, returning how many failed
fn run(cli: &Cli) -> Result<usize> {
    let options = load_options(cli)?;
    let stdin_only = [PathBuf::from("-")];
    let inputs = if cli.inputs.is_empty() {
        &stdin_only[..]
    } else {
        &cli.inputs[..]
    };

    let mut failed = 0;
    for input in inputs {
        let source = input.display().to_string();
        let result = read_input(input).and_then(|html| {
            scrape_emails_with(&html, &options)
                .with_context(|| format!("Failed to scrape {source}"))
        });

        match result {
            Ok(emails) => {
                info!(source = %source, found = emails.len(), "Scraped input");
                print_report(&Report::new(&source, &emails), cli.json)?;
            }
            Err(e) => {
                error!("{e:#}");
                failed += 1;
            }
        }
    }

    Ok(failed)
}

fn load_options(cli: &Cli) -> Result<ScrapeOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            ScrapeOptions::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => ScrapeOptions::default(),
    };

    if let Some(limit) = cli.max_bytes {
        options = options.with_max_input_bytes(limit);
    }
    if cli.skip_undecodable {
        options = options.skipping_undecodable_payloads();
    }

    Ok(options)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("Failed to read stdin")?;
        Ok(html)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn print_report(report: &Report<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        for line in report.lines() {
            println!("{line}");
        }
    }
    Ok(())
}
