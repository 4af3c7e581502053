use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use form_filler::config::FillerConfig;
use form_filler::url::{is_form_url, FORM_URL_PATTERNS};
use form_filler::session;

/// Fill a web questionnaire with plausible synthetic answers.
#[derive(Debug, Parser)]
#[command(name = "form-filler", version, about)]
struct Cli {
    /// Form URL; prompted for when omitted
    url: Option<String>,

    /// TOML configuration file (defaults to ./form_filler.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Fill the form but do not press submit
    #[arg(long)]
    no_submit: bool,

    /// Abort the run on the first failure
    #[arg(long)]
    halt_on_error: bool,

    /// Save a screenshot whenever something fails
    #[arg(long)]
    screenshots: bool,

    /// Seed for reproducible answers
    #[arg(long)]
    seed: Option<u64>,

    /// Proceed without asking when the URL does not look like a form
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn apply(&self, config: &mut FillerConfig) {
        if self.headless {
            config.browser.headless = true;
        }
        if self.no_submit {
            config.behavior.auto_submit = false;
        }
        if self.halt_on_error {
            config.behavior.continue_on_error = false;
        }
        if self.screenshots {
            config.behavior.screenshot_on_error = true;
        }
        if self.seed.is_some() {
            config.behavior.seed = self.seed;
        }
        if self.quiet {
            config.behavior.verbose = false;
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("form_filler={level}"))),
        )
        .with_target(false)
        .init();
}

fn prompt(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_overview(config: &FillerConfig) {
    println!("Configuration:");
    println!("  - Headless mode: {}", config.browser.headless);
    println!("  - Auto-submit: {}", config.behavior.auto_submit);
    println!("  - Screenshot on error: {}", config.behavior.screenshot_on_error);
    println!("  - Continue on error: {}", config.behavior.continue_on_error);
    println!();
}

/// Ask before filling something that does not look like a form.
fn confirm_url(url: &str, assume_yes: bool) -> Result<bool> {
    if is_form_url(url) {
        return Ok(true);
    }
    warn!("This doesn't look like a form URL: {url}");
    println!("Supported patterns:");
    for pattern in FORM_URL_PATTERNS {
        println!("  - {pattern}/...");
    }
    if assume_yes {
        return Ok(true);
    }
    Ok(prompt("Continue anyway? (y/n): ")?.eq_ignore_ascii_case("y"))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = FillerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config);
    init_logging(config.behavior.verbose);

    print_overview(&config);

    let url = match cli.url.clone() {
        Some(url) => url.trim().to_string(),
        None => prompt("Enter form URL: ")?,
    };
    if url.is_empty() {
        eprintln!("URL cannot be empty!");
        return Ok(ExitCode::FAILURE);
    }
    if !confirm_url(&url, cli.yes)? {
        return Ok(ExitCode::SUCCESS);
    }

    let summary = session::run(&url, config).await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(if summary.aborted {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
