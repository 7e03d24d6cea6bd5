#![warn(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use human_panic::setup_panic;

use when::config;
use when::context::Context;
use when::resolve;
use when::utils::{expand_homedir, parse_flexible_date};

/// When finds the dates in loosely typed text like "2nd friday of march" or "in 3 days"
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value = "~/.config/when/config.toml")]
    config_path: PathBuf,

    /// Date to resolve against instead of the local date (ISO or any recognized phrase)
    #[arg(long)]
    today: Option<String>,

    /// Output format
    #[arg(long, default_value = "plain")]
    format: OutputFormat,

    /// Text to find dates in, prompted for if not given
    text: Vec<String>,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum OutputFormat {
    /// One aligned line per date
    Plain,
    /// JSON array for programmatic use
    Json,
}

fn main() -> anyhow::Result<()> {
    setup_panic!();
    env_logger::init();

    log::debug!("Parsing command line arguments...");
    let args = Args::parse();
    log::trace!("Parsed command line arguments: {args:#?}");

    let config_path = expand_homedir(&args.config_path)?;
    let config = config::load(&config_path)?;

    let local = Context::local(&config);
    let ctx = match &args.today {
        Some(today) => {
            let today = parse_flexible_date(today, &local)
                .with_context(|| format!("could not understand --today {today:?}"))?;
            Context::new(today, &config)
        }
        None => local,
    };
    log::debug!(
        "Resolving against {} with weeks starting {:?}",
        ctx.today,
        ctx.week_start
    );

    let text = if args.text.is_empty() {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("when")
            .interact_text()?
    } else {
        args.text.join(" ")
    };

    let resolutions = resolve(&text, &ctx);
    log::debug!("Found {} dates in {text:?}", resolutions.len());

    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&resolutions).context("failed to serialize dates")?
            );
        }
        OutputFormat::Plain => {
            if resolutions.is_empty() {
                println!("{}", style("No dates found.").dim());
            }
            let width = resolutions.iter().map(|r| r.left.len()).max().unwrap_or(0);
            for resolution in &resolutions {
                println!(
                    "{}  {}",
                    style(format!("{:width$}", resolution.left)).bold(),
                    style(&resolution.right).dim()
                );
            }
        }
    }

    Ok(())
}
