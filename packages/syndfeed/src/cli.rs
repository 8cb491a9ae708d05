//! Command-line interface for syndfeed.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::date::Locale;
use crate::dialect::FeedType;
use crate::error::Result;
use crate::io::{feed_to_yaml, FeedInput, FeedOutput};

/// syndfeed - Parse, inspect and convert RSS and Atom feeds.
#[derive(Parser)]
#[command(name = "syndfeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the dialect of a feed file.
    Detect {
        /// Feed file to inspect
        file: PathBuf,
    },

    /// Parse a feed and print it as YAML.
    Inspect {
        /// Feed file to parse
        file: PathBuf,

        /// Locale for date text (e.g., en-US)
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Convert a feed to another dialect.
    Convert {
        /// Feed file to convert
        file: PathBuf,

        /// Target dialect (e.g., rss_2.0, atom_1.0)
        #[arg(short, long)]
        to: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { file } => detect_command(&file),
        Commands::Inspect { file, locale } => inspect_command(&file, locale.as_deref()),
        Commands::Convert { file, to, output } => convert_command(&file, &to, output.as_deref()),
    }
}

fn detect_command(file: &Path) -> Result<()> {
    let xml = std::fs::read_to_string(file)?;
    let feed_type = FeedInput::detect(&xml)?;
    println!("{feed_type}");
    Ok(())
}

fn inspect_command(file: &Path, locale: Option<&str>) -> Result<()> {
    // Validate the locale before touching the file
    let locale = locale.map(Locale::new).transpose()?.unwrap_or_default();

    let feed = FeedInput::new(locale).parse_file(file)?;

    eprintln!(
        "{} {} ({})",
        style("Parsed").bold(),
        style(file.display()).cyan(),
        style(feed.feed_type).green()
    );
    eprintln!("  Entries: {}", feed.entries.len());
    if !feed.modules.is_empty() {
        eprintln!("  Modules: {}", feed.modules.len());
    }

    print!("{}", feed_to_yaml(&feed)?);
    Ok(())
}

fn convert_command(file: &Path, to: &str, output: Option<&Path>) -> Result<()> {
    let target: FeedType = to.parse()?;

    let feed = FeedInput::default().parse_file(file)?;
    let output_feed = FeedOutput::new(target);

    match output {
        Some(path) => {
            let written = output_feed.output_file(&feed, path)?;
            eprintln!(
                "{} {} to {}",
                style("Converted").bold(),
                style(feed.feed_type).cyan(),
                style(target).green()
            );
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                written.display()
            );
        }
        None => print!("{}", output_feed.output_string(&feed)?),
    }

    Ok(())
}
