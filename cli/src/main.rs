//! claimform CLI - claim form extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use claimform::{
    parse_file_with_options, render, CleanupPreset, DocumentRecord, JsonFormat, ParseOptions,
};

#[derive(Parser)]
#[command(name = "claimform")]
#[command(version)]
#[command(about = "Extract structured claim form data from OCR text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an OCR text file to JSON
    Parse {
        /// Input OCR text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Parse many OCR text files into a directory
    Batch {
        /// Input OCR text files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Print a human-readable extraction report
    Summary {
        /// Input OCR text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show the section(s) recognised on each page
    Sections {
        /// Input OCR text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct ParseArgs {
    /// Physical page count (defaults to the number of delimited pages)
    #[arg(long, value_name = "N", env = "CLAIMFORM_PAGES")]
    pages: Option<u32>,

    /// OCR text cleanup preset applied before parsing
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    /// Extract pages one at a time
    #[arg(long)]
    sequential: bool,
}

impl ParseArgs {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::new().with_parallel(!self.sequential);
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }
        options
    }

    fn parse(&self, input: &Path) -> Result<DocumentRecord, Box<dyn std::error::Error>> {
        Ok(parse_file_with_options(input, self.pages, self.options())?)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Unicode normalization and invisible character removal
    Minimal,
    /// Minimal plus whitespace and punctuation fixes
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input,
            output,
            parse,
            compact,
        } => cmd_parse(&input, output.as_deref(), &parse, compact),
        Commands::Batch {
            inputs,
            output,
            parse,
        } => cmd_batch(&inputs, &output, &parse),
        Commands::Summary { input, parse } => cmd_summary(&input, &parse),
        Commands::Sections { input, parse } => cmd_sections(&input, &parse),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    parse: &ParseArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse.parse(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    parse: &ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    let mut failed = Vec::new();

    for input in inputs {
        pb.set_message(input.display().to_string());

        let result = parse.parse(input).and_then(|doc| {
            let path = output_path(input, output_dir);
            fs::write(&path, render::to_json(&doc, JsonFormat::Pretty)?)?;
            Ok(path)
        });

        match result {
            Ok(path) => written.push(path),
            Err(e) => {
                log::warn!("{}: {}", input.display(), e);
                failed.push((input.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), path.display());
    }

    if failed.is_empty() {
        return Ok(());
    }

    for (input, message) in &failed {
        eprintln!("  {} {}: {}", "✗".red(), input.display(), message);
    }
    Err(format!("{} of {} files failed", failed.len(), inputs.len()).into())
}

fn cmd_summary(input: &Path, parse: &ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse.parse(input)?;
    print!("{}", render::to_summary(&doc));
    Ok(())
}

fn cmd_sections(input: &Path, parse: &ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse.parse(input)?;

    println!("{}", "Page Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in &doc.pages {
        let label = if page.is_classified() {
            page.section.normal()
        } else {
            page.section.dimmed()
        };
        println!("{:>4}  {}", page.number.to_string().bold(), label);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "claimform".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Claim form extraction tool");
    println!();
    println!("License: MIT");
}

/// `<dir>/<stem>_form.json` for an input file.
fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}_form.json", stem))
}
