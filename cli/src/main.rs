//! outpage CLI - outline-to-document generation tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use outpage::{generate_many, Outpage, OutlineParser, ParseOptions, ROOT};

#[derive(Parser)]
#[command(name = "outpage")]
#[command(version)]
#[command(about = "Turn tab-indented outline notes into a paginated, hyperlinked document", long_about = None)]
struct Cli {
    /// Input outline files
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Skip malformed lines instead of failing
    #[arg(long)]
    lenient: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documents from outline files
    #[command(alias = "gen")]
    Generate {
        /// Input outline files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Skip malformed lines instead of failing
        #[arg(long)]
        lenient: bool,

        /// Table-of-contents heading text
        #[arg(long, value_name = "TEXT")]
        catalog_label: Option<String>,

        /// Page size in points, e.g. "595x842"
        #[arg(long, value_name = "WxH")]
        page_size: Option<String>,
    },

    /// Validate an outline file without generating anything
    Check {
        /// Input outline file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse an outline file and print its normalized form
    Outline {
        /// Input outline file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Generate {
            inputs,
            lenient,
            catalog_label,
            page_size,
        }) => cmd_generate(&inputs, lenient, catalog_label.as_deref(), page_size.as_deref()),
        Some(Commands::Check { input }) => cmd_check(&input),
        Some(Commands::Outline { input, output }) => cmd_outline(&input, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: generate if inputs are provided
            if !cli.inputs.is_empty() {
                cmd_generate(&cli.inputs, cli.lenient, None, None)
            } else {
                println!("{}", "Usage: outpage <FILE>...".yellow());
                println!("       outpage --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_generate(
    inputs: &[PathBuf],
    lenient: bool,
    catalog_label: Option<&str>,
    page_size: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("generating documents for {} input(s)", inputs.len());
    let mut outpage = Outpage::new();
    if lenient {
        outpage = outpage.lenient();
    }
    if let Some(label) = catalog_label {
        outpage = outpage.with_catalog_label(label);
    }
    if let Some(size) = page_size {
        let (width, height) = parse_page_size(size)?;
        outpage = outpage.with_page_size(width, height);
    }

    if inputs.len() == 1 {
        let output = outpage.generate(&inputs[0])?;
        println!("{} {}", "Saved to".green(), output.display());
        return Ok(());
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Inputs are independent; generate them in parallel and report in order.
    pb.set_message("Generating...");
    let results = if lenient || catalog_label.is_some() || page_size.is_some() {
        inputs.iter().map(|input| outpage.generate(input)).collect()
    } else {
        generate_many(inputs)
    };
    pb.finish_with_message("Done!");

    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(output) => println!("  {} {}", "✓".green(), output.display()),
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), input.display(), e);
            }
        }
    }
    if failed > 0 {
        return Err(format!("{} of {} inputs failed", failed, inputs.len()).into());
    }
    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(input)?;
    let parser = OutlineParser::with_options(ParseOptions::new());
    match parser.parse(&text) {
        Ok(tree) => {
            println!("{} {}", "OK".green().bold(), input.display());
            println!("  nodes:     {}", tree.len() - 1);
            println!("  top-level: {}", tree.node(ROOT).children.len());
            Ok(())
        }
        Err(e) => {
            if let Some(line) = e.line() {
                let offending = text.split('\n').nth(line).unwrap_or_default();
                eprintln!("{} line {}: {}", "Invalid".red().bold(), line, offending);
            }
            Err(e.into())
        }
    }
}

fn cmd_outline(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let tree = outpage::parse_file(input)?;
    let text = tree.to_outline_text();

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn cmd_version() {
    println!("outpage {}", env!("CARGO_PKG_VERSION"));
}

fn parse_page_size(value: &str) -> Result<(f64, f64), Box<dyn std::error::Error>> {
    let lower = value.to_ascii_lowercase();
    let (width, height) = lower
        .split_once('x')
        .ok_or_else(|| format!("Invalid page size (expected WxH): {}", value))?;
    Ok((width.trim().parse()?, height.trim().parse()?))
}
