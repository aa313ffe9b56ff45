//! txtml CLI - markup-to-text compiler

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use txtml::convert::{discover, ConvertOptions, Converter};
use txtml::{ParseOptions, RenderOptions, RenderResult, TagRegistry, Txtml, Warning};

#[derive(Parser)]
#[command(name = "txtml")]
#[command(version)]
#[command(about = "Compile .tml markup documents to plain text", long_about = None)]
struct Cli {
    /// Directory with .tml files
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a single file
    Render {
        /// Input .tml file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Starting document width
        #[arg(short, long, env = "TXTML_WIDTH")]
        width: Option<usize>,

        /// Fail on unterminated tags
        #[arg(long)]
        strict: bool,

        /// Directory for resolving insert paths
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
    },

    /// Convert every .tml file of a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        /// Convert one file at a time
        #[arg(long)]
        sequential: bool,

        /// Starting document width
        #[arg(short, long, env = "TXTML_WIDTH")]
        width: Option<usize>,

        /// Fail documents with unterminated tags
        #[arg(long)]
        strict: bool,

        /// Print a JSON report instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// List the known tags
    Tags,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            width,
            strict,
            base_dir,
        }) => cmd_render(&input, output.as_deref(), width, strict, base_dir),
        Some(Commands::Batch {
            dir,
            sequential,
            width,
            strict,
            json,
        }) => cmd_batch(&dir, sequential, width, strict, json),
        Some(Commands::Tags) => {
            cmd_tags();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_default(cli.dir.as_deref().unwrap_or(Path::new("."))),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(strict: bool) -> ParseOptions {
    if strict {
        ParseOptions::new().strict()
    } else {
        ParseOptions::new().lenient()
    }
}

fn render_options(width: Option<usize>) -> RenderOptions {
    match width {
        Some(w) => RenderOptions::new().with_width(w),
        None => RenderOptions::new(),
    }
}

fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
}

fn cmd_default(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "txtml".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("{}\n", "markup-to-text compiler".dimmed());

    let files = discover(dir)?;
    if files.is_empty() {
        println!("{}", "No .tml files found".yellow());
        return Ok(());
    }

    let converter = Converter::new(ConvertOptions::new().sequential());
    for file in &files {
        println!("processing file: {}", file.display());
        match converter.convert_file(file) {
            Ok(converted) => {
                print_warnings(&converted.result.warnings);
                println!("  {}", "done".green());
            }
            Err(e) => println!("  {}: {}", "Error".red(), e),
        }
    }

    Ok(())
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    width: Option<usize>,
    strict: bool,
    base_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Txtml::new();
    if let Some(w) = width {
        builder = builder.with_width(w);
    }
    if strict {
        builder = builder.strict();
    }
    if let Some(dir) = base_dir {
        builder = builder.with_base_dir(dir);
    }

    let result: RenderResult = builder.render_file(input)?;
    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow(), warning);
    }

    if let Some(path) = output {
        fs::write(path, &result.content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", result.content);
    }

    Ok(())
}

fn cmd_batch(
    dir: &Path,
    sequential: bool,
    width: Option<usize>,
    strict: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = discover(dir)?;
    log::debug!("{} source files in {}", files.len(), dir.display());
    let options = ConvertOptions::new()
        .with_parse_options(parse_options(strict))
        .with_render_options(render_options(width))
        .with_parallel(!sequential);
    let converter = Converter::new(options);

    let pb = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(files.len() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = converter.convert_files(&files, |path, _| {
        pb.set_message(path.display().to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for converted in &report.converted {
        println!(
            "{} {} -> {}",
            "Converted".green(),
            converted.input.display(),
            converted.output.display()
        );
        print_warnings(&converted.result.warnings);
    }
    for failed in &report.failed {
        println!(
            "{} {}: {}",
            "Failed".red(),
            failed.input.display(),
            failed.error
        );
    }

    let stats = report.total_stats();
    println!();
    println!("{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Files".bold(), report.file_count());
    println!("{}: {}", "Failed".bold(), report.failed.len());
    println!("{}: {}", "Tags resolved".bold(), stats.tags_resolved);
    println!("{}: {}", "Warnings".bold(), report.warning_count());

    Ok(())
}

fn cmd_tags() {
    let registry = TagRegistry::with_defaults();
    println!("{}", "Known tags".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for name in registry.names() {
        let kind = if registry.is_single(name) {
            "single"
        } else {
            "paired"
        };
        println!("  {} {}", format!("{:<12}", name).bold(), kind.dimmed());
    }
}

fn cmd_version() {
    println!("{} {}", "txtml".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markup-to-text compiler for .tml documents");
    println!();
    println!("License: MIT");
}
