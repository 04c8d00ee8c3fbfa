//! unweb CLI - web page reverse-engineering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unweb::{
    load_captures, load_overrides, render, JsonFormat, PageCapture, PipelineConfig, Unweb,
    UnwebResult,
};

#[derive(Parser)]
#[command(name = "unweb")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn captured web pages into classified sections and design tokens", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a capture into classified sections
    Analyze {
        /// Capture file (JSON document, array or JSON Lines)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON output format
        #[arg(long, value_enum, default_value = "pretty")]
        format: OutputFormat,

        /// Refine archetypes from group and atom layouts
        #[arg(long)]
        high_fidelity: bool,

        /// Strip images, videos and backgrounds from section content
        #[arg(long)]
        no_media: bool,

        /// Do not synthesize a navbar section
        #[arg(long)]
        no_navbar: bool,

        /// Omit the analysis timestamp for reproducible output
        #[arg(long)]
        no_timestamp: bool,

        /// External semantic override file
        #[arg(long, value_name = "FILE")]
        overrides: Option<PathBuf>,

        /// Write design tokens to this file
        #[arg(long, value_name = "FILE")]
        tokens_out: Option<PathBuf>,

        /// Write theme CSS variables to this file
        #[arg(long, value_name = "FILE")]
        theme_css: Option<PathBuf>,
    },

    /// Print design tokens
    Tokens {
        /// Capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print CSS variables instead of JSON
        #[arg(long)]
        css: bool,
    },

    /// Show classifier candidates per section
    Classify {
        /// Capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Candidates shown per section
        #[arg(long, default_value = "3")]
        top: usize,
    },

    /// Show visual section groups
    Groups {
        /// Capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Show a page outline
    Info {
        /// Capture file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented JSON
    Pretty,
    /// Single-line JSON
    Compact,
    /// One page per line
    Lines,
}

impl From<OutputFormat> for JsonFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Pretty => JsonFormat::Pretty,
            OutputFormat::Compact => JsonFormat::Compact,
            OutputFormat::Lines => JsonFormat::Lines,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            format,
            high_fidelity,
            no_media,
            no_navbar,
            no_timestamp,
            overrides,
            tokens_out,
            theme_css,
        } => {
            let config = PipelineConfig::new()
                .with_high_fidelity(high_fidelity)
                .with_keep_media(!no_media)
                .with_navbar_injection(!no_navbar)
                .with_timestamp(!no_timestamp)
                .sequential();
            cmd_analyze(
                &input,
                output.as_deref(),
                format.into(),
                config,
                overrides.as_deref(),
                tokens_out.as_deref(),
                theme_css.as_deref(),
            )
        }
        Commands::Tokens { input, css } => cmd_tokens(&input, css),
        Commands::Classify { input, top } => cmd_classify(&input, top),
        Commands::Groups { input } => cmd_groups(&input),
        Commands::Info { input } => cmd_info(&input),
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

fn read_captures(input: &Path) -> Result<Vec<PageCapture>, Box<dyn std::error::Error>> {
    let captures = load_captures(&fs::read(input)?)?;
    if captures.is_empty() {
        return Err(format!("{}: no capture documents", input.display()).into());
    }
    log::debug!("Loaded {} captures from {}", captures.len(), input.display());
    Ok(captures)
}

/// Analyze every capture, with a progress bar for multi-page input.
fn analyze_all(unweb: &Unweb, captures: &[PageCapture]) -> Vec<UnwebResult> {
    if captures.len() == 1 {
        return captures.iter().map(|c| unweb.analyze(c)).collect();
    }

    let pb = ProgressBar::new(captures.len() as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);

    let results = captures
        .iter()
        .map(|capture| {
            pb.set_message(capture.url.clone());
            let result = unweb.analyze(capture);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_with_message("Done!");
    results
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content.trim_end());
    }
    Ok(())
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    format: JsonFormat,
    config: PipelineConfig,
    overrides: Option<&Path>,
    tokens_out: Option<&Path>,
    theme_css: Option<&Path>,
) -> CliResult {
    let captures = read_captures(input)?;

    let mut unweb = Unweb::new().with_config(config);
    if let Some(path) = overrides {
        let list = load_overrides(path)?;
        log::debug!("Loaded {} overrides from {}", list.len(), path.display());
        unweb = unweb.with_overrides(list);
    }

    let results = analyze_all(&unweb, &captures);
    let pages: Vec<_> = results.iter().map(|r| r.page()).collect();
    let tokens: Vec<_> = results.iter().map(|r| r.tokens()).collect();

    let json = match pages.as_slice() {
        [page] if format != JsonFormat::Lines => render::to_json(*page, format)?,
        _ => render::to_json_batch(&pages, format)?,
    };
    write_or_print(output, &json)?;

    if let Some(path) = tokens_out {
        let json = match tokens.as_slice() {
            [single] => render::to_json(*single, JsonFormat::Pretty)?,
            _ => render::to_json_batch(&tokens, JsonFormat::Pretty)?,
        };
        fs::write(path, json)?;
        println!("{} {}", "Tokens saved to".green(), path.display());
    }

    if let Some(path) = theme_css {
        let css: Vec<String> = results.iter().map(|r| r.theme_css()).collect();
        fs::write(path, css.join("\n"))?;
        println!("{} {}", "Theme saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_tokens(input: &Path, css: bool) -> CliResult {
    let captures = read_captures(input)?;
    let unweb = Unweb::new().sequential();

    for result in analyze_all(&unweb, &captures) {
        if css {
            print!("{}", result.theme_css());
        } else {
            println!("{}", result.tokens_json(JsonFormat::Pretty)?);
        }
    }
    Ok(())
}

fn cmd_classify(input: &Path, top: usize) -> CliResult {
    let captures = read_captures(input)?;
    let unweb = Unweb::new().sequential();

    for result in analyze_all(&unweb, &captures) {
        let page = result.page();
        println!("{}", page.url.cyan().bold());
        println!("{}", "─".repeat(60).dimmed());

        for section in &page.sections {
            let block = section.block_type.map_or("?", |b| b.id());
            println!(
                "{:>3}. {} {}",
                section.index,
                block.green().bold(),
                section.title.trim().dimmed()
            );
            for candidate in section.candidates.iter().take(top) {
                println!(
                    "       {:<24} {:>4}  {}",
                    candidate.block_type.id(),
                    candidate.score,
                    candidate.reasons.join(", ").dimmed()
                );
            }
            for note in &section.notes {
                println!("       {} {}", "note:".yellow(), note);
            }
        }
        println!();
    }
    Ok(())
}

fn cmd_groups(input: &Path) -> CliResult {
    let captures = read_captures(input)?;
    let unweb = Unweb::new().sequential();

    for result in analyze_all(&unweb, &captures) {
        let page = result.page();
        println!("{}", page.url.cyan().bold());
        println!("{}", "─".repeat(40).dimmed());

        for (i, group) in page.groups.iter().enumerate() {
            println!("{} {}", "Group".bold(), i + 1);
            for section in &group.sections {
                println!(
                    "  {} {:>3} {:<6} {} ({} hotspots)",
                    "├─".dimmed(),
                    section.index,
                    section.layout_type.as_str(),
                    section.title,
                    section.hotspots.len()
                );
            }
        }
        if page.groups.is_empty() {
            println!("{}", "No groups".yellow());
        }
        println!();
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    let captures = read_captures(input)?;
    let unweb = Unweb::new().sequential();

    println!("{}", "Capture Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), captures.len());
    println!();

    for result in analyze_all(&unweb, &captures) {
        println!("{}", result.outline());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unweb".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Web page reverse-engineering tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unweb".dimmed());
    println!("License: MIT");
}
