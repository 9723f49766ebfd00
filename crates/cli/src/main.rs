use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use slant_core::{
    ExtractConfig, ExtractionMethod, Extractor, FetchConfig, JsonConfig, MIN_SUCCESS_CHARS, StaticLayout, TextConfig,
    fetch_file, fetch_stdin, fetch_url, to_json, to_text,
};
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the extraction result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Locate the main article of a web page and print its clean text
#[derive(Parser, Debug)]
#[command(name = "slant")]
#[command(author = "Slant Contributors")]
#[command(version)]
#[command(about = "Extract the main article text from web pages", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Prefix text output with title, source, method and word count
    #[arg(long)]
    header: bool,

    /// Wrap text output at this many columns (0 = no wrapping)
    #[arg(long, default_value = "0", value_name = "COLS")]
    width: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Minimum characters of clean text for a successful extraction (at least 100)
    #[arg(long, default_value = "100", value_name = "NUM", value_parser = parse_min_text_chars)]
    min_text_chars: usize,

    /// Minimum characters for a semantic or class-based candidate
    #[arg(long, default_value = "200", value_name = "NUM")]
    min_candidate_chars: usize,

    /// Score a generic container must exceed
    #[arg(long, default_value = "10", value_name = "SCORE")]
    heuristic_threshold: f64,

    /// Content class selector to try, in order (repeatable; replaces the built-in list)
    #[arg(long = "selector", value_name = "CSS")]
    selectors: Vec<String>,

    /// JSON file with viewport width and element boxes keyed by id
    #[arg(long, value_name = "FILE")]
    layout: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn parse_min_text_chars(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if value < MIN_SUCCESS_CHARS {
        return Err(format!("must be at least {}", MIN_SUCCESS_CHARS));
    }
    Ok(value)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("slant_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

async fn read_input(input: &str, args: &Args) -> anyhow::Result<String> {
    if input == "-" {
        return fetch_stdin().context("Failed to read from stdin");
    }

    if is_url(input) {
        let config = FetchConfig {
            timeout: args.timeout,
            user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
        };
        return fetch_url(input, &config).await.context("Failed to fetch URL");
    }

    fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
}

fn build_extractor(args: &Args) -> anyhow::Result<Extractor> {
    let mut builder = ExtractConfig::builder()
        .min_text_chars(args.min_text_chars)
        .min_candidate_chars(args.min_candidate_chars)
        .heuristic_threshold(args.heuristic_threshold);

    if !args.selectors.is_empty() {
        builder = builder.content_selectors(args.selectors.clone());
    }

    let extractor = Extractor::with_config(builder.build());

    match &args.layout {
        Some(path) => {
            let raw =
                fs::read_to_string(path).with_context(|| format!("Failed to read layout: {}", path.display()))?;
            let layout: StaticLayout =
                serde_json::from_str(&raw).with_context(|| format!("Invalid layout JSON: {}", path.display()))?;
            Ok(extractor.with_layout(layout))
        }
        None => Ok(extractor),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "slant", &mut io::stdout());
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        bail!("No input given");
    };

    if args.verbose {
        init_tracing();
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let started = Instant::now();

    if args.verbose {
        let source = if input == "-" { "stdin".to_string() } else { input.bright_white().to_string() };
        echo::print_step(1, 3, &format!("Reading from {}", source));
    }

    let html = read_input(input, &args).await?;

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_timing("Read", started.elapsed());
        eprintln!();
        echo::print_step(2, 3, "Extracting main content");
    }

    let extractor = build_extractor(&args)?;
    let extract_started = Instant::now();
    let result = if is_url(input) { extractor.extract_with_url(&html, input) } else { extractor.extract(&html) };

    if args.verbose {
        echo::print_timing("Extract", extract_started.elapsed());
        echo::print_extraction_details(&result);
        if result.extraction_method == Some(ExtractionMethod::Fallback) {
            echo::print_warning("Used whole-page text; the result may include boilerplate");
        }
    }

    let output = match args.format {
        OutputFormat::Json => to_json(&result, &JsonConfig { pretty: args.pretty })?,
        OutputFormat::Text => to_text(&result, &TextConfig { include_header: args.header, line_width: args.width })?,
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        eprintln!("  {} {}", "Format:".dimmed(), format!("{:?}", args.format).bright_white());
        echo::print_timing("Total", started.elapsed());
        eprintln!();
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => println!("{}", output),
    }

    if !result.success {
        let message = result.error.unwrap_or_else(|| "Extraction failed".to_string());
        echo::print_error(&message);
        bail!(message);
    }

    Ok(())
}
