//! Text Translator CLI - Command line tool for translating English text.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::PathBuf;
use text_translator_core::{
    is_supported_language, text, AppConfig, BatchItem, BatchTranslator, Lang, ProviderConfig,
    TranslationManager,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Maximum accepted input file size (the core itself has no ceiling)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Txt,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "text-translate")]
#[command(author, version, about = "Translate English text", long_about = None)]
struct Args {
    /// Text to translate
    #[arg(short = 't', long, conflicts_with = "file")]
    text: Option<String>,

    /// Path to a text file to translate (max 10 MB); reads stdin if neither
    /// --text nor --file is given
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Translate the file line by line as a batch, reporting per-line status
    #[arg(long, requires = "file")]
    lines: bool,

    /// Output file for batch results (default: stdout)
    #[arg(short, long, requires = "lines")]
    output: Option<PathBuf>,

    /// Batch result format
    #[arg(long, value_enum, default_value = "txt", requires = "lines")]
    format: ExportFormat,

    /// Source language code
    #[arg(short = 's', long, default_value = "en")]
    source: String,

    /// Target language code
    #[arg(short = 'T', long, default_value = "kn")]
    target: String,

    /// OpenAI API base URL
    #[arg(long, env = "OPENAI_API_BASE", default_value = "http://localhost:8080/v1")]
    api_base: String,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    api_key: Option<String>,

    /// Model name for OpenAI-compatible API
    #[arg(long, env = "OPENAI_MODEL", default_value = "default_model")]
    model: String,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable caching
    #[arg(long)]
    no_cache: bool,

    /// In paragraph mode, pass failed lines through untranslated
    #[arg(long)]
    skip_failed_lines: bool,
}

/// Read the input text from --text, --file or stdin.
fn read_input(args: &Args) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        let metadata = std::fs::metadata(path)
            .context(format!("Failed to read file: {}", path.display()))?;
        anyhow::ensure!(
            metadata.len() <= MAX_FILE_SIZE,
            "File {} exceeds the maximum input size (10 MB)",
            path.display()
        );

        return std::fs::read_to_string(path)
            .context(format!("Failed to read file: {}", path.display()));
    }

    // CLI prompt is intentional
    #[allow(clippy::print_stderr)]
    {
        eprintln!("Enter text to translate (Ctrl+D to finish):");
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;
    Ok(text)
}

/// Render batch results in the original export format:
/// Source/Translated blocks separated by dashes.
fn format_batch_txt(results: &[BatchItem]) -> String {
    let mut out = String::new();
    for item in results {
        out.push_str(&format!("Source: {}\n", item.source));
        match &item.translated {
            Some(translated) => out.push_str(&format!("Translated: {translated}\n")),
            None => out.push_str(&format!(
                "Error: {}\n",
                item.error.as_deref().unwrap_or("unknown error")
            )),
        }
        out.push_str(&"-".repeat(50));
        out.push('\n');
    }
    out
}

fn export_batch(results: &[BatchItem], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Txt => Ok(format_batch_txt(results)),
        ExportFormat::Json => {
            serde_json::to_string_pretty(results).context("Failed to serialize batch results")
        }
    }
}

/// Translate a file line by line with a progress bar.
async fn run_batch(manager: &TranslationManager, args: &Args, content: &str) -> Result<()> {
    let lines: Vec<&str> = content.lines().collect();
    anyhow::ensure!(!lines.is_empty(), "No lines to translate");

    info!("Translating {} lines", lines.len());

    // Template is hardcoded and valid, unwrap is safe
    #[allow(clippy::unwrap_used, clippy::cast_possible_truncation)]
    let pb = ProgressBar::new(lines.len() as u64);
    #[allow(clippy::unwrap_used)]
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let batch = BatchTranslator::new(manager);
    let chunk_size = manager.config().batch.max_concurrent.max(1);

    let mut results = Vec::with_capacity(lines.len());
    for chunk in lines.chunks(chunk_size) {
        let mut items = batch.translate_list(chunk).await;
        pb.inc(items.len() as u64);
        results.append(&mut items);
    }

    pb.finish_with_message("Translation complete");

    let failed = results.iter().filter(|item| !item.is_success()).count();
    if failed > 0 {
        warn!("{} of {} lines failed", failed, results.len());
    }
    anyhow::ensure!(
        failed < results.len(),
        "All {} lines failed to translate",
        results.len()
    );

    let rendered = export_batch(&results, args.format)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .context(format!("Failed to write output: {}", path.display()))?;
            #[allow(clippy::print_stdout)]
            {
                println!("Batch results saved to: {}", path.display());
            }
        }
        None =>
        {
            #[allow(clippy::print_stdout)]
            {
                print!("{rendered}");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Load or create config
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    // Override config with CLI arguments
    config.source_lang = Lang::new(&args.source);
    config.target_lang = Lang::new(&args.target);
    config.skip_failed_lines = args.skip_failed_lines || config.skip_failed_lines;

    if args.no_cache {
        config.cache.memory_enabled = false;
        config.cache.disk_enabled = false;
    }

    // Configure provider
    config.provider = ProviderConfig::new(
        args.api_base.clone(),
        args.api_key.clone(),
        args.model.clone(),
    );

    for code in [&args.source, &args.target] {
        if !is_supported_language(code) {
            warn!("Unknown language code '{}'; passing it to the provider as-is", code);
        }
    }

    let content = read_input(&args)?;
    anyhow::ensure!(text::is_valid(&content, None), "No text provided");

    let manager = TranslationManager::new(config).context("Failed to initialize translator")?;

    if args.lines {
        return run_batch(&manager, &args, &content).await;
    }

    // Multi-line input keeps its paragraph structure; single lines go
    // straight through
    let translated = if content.trim().contains('\n') {
        manager
            .translate_paragraph(&content)
            .await
            .context("Translation failed")?
    } else {
        manager
            .translate(&content)
            .await
            .context("Translation failed")?
    };

    // CLI output is intentional
    #[allow(clippy::print_stdout)]
    {
        println!("{translated}");
    }

    Ok(())
}
