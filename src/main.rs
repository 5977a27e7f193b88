// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use grimoire::app_config::{Config, LogLevel, TranslationProvider};
use grimoire::document;
use grimoire::file_utils::FileManager;
use grimoire::postprocess;
use grimoire::providers::Provider;
use grimoire::providers::deepl::DeepL;
use grimoire::scrape::Scraper;
use grimoire::translation::{BatchOptions, BatchTranslator, TranslationCache};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "deepl")]
    DeepL,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::DeepL => TranslationProvider::DeepL,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape spell data from the 5eTools GitHub mirror
    Scrape(ScrapeArgs),

    /// Translate a spell JSON document, preserving markup tokens
    Translate(TranslateArgs),

    /// Generate shell completions for grimoire
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ScrapeArgs {
    /// Output directory for the aggregated JSON and CSV
    #[arg(short, long, default_value = "5etools_spells_dump")]
    out_dir: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input spell JSON file (array of objects)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Source language code (e.g., 'EN')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'FR')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Max segments per provider call
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Translation cache store location
    #[arg(long)]
    cache_path: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// grimoire - D&D 5e spell scraping and translation toolkit
///
/// Scrapes spell data from the public 5eTools mirror and machine-translates
/// spell documents while preserving embedded markup tokens, backed by a
/// durable translation cache.
#[derive(Parser, Debug)]
#[command(name = "grimoire")]
#[command(version)]
#[command(about = "D&D 5e spell scraping and translation toolkit")]
#[command(long_about = "grimoire scrapes spell data from the 5eTools mirror and translates spell
JSON documents with markup-token protection and a durable translation cache.

EXAMPLES:
    grimoire scrape                                  # Dump spells to 5etools_spells_dump/
    grimoire scrape -o dump/                         # Dump to a custom directory
    grimoire translate spells.json spells_fr.json    # Translate using conf.json
    grimoire translate -s EN -t FR in.json out.json  # Explicit language pair
    grimoire translate --log-level debug in.json out.json
    grimoire completions bash > grimoire.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file does
    not exist, a default one is created automatically. The API key is read
    from TRANSLATE_API_KEY; DEEPL_API_BASE overrides the endpoint.

SUPPORTED PROVIDERS:
    deepl - DeepL v2 API (free keys with the ':fx' suffix are auto-routed
            to the free endpoint)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter_for(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "grimoire", &mut std::io::stdout());
            Ok(())
        }
        Commands::Scrape(args) => run_scrape(args),
        Commands::Translate(args) => run_translate(args),
    }
}

fn run_scrape(options: ScrapeArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(level_filter_for(&level.clone().into()));
    }

    let scraper = Scraper::new()?;
    let summary = scraper.run(&options.out_dir)?;

    info!(
        "Wrote {} spells from {} files to {:?} and {:?}",
        summary.spells, summary.files, summary.json_path, summary.csv_path
    );
    Ok(())
}

fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = &options.log_level {
        log::set_max_level(level_filter_for(&level.clone().into()));
    }

    let config = load_config(&options)?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    // Read the input document
    let raw = FileManager::read_to_string(&options.input)?;
    let mut root: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse input JSON: {:?}", options.input))?;
    if !root.is_array() {
        return Err(anyhow!("Input JSON root must be an array of spell objects"));
    }

    // Capture original names, then collect everything translatable
    document::capture_english_names(&mut root);
    let segments = document::collect_segments(&root);
    info!("Collected {} translatable segments", segments.len());

    let texts: Vec<String> = segments.iter().map(|segment| segment.text.clone()).collect();

    // Build the per-run translation context
    let provider = create_provider(&config);
    let cache = TranslationCache::load(&config.translation.cache_path);
    if !cache.is_empty() {
        info!("Loaded {} cached translations", cache.len());
    }

    let mut translator = BatchTranslator::new(
        provider,
        cache,
        BatchOptions {
            source_lang: config.source_language.clone(),
            target_lang: config.target_language.clone(),
            batch_size: config.translation.batch_size,
            pause: Duration::from_millis(config.translation.pause_ms),
        },
    );

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} batch {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let translated = translator.translate_many_with_progress(&texts, |done, total| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    })?;
    bar.finish_and_clear();

    // Reinject through the same anchor list, then post-process
    document::reinject(&mut root, &segments, &translated)?;
    postprocess::apply(&mut root);

    let serialized =
        serde_json::to_string_pretty(&root).context("Failed to serialize output document")?;
    FileManager::write_to_file(&options.output, &serialized)?;

    let (hits, misses, hit_rate) = translator.cache().stats();
    info!(
        "Wrote {:?} ({} segments, {} cache hits / {} misses, {:.0}% hit rate)",
        options.output,
        segments.len(),
        hits,
        misses,
        hit_rate * 100.0
    );
    Ok(())
}

/// Load the configuration, creating a default file when missing, then apply
/// environment and command-line overrides and validate.
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let config_path = Path::new(&options.config_path);

    let mut config = if config_path.exists() {
        let raw = FileManager::read_to_string(config_path)?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", options.config_path))?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            options.config_path
        );
        let config = Config::default();
        let serialized = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(config_path, &serialized)?;
        config
    };

    config.apply_env_overrides()?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.to_uppercase();
    }
    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.to_uppercase();
    }
    if let Some(batch_size) = options.batch_size {
        config.translation.batch_size = batch_size;
    }
    if let Some(cache_path) = &options.cache_path {
        config.translation.cache_path = cache_path.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn create_provider(config: &Config) -> Box<dyn Provider> {
    match config.translation.provider {
        TranslationProvider::DeepL => {
            let endpoint = if config.translation.endpoint.is_empty() {
                None
            } else {
                Some(config.translation.endpoint.as_str())
            };
            Box::new(DeepL::new(config.translation.api_key.clone(), endpoint))
        }
    }
}
