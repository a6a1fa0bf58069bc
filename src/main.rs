// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use tradutor::app_config::{self, Config, REQUIRED_KEYS};
use tradutor::{Controller, RunOutcome};

/// Exit status when required configuration is missing or invalid
const EXIT_CONFIG: u8 = 1;
/// Exit status when no text could be extracted from the page
const EXIT_EXTRACTION: u8 = 2;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for tradutor
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// tradutor - translate web articles with AI (Azure OpenAI)
#[derive(Parser, Debug)]
#[command(name = "tradutor")]
#[command(version)]
#[command(about = "Translate web articles using AI (Azure OpenAI)")]
#[command(long_about = "tradutor downloads an article, strips its HTML to plain text and asks an Azure OpenAI deployment to translate it into markdown.

EXAMPLES:
    tradutor \"https://dev.to/artigo\"                        # Translate to Portuguese, print to stdout
    tradutor \"https://dev.to/artigo\" -l english             # Translate to English
    tradutor \"https://dev.to/artigo\" -o artigo_pt.md        # Save the translation to a file
    tradutor completions bash > tradutor.bash               # Generate bash completions

CONFIGURATION (environment or a .env file):
    AZURE_OPENAI_ENDPOINT       Resource endpoint (required)
    AZURE_OPENAI_API_KEY        API key (required)
    AZURE_OPENAI_API_VERSION    API version (default: 2025-01-01-preview)
    AZURE_OPENAI_DEPLOYMENT     Deployment name (default: gpt-4o-mini)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URL of the article to translate
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Target language
    #[arg(short, long, default_value = "português")]
    lang: String,

    /// File to save the translation to
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI colour for log level
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Accept everything here; the effective level is applied with set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "tradutor", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    // Variables already present in the environment take precedence over .env
    let dotenv_path = dotenvy::dotenv().ok();

    let mut config = Config::from_env();
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.into());

    if let Some(path) = dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }

    // Configuration is checked before anything else, even when no URL is given
    if let Err(e) = config.validate() {
        error!("{}", e);
        info!(
            "Set the environment variables {} before running (see .env.example).",
            REQUIRED_KEYS.join(" and ")
        );
        return Ok(ExitCode::from(EXIT_CONFIG));
    }

    let Some(url) = cli.url else {
        CommandLineOptions::command().print_help()?;
        println!();
        println!("Example:");
        println!("  tradutor \"https://dev.to/artigo\" -l português -o artigo_pt.md");
        return Ok(ExitCode::SUCCESS);
    };

    let controller = Controller::with_config(&config)?.with_progress(true);

    match controller.run(&url, &cli.lang, cli.output.as_deref()).await? {
        RunOutcome::Translated(translation) => {
            println!("{}", translation);
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Saved(_) => Ok(ExitCode::SUCCESS),
        RunOutcome::ExtractionFailed(_) => {
            error!("Translation skipped: no text could be extracted from {}", url);
            Ok(ExitCode::from(EXIT_EXTRACTION))
        }
    }
}
