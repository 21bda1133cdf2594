// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::{Controller, parse_mixin_pairs};
use crate::file_utils::FileManager;
use crate::protocols::Protocol;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod pipeline;
mod protocols;
mod registry;
mod validation;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert content between registered formats (default command)
    #[command(alias = "convert")]
    Convert(ConvertArgs),

    /// Generate shell completions for yafc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (derived from the input and output format in
    /// directory mode)
    #[arg(short, long)]
    output_path: Option<PathBuf>,

    /// Input format name (inferred from the file extension if omitted)
    #[arg(long)]
    from: Option<String>,

    /// Output format name (inferred from the output extension if omitted)
    #[arg(long)]
    to: Option<String>,

    /// Fields to merge into the payload before validation (key=value,
    /// repeatable; values parsed as JSON when possible)
    #[arg(short = 'x', long = "mixin")]
    mixin: Vec<String>,

    /// Fields the payload must carry to pass validation (repeatable)
    #[arg(short, long = "require")]
    require: Vec<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// yafc - Yet Another Format Converter
///
/// Converts structured content between registered formats (json, yaml,
/// passthrough text), with optional metadata injection and validation.
#[derive(Parser, Debug)]
#[command(name = "yafc")]
#[command(author = "yafc contributors")]
#[command(version = "1.0.0")]
#[command(about = "Pluggable format conversion tool")]
#[command(long_about = "yafc converts content between registered formats, merging optional
mixin fields into each payload and validating it before encoding.

EXAMPLES:
    yafc data.json -o data.yaml                # Convert JSON to YAML
    yafc data.yaml -o out.json --pretty        # Pretty-printed JSON output
    yafc data.json -o out.json -x version=2    # Inject a field during conversion
    yafc data.json -o out.json -r id -r name   # Require fields to be present
    yafc --from json --to yaml ./payloads/     # Convert a whole directory
    yafc completions bash > yafc.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.

SUPPORTED FORMATS:
    json    - JSON via serde_json (extension .json)
    yaml    - YAML via serde_yaml (extensions .yaml, .yml)
    default - passthrough plain text (no extension)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output_path: Option<PathBuf>,

    /// Input format name
    #[arg(long)]
    from: Option<String>,

    /// Output format name
    #[arg(long)]
    to: Option<String>,

    /// Fields to merge into the payload before validation (key=value)
    #[arg(short = 'x', long = "mixin")]
    mixin: Vec<String>,

    /// Fields the payload must carry to pass validation
    #[arg(short, long = "require")]
    require: Vec<String>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yafc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                output_path: cli.output_path,
                from: cli.from,
                to: cli.to,
                mixin: cli.mixin,
                require: cli.require,
                pretty: cli.pretty,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args).await
        }
    }
}

async fn run_convert(options: ConvertArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(from) = &options.from {
        config.input_format = Some(from.clone());
    }

    if let Some(to) = &options.to {
        config.output_format = Some(to.clone());
    }

    if options.pretty {
        config.pretty_json = true;
    }

    if !options.mixin.is_empty() {
        let cli_mixin = parse_mixin_pairs(&options.mixin)?;
        // CLI mixin fields override config-file mixin fields
        for (key, value) in cli_mixin {
            config.mixin.insert(key, value);
        }
    }

    for field in &options.require {
        if !config.required_fields.contains(field) {
            config.required_fields.push(field.clone());
        }
    }

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // If log level was not set via command line, update it from config now
        log::set_max_level(level_filter(&config.log_level));
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    // Create controller
    let controller = Controller::with_config(config.clone())?;

    // Run the controller with the input file(s)
    if options.input_path.is_file() {
        let output_path = match &options.output_path {
            Some(path) => path.clone(),
            None => {
                // Derive the output path from the output format's extension
                let output_name = config
                    .output_format
                    .as_deref()
                    .ok_or_else(|| anyhow!("Either -o or --to is required for file conversion"))?;
                let output_protocol = controller.registry().get_protocol(output_name)?;

                let extension = output_protocol.extension();
                if extension.is_empty() {
                    return Err(anyhow!(
                        "Output format '{}' has no file extension; use -o to name the output file",
                        output_name
                    ));
                }

                FileManager::generate_output_path(
                    &options.input_path,
                    options.input_path.parent().unwrap_or(Path::new(".")),
                    extension,
                )
            }
        };

        controller
            .run(&options.input_path, &output_path, options.force_overwrite)
            .await
    } else if options.input_path.is_dir() {
        controller
            .run_folder(&options.input_path, options.force_overwrite)
            .await
    } else {
        Err(anyhow!("Input path does not exist: {:?}", options.input_path))
    }
}
