use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read, Write};
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

use with_filter::config::LoggingConfig;
use with_filter::subscriber::{self, LoggingError};
use with_filter::{
    Config, ConfigError, ExprError, FilterExpr, MapExpr, Outcome, Pipeline, ReduceExpr, Reduced,
    Terminal,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Expression error: {0}")]
    Expr(#[from] ExprError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    #[error("Invalid value '{input}': {source}")]
    InvalidValue {
        input: String,
        source: ParseFloatError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

#[derive(Parser)]
#[command(name = "with-filter")]
#[command(about = "Filter a list of numbers lazily, then map, reduce or print the survivors")]
struct Cli {
    /// Log filter directive (overrides the config file), e.g. "with_filter=trace"
    #[arg(long, global = true, env = "WITH_FILTER_LOG")]
    log_level: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Filter expression, repeatable and applied in order (e.g. gt:0, even, lt:100)
    #[arg(short, long = "filter", value_name = "EXPR")]
    filters: Vec<FilterExpr>,

    /// Read whitespace-separated numbers from this file ("-" for stdin)
    #[arg(short, long, conflicts_with = "values")]
    input: Option<PathBuf>,

    /// Numbers to filter (read from stdin when neither these nor --input are given)
    #[arg(allow_negative_numbers = true)]
    values: Vec<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform every accepted value (identity, neg, abs, square, sqrt, add:N, mul:N)
    Map {
        op: MapExpr,

        #[command(flatten)]
        source: Source,
    },

    /// Fold the accepted values (sum, product, min, max, count, concat)
    Reduce {
        op: ReduceExpr,

        #[command(flatten)]
        source: Source,
    },

    /// Print every accepted value
    Each {
        #[command(flatten)]
        source: Source,
    },

    /// Run the pipeline described by a TOML config file; any --filter is
    /// appended after the configured ones
    Run {
        /// Path to the configuration file
        #[arg(short, long, default_value = "with-filter.toml")]
        config: PathBuf,

        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let (config, pipeline, values) = match cli.command {
        Commands::Map { op, source } => {
            let values = load_values(source.input, source.values)?;
            (None, build(Terminal::Map(op), source.filters), values)
        }
        Commands::Reduce { op, source } => {
            let values = load_values(source.input, source.values)?;
            (None, build(Terminal::Reduce(op), source.filters), values)
        }
        Commands::Each { source } => {
            let values = load_values(source.input, source.values)?;
            (None, build(Terminal::Each, source.filters), values)
        }
        Commands::Run { config: path, source } => {
            let config = Config::from_file(&path)?;
            let pipeline = source
                .filters
                .into_iter()
                .fold(config.pipeline()?, |p, f| p.filter(f));
            let values = load_values(source.input, source.values)?;
            (Some((path, config)), pipeline, values)
        }
    };

    let (path, logging) = match config {
        Some((path, config)) => (Some(path), config.logging),
        None => (None, LoggingConfig::default()),
    };
    subscriber::init(&with_level(logging, cli.log_level))?;

    // Config loading happens before a subscriber exists, so report it here.
    if let Some(path) = path {
        tracing::info!(path = %path.display(), "loaded pipeline config");
    }

    tracing::debug!(
        filters = pipeline.filters().len(),
        values = values.len(),
        "running pipeline"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut visited = Vec::new();
    let outcome = pipeline.run(&values, |x| visited.push(x));

    match cli.format {
        OutputFormat::Json => {
            let doc = match outcome {
                Outcome::Visited(_) => serde_json::to_string(&visited)?,
                other => serde_json::to_string(&other)?,
            };
            writeln!(out, "{doc}")?;
        }
        OutputFormat::Text => match outcome {
            Outcome::Mapped(values) => {
                for v in values {
                    writeln!(out, "{v}")?;
                }
            }
            Outcome::Visited(_) => {
                for v in visited {
                    writeln!(out, "{v}")?;
                }
            }
            Outcome::Reduced(Reduced::Number(n)) => writeln!(out, "{n}")?,
            Outcome::Reduced(Reduced::Count(n)) => writeln!(out, "{n}")?,
            Outcome::Reduced(Reduced::Text(s)) => writeln!(out, "{s}")?,
            Outcome::Reduced(Reduced::Nothing) => {
                tracing::info!("no value accepted; nothing to reduce");
            }
        },
    }

    Ok(())
}

fn with_level(mut logging: LoggingConfig, level: Option<String>) -> LoggingConfig {
    if let Some(level) = level {
        logging.level = level;
    }
    logging
}

fn build(terminal: Terminal, filters: Vec<FilterExpr>) -> Pipeline {
    filters
        .into_iter()
        .fold(Pipeline::new(terminal), |p, f| p.filter(f))
}

/// Collect input values from the command line, a file, or stdin.
fn load_values(input: Option<PathBuf>, values: Vec<f64>) -> Result<Vec<f64>, AppError> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)?,
        Some(_) => read_stdin()?,
        None if !values.is_empty() => return Ok(values),
        None => read_stdin()?,
    };
    parse_values(&text)
}

fn read_stdin() -> Result<String, AppError> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn parse_values(text: &str) -> Result<Vec<f64>, AppError> {
    text.split_whitespace()
        .map(|token| {
            token.parse().map_err(|source| AppError::InvalidValue {
                input: token.to_string(),
                source,
            })
        })
        .collect()
}
