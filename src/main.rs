//! # recolumn Converter
//!
//! A command-line tool for translating schemas between the record model's
//! JSON form and Parquet message-type text.
//!
//! ## Usage
//!
//! ```bash
//! # Lower a record schema to a Parquet message type
//! recolumn to-parquet schema.json
//!
//! # Reconstruct a record schema from Parquet message text
//! recolumn to-record schema.parquet.txt -o schema.json
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use parquet::schema::parser::parse_message_type;
use parquet::schema::printer::print_schema;

use recolumn::convert::{to_parquet_schema, to_record_schema};
use recolumn::model::RecordSchema;

/// recolumn - Record Schema / Parquet Schema Translator
#[derive(Parser)]
#[command(name = "recolumn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower a record schema (JSON) to a Parquet message type
    ToParquet {
        /// Input record schema JSON file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Reconstruct a record schema (JSON) from a Parquet message type
    ToRecord {
        /// Input Parquet message-type text file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::ToParquet { input, output } => run_to_parquet(input, output),
        Commands::ToRecord { input, output } => run_to_record(input, output),
    }
}

/// Lower a record schema JSON file to Parquet message text
fn run_to_parquet(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let text = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let schema: RecordSchema = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a record schema", input.display()))?;

    let message = to_parquet_schema(&schema)
        .with_context(|| format!("cannot lower {}", input.display()))?;
    info!(
        "lowered record schema '{}' with {} top-level fields",
        message.name(),
        message.get_fields().len()
    );

    let mut rendered = Vec::new();
    print_schema(&mut rendered, &message);
    emit(&String::from_utf8_lossy(&rendered), output)
}

/// Reconstruct a record schema from a Parquet message text file
fn run_to_record(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let text = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let message = parse_message_type(&text)
        .with_context(|| format!("{} is not a Parquet message type", input.display()))?;

    let schema = to_record_schema(&message)
        .with_context(|| format!("cannot reconstruct {}", input.display()))?;
    info!("reconstructed record schema from message '{}'", message.name());

    let rendered = serde_json::to_string_pretty(&schema)?;
    emit(&rendered, output)
}

fn emit(rendered: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
