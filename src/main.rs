use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use schemats::codegen::{CodeGenConfig, CodeGenerator, TypeScriptGenerator};
use schemats::config::Options;
use schemats::source::{JsonSchemaSource, SchemaSource, TableFilter};

#[derive(Parser, Debug)]
#[command(name = "schemats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON schema document describing tables and enums
    schema_file: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "./schema.ts")]
    output: PathBuf,

    /// Convert table and enum names to PascalCase and columns to camelCase
    #[arg(long)]
    camel_case: bool,

    /// Omit the generated-file banner
    #[arg(long)]
    no_header: bool,

    /// Module the generated code imports marker types from
    #[arg(long, default_value = "./core")]
    runtime_module: String,

    /// Path to .env file for naming options
    #[arg(long, default_value = "./.env")]
    env_file: PathBuf,

    /// Comma-separated list of tables to include (default: all)
    #[arg(long, value_delimiter = ',')]
    tables: Option<Vec<String>>,

    /// Comma-separated list of tables to exclude
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        error!(error = ?e, "Fatal error");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("schemats v{}", env!("CARGO_PKG_VERSION"));
    info!(
        schema_file = ?cli.schema_file,
        output = ?cli.output,
        runtime_module = ?cli.runtime_module,
        "Starting code generation"
    );

    let mut options = Options::load(&cli.env_file).context("Failed to load naming options")?;
    if cli.camel_case {
        options = options.with_camel_case(true);
    }
    debug!(options = ?options, "Naming options");

    let filter = TableFilter {
        include: cli.tables,
        exclude: cli.exclude,
    };

    if !filter.is_empty() {
        debug!(filter = ?filter, "Table filter configured");
    }

    let mut source = JsonSchemaSource::new(&cli.schema_file, options);
    let schema = source
        .load(&filter)
        .with_context(|| format!("Failed to load schema from {}", cli.schema_file.display()))?;

    if schema.tables.is_empty() && schema.enums.is_empty() {
        warn!("No tables or enums found after filtering");
        return Ok(());
    }

    for table in &schema.tables {
        debug!(table = ?table.name, columns = ?table.columns.len(), "Table");
    }

    let codegen_config = CodeGenConfig::new(cli.output)
        .with_write_header(!cli.no_header)
        .with_runtime_module(cli.runtime_module);
    debug!(codegen_config = ?codegen_config, "Code generation config");

    let path = TypeScriptGenerator::new()
        .generate(&schema, &options, &codegen_config)
        .context("Failed to generate TypeScript code")?;

    info!(
        path = ?path,
        tables = schema.tables.len(),
        enums = schema.enums.len(),
        "Done"
    );

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
