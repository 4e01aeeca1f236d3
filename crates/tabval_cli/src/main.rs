mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tabval")]
#[command(version, about = "Tabular data validation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a table or a data package
    Validate {
        /// Path to the source: a CSV file, or a descriptor (JSON/YAML/TOML)
        source: String,

        /// Schema file applied to a single-table source
        #[arg(long)]
        schema: Option<String>,

        /// Run exactly these checks (identifiers or groups, comma-separated)
        #[arg(long, value_delimiter = ',')]
        checks: Vec<String>,

        /// Exclude these checks (comma-separated)
        #[arg(long, value_delimiter = ',')]
        skip_checks: Vec<String>,

        /// Maximum number of tables to open
        #[arg(long)]
        table_limit: Option<usize>,

        /// Per-table ceiling on rows read
        #[arg(long)]
        row_limit: Option<usize>,

        /// Per-table ceiling on collected errors
        #[arg(long)]
        error_limit: Option<usize>,

        /// Derive a schema from sampled data when none is supplied
        #[arg(long)]
        infer_schema: bool,

        /// Tolerate a schema covering only a subset of the header
        #[arg(long)]
        infer_fields: bool,

        /// Match schema fields to header columns by name
        #[arg(long)]
        order_fields: bool,

        /// Treat sources as having no header row
        #[arg(long)]
        no_header: bool,

        /// Rows read ahead for inference and sampling
        #[arg(long)]
        sample_size: Option<usize>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Initialize a data package descriptor from resource files
    Init {
        /// Resource files to enumerate
        #[arg(required = true)]
        paths: Vec<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    // Execute command
    match cli.command {
        Commands::Validate {
            source,
            schema,
            checks,
            skip_checks,
            table_limit,
            row_limit,
            error_limit,
            infer_schema,
            infer_fields,
            order_fields,
            no_header,
            sample_size,
            format,
        } => commands::validate::execute(commands::validate::ValidateArgs {
            source,
            schema,
            checks,
            skip_checks,
            table_limit,
            row_limit,
            error_limit,
            infer_schema,
            infer_fields,
            order_fields,
            no_header,
            sample_size,
            format,
        }),

        Commands::Init { paths, output } => {
            commands::init::execute(&paths, output.as_deref())
        }
    }
}
