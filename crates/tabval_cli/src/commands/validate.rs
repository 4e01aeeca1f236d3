use std::path::Path;

use anyhow::{Context, Result};
use tabval_core::{Report, Resource, Source, ValidateOptions};
use tabval_engine::validate;
use tabval_parser::{detect_format, parse_file, parse_schema_file};
use tracing::info;

use crate::output;

pub struct ValidateArgs {
    pub source: String,
    pub schema: Option<String>,
    pub checks: Vec<String>,
    pub skip_checks: Vec<String>,
    pub table_limit: Option<usize>,
    pub row_limit: Option<usize>,
    pub error_limit: Option<usize>,
    pub infer_schema: bool,
    pub infer_fields: bool,
    pub order_fields: bool,
    pub no_header: bool,
    pub sample_size: Option<usize>,
    pub format: String,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating source: {}", args.source);

    let mut options = ValidateOptions::new()
        .with_infer_schema(args.infer_schema)
        .with_infer_fields(args.infer_fields)
        .with_order_fields(args.order_fields);
    if !args.checks.is_empty() {
        options = options.with_checks(args.checks.clone());
    }
    if !args.skip_checks.is_empty() {
        options = options.with_skip_checks(args.skip_checks.clone());
    }
    if let Some(limit) = args.table_limit {
        options = options.with_table_limit(limit);
    }
    if let Some(limit) = args.row_limit {
        options = options.with_row_limit(limit);
    }
    if let Some(limit) = args.error_limit {
        options = options.with_error_limit(limit);
    }
    if let Some(sample_size) = args.sample_size {
        options = options.with_sample_size(sample_size);
    }
    if args.no_header {
        options = options.with_header_row(None);
    }

    let report = match resolve_source(&args)? {
        Resolved::Source(source) => validate(&source, options)?,
        Resolved::Unparsable(warning) => Report::compose(Vec::new(), vec![warning], 0.0),
    };

    output::print_validation_report(&report, &args.format);

    if !report.valid {
        std::process::exit(1);
    }

    Ok(())
}

enum Resolved {
    Source(Source),
    /// The descriptor could not be parsed; reported as a warning, not a
    /// hard failure
    Unparsable(String),
}

fn resolve_source(args: &ValidateArgs) -> Result<Resolved> {
    let path = Path::new(&args.source);

    // Descriptor extensions resolve to a package; anything else is a
    // single-table source.
    if let Ok(format) = detect_format(path) {
        let source = match parse_file(path) {
            Ok(descriptor) => {
                let base_dir = path.parent().unwrap_or(Path::new("."));
                descriptor
                    .into_source(base_dir)
                    .with_context(|| format!("Failed to resolve descriptor: {}", args.source))?
            }
            Err(e) => {
                return Ok(Resolved::Unparsable(format!(
                    "Unable to parse {} descriptor \"{}\": {}",
                    format.name(),
                    args.source,
                    e
                )));
            }
        };
        return Ok(Resolved::Source(source));
    }

    let mut resource = Resource::from_path(path);
    if let Some(schema_path) = &args.schema {
        let schema = parse_schema_file(Path::new(schema_path))
            .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;
        resource = resource.with_schema(schema);
    }
    Ok(Resolved::Source(Source::table(resource)))
}
