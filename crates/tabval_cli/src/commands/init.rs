use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use tabval_parser::init_datapackage;
use tracing::info;

use crate::output;

pub fn execute(paths: &[String], output_path: Option<&str>) -> Result<()> {
    info!("Initializing descriptor for {} resource(s)", paths.len());

    let descriptor = init_datapackage(paths);
    let json = serde_json::to_string_pretty(&descriptor)
        .context("Failed to serialize descriptor to JSON")?;

    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", path))?;
        file.write_all(b"\n")?;
        output::print_success(&format!("Descriptor written to: {}", path));
    } else {
        println!("{}", json);
    }

    Ok(())
}
