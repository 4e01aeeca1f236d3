//! Cross-table reference indexes for foreign key validation.
//!
//! Foreign key checks need the referenced resource fully materialized. The
//! resolver builds a lookup index per (resource, field-tuple) on demand with
//! one full pass over the reference stream, independent of that resource's
//! own row and error limits, and memoizes it for the rest of the run.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tabval_core::{Dialect, Resource, ValidateOptions};
use tabval_stream::open;
use tracing::debug;

/// The outcome of materializing one reference index.
#[derive(Debug)]
pub enum ReferenceState {
    /// Key tuples present in the reference resource
    Index(HashSet<Vec<String>>),
    /// The reference resource could not serve lookups; the message explains
    /// why and is embedded into every dependent row's error
    Invalid(String),
}

/// Builds and memoizes reference indexes for one validation run.
///
/// Holds its own copies of the resource definitions so reference streams can
/// be re-opened from scratch (validation streams are not restartable).
pub struct ForeignKeyResolver {
    resources: HashMap<String, Resource>,
    header_row: Option<usize>,
    sample_size: usize,
    cache: Mutex<HashMap<(String, Vec<String>), Arc<ReferenceState>>>,
}

impl ForeignKeyResolver {
    /// Prepares a resolver over all resources of the source.
    pub fn new(resources: &[Resource], options: &ValidateOptions) -> Self {
        Self {
            resources: resources
                .iter()
                .map(|resource| (resource.name.clone(), resource.clone()))
                .collect(),
            header_row: options.header_row,
            sample_size: options.sample_size,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the reference index for (resource, field-tuple), building it
    /// on first use.
    pub fn lookup(&self, resource_name: &str, fields: &[String]) -> Arc<ReferenceState> {
        let key = (resource_name.to_string(), fields.to_vec());
        let mut cache = self.cache.lock().expect("resolver cache poisoned");
        if let Some(state) = cache.get(&key) {
            return Arc::clone(state);
        }
        debug!(resource = resource_name, ?fields, "building reference index");
        let state = Arc::new(self.build(resource_name, fields));
        cache.insert(key, Arc::clone(&state));
        state
    }

    fn build(&self, resource_name: &str, fields: &[String]) -> ReferenceState {
        let Some(resource) = self.resources.get(resource_name) else {
            return ReferenceState::Invalid(format!(
                "Reference table \"{}\" is not present in the source",
                resource_name
            ));
        };

        let dialect = resource.dialect.clone().unwrap_or(Dialect {
            header_row: self.header_row,
            ..Dialect::default()
        });
        let mut stream = match open(resource, &dialect, self.sample_size) {
            Ok(stream) => stream,
            Err(e) => return ReferenceState::Invalid(e.to_string()),
        };

        // Reference fields resolve against the reference schema when there
        // is one, otherwise against its header row.
        let names: Vec<String> = match &resource.schema {
            Some(schema) => schema.fields.iter().map(|f| f.name.clone()).collect(),
            None => match stream.headers() {
                Some(headers) => headers.to_vec(),
                None => {
                    return ReferenceState::Invalid(format!(
                        "Reference table \"{}\" has no schema and no header row",
                        resource_name
                    ));
                }
            },
        };

        let mut positions = Vec::with_capacity(fields.len());
        for field in fields {
            match names.iter().position(|name| name == field) {
                Some(position) => positions.push(position),
                None => {
                    return ReferenceState::Invalid(format!(
                        "Field \"{}\" is not in the reference table",
                        field
                    ));
                }
            }
        }

        let mut index = HashSet::new();
        loop {
            match stream.next_row() {
                Some(Ok((row_number, row))) => {
                    if row.len() != names.len() {
                        return ReferenceState::Invalid(format!(
                            "Row length {} doesn't match fields count {} for row \"{}\"",
                            row.len(),
                            names.len(),
                            row_number
                        ));
                    }
                    index.insert(
                        positions
                            .iter()
                            .map(|&position| row[position].clone().unwrap_or_default())
                            .collect(),
                    );
                }
                Some(Err(e)) => return ReferenceState::Invalid(e.to_string()),
                None => break,
            }
        }

        ReferenceState::Index(index)
    }
}
