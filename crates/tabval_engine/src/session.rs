//! Per-resource streaming state.
//!
//! A table session owns its resource's stream and every per-check state for
//! the duration of one table's validation: it opens the stream, resolves the
//! schema and header slots, runs the header phase, then drives body rows
//! through the selected checks under the limit tracker.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tabval_core::{
    Dialect, Field, RawRow, Resource, Schema, TableReport, ValidateOptions, ValidationError,
    round_time,
};
use tabval_stream::{RowStream, format_of, open, scheme_of};
use tracing::debug;

use crate::cell::{Cell, HeaderSlot};
use crate::check::{Check as _, CheckContext, CheckType};
use crate::infer::{infer_field_type, infer_schema};
use crate::limits::LimitTracker;
use crate::registry::{CheckInstance, CheckSetup, SelectedCheck};
use crate::relations::ForeignKeyResolver;

/// Streaming state for one resource.
pub struct TableSession<'a> {
    resource: &'a Resource,
    options: &'a ValidateOptions,
    selection: &'a [SelectedCheck<'a>],
    relations: &'a Arc<ForeignKeyResolver>,
}

impl<'a> TableSession<'a> {
    pub fn new(
        resource: &'a Resource,
        options: &'a ValidateOptions,
        selection: &'a [SelectedCheck<'a>],
        relations: &'a Arc<ForeignKeyResolver>,
    ) -> Self {
        Self {
            resource,
            options,
            selection,
            relations,
        }
    }

    /// Runs the full inspection of this table and reports it.
    ///
    /// Open and iteration failures become table-level errors; this method
    /// never fails the run.
    pub fn run(self, limits: &mut LimitTracker) -> TableReport {
        let start = Instant::now();
        let label = self.resource.label();
        debug!(source = %label, "inspecting table");

        let dialect = self.resource.dialect.clone().unwrap_or(Dialect {
            header_row: self.options.header_row,
            ..Dialect::default()
        });

        let mut stream = match open(self.resource, &dialect, self.options.sample_size) {
            Ok(stream) => stream,
            Err(e) => {
                let error = ValidationError::new(e.kind.code(), e.message).with_check(e.kind.code());
                let mut report = TableReport::assemble(label, vec![error], 0, round_time(start.elapsed()));
                report.scheme = scheme_of(self.resource).to_string();
                report.format = format_of(self.resource);
                report.encoding = self
                    .resource
                    .encoding
                    .clone()
                    .unwrap_or_else(|| "utf-8".to_string());
                report.schema = self
                    .resource
                    .schema
                    .as_ref()
                    .map(|_| "table-schema".to_string());
                return report;
            }
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        let headers_raw: Option<Vec<String>> = stream.headers().map(|headers| headers.to_vec());
        let sample: Vec<RawRow> = stream.sample().to_vec();

        // Schema resolution: declared, inferred, or none. A schema that
        // fails its own sanity check degrades to a schema-error and the
        // table continues with structure checks only.
        let schema_selected = self
            .selection
            .iter()
            .any(|check| check.check_type == CheckType::Schema);
        let mut schema = self.resource.schema.clone();
        if schema.is_none() && schema_selected && self.options.infer_schema {
            schema = Some(infer_schema(headers_raw.as_deref(), &sample));
        }
        if let Some(resolved) = &schema {
            let issues = resolved.issues();
            if !issues.is_empty() {
                for issue in issues {
                    errors.push(
                        ValidationError::new("schema-error", issue).with_check("schema-error"),
                    );
                }
                schema = None;
            }
        }
        let selection: Vec<&SelectedCheck<'_>> = self
            .selection
            .iter()
            .filter(|check| schema.is_some() || check.check_type != CheckType::Schema)
            .collect();

        let header_slots = header_slots(headers_raw.as_deref(), schema.as_ref(), &sample);
        let (assigned, leftovers) = assign_fields(&header_slots, schema.as_ref(), &sample, self.options);

        let mut head_cells: Vec<Cell> = Vec::with_capacity(header_slots.len() + leftovers.len());
        for (index, slot) in header_slots.iter().enumerate() {
            head_cells.push(Cell {
                column_number: index + 1,
                header: slot.clone(),
                field: assigned[index].clone(),
                value: None,
            });
        }
        for (offset, field) in leftovers.into_iter().enumerate() {
            head_cells.push(Cell {
                column_number: header_slots.len() + offset + 1,
                header: HeaderSlot::Missing,
                field: Some(field),
                value: None,
            });
        }

        let setup = CheckSetup {
            resource_name: &self.resource.name,
            schema: schema.as_ref(),
            relations: Some(self.relations),
        };
        let mut instances: Vec<CheckInstance> = selection
            .iter()
            .map(|check| check.instantiate(&setup))
            .collect();

        // Header phase. Errors keep whatever row number the check supplied;
        // the built-ins supply none, making them table-level.
        if !head_cells.is_empty() {
            for instance in instances
                .iter_mut()
                .filter(|instance| instance.context == CheckContext::Head)
            {
                let found = instance.check.check_headers(&mut head_cells, &sample);
                collect(&mut errors, found, &instance.code);
            }
        }

        let colmap: HashMap<usize, (HeaderSlot, Option<Field>)> = head_cells
            .iter()
            .map(|cell| (cell.column_number, (cell.header.clone(), cell.field.clone())))
            .collect();
        let header_width = header_slots.len();

        // Body phase.
        let mut row_count = 0;
        if !limits.error_limit_reached(&label, errors.len()) {
            loop {
                let (row_number, row) = match stream.next_row() {
                    Some(Ok(next)) => next,
                    Some(Err(e)) => {
                        errors.push(
                            ValidationError::new("source-error", e.to_string())
                                .with_check("source-error"),
                        );
                        break;
                    }
                    None => break,
                };
                row_count = row_number;

                let mut cells = body_cells(&colmap, header_width, &row);
                for instance in instances
                    .iter_mut()
                    .filter(|instance| instance.context == CheckContext::Body)
                {
                    if cells.is_empty() {
                        break;
                    }
                    let found = instance.check.check_row(row_number, &mut cells);
                    collect(&mut errors, found, &instance.code);
                }

                if limits.row_limit_reached(&label, row_number) {
                    break;
                }
                if limits.error_limit_reached(&label, errors.len()) {
                    break;
                }
            }
        }

        limits.truncate_errors(&mut errors);
        errors.sort_by_key(|error| {
            (
                error.row_number.unwrap_or(0),
                error.column_number.unwrap_or(0),
            )
        });

        let mut report = TableReport::assemble(label, errors, row_count, round_time(start.elapsed()));
        report.headers = headers_raw;
        report.scheme = stream.scheme().to_string();
        report.format = stream.format().to_string();
        report.encoding = stream.encoding().to_string();
        report.schema = schema.map(|_| "table-schema".to_string());
        report
    }
}

fn collect(errors: &mut Vec<ValidationError>, found: Vec<ValidationError>, code: &str) {
    for mut error in found {
        if error.check.is_empty() {
            error.check = code.to_string();
        }
        errors.push(error);
    }
}

/// Resolves the effective header slots.
///
/// With a header row, each slot carries its (possibly blank) name. Without
/// one, columns take their schema field's name, so a headerless table with a
/// schema validates cleanly, and degrade to blank slots otherwise, over the
/// width the sample establishes.
fn header_slots(
    headers: Option<&[String]>,
    schema: Option<&Schema>,
    sample: &[RawRow],
) -> Vec<HeaderSlot> {
    match headers {
        Some(headers) => headers
            .iter()
            .map(|header| {
                if header.trim().is_empty() {
                    HeaderSlot::Blank
                } else {
                    HeaderSlot::Name(header.clone())
                }
            })
            .collect(),
        None => {
            let width = schema
                .map(|schema| schema.fields.len())
                .filter(|width| *width > 0)
                .or_else(|| sample.first().map(|row| row.len()))
                .unwrap_or(0);
            (0..width)
                .map(|index| match schema.and_then(|schema| schema.fields.get(index)) {
                    Some(field) => HeaderSlot::Name(field.name.clone()),
                    None => HeaderSlot::Blank,
                })
                .collect()
        }
    }
}

/// Matches schema fields to header columns.
///
/// Positional by default; by name when `order_fields` is set. With
/// `infer_fields`, header columns the schema doesn't cover get a field
/// inferred from the sample. Returns the per-column assignment plus the
/// fields left without a column (reported by `missing-header`).
fn assign_fields(
    header_slots: &[HeaderSlot],
    schema: Option<&Schema>,
    sample: &[RawRow],
    options: &ValidateOptions,
) -> (Vec<Option<Field>>, Vec<Field>) {
    let mut assigned: Vec<Option<Field>> = vec![None; header_slots.len()];
    let Some(schema) = schema else {
        return (assigned, Vec::new());
    };

    let mut pool: Vec<Field> = schema.fields.clone();
    if options.order_fields {
        for (index, slot) in header_slots.iter().enumerate() {
            if let Some(header) = slot.name() {
                if let Some(position) = pool.iter().position(|field| field.name == header) {
                    assigned[index] = Some(pool.remove(position));
                }
            }
        }
    }
    for slot in assigned.iter_mut() {
        if slot.is_none() && !pool.is_empty() {
            *slot = Some(pool.remove(0));
        }
    }

    if options.infer_fields {
        for (index, slot) in assigned.iter_mut().enumerate() {
            if slot.is_none() {
                let name = header_slots[index]
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("field{}", index + 1));
                let field_type = infer_field_type(
                    sample
                        .iter()
                        .filter_map(|row| row.get(index))
                        .filter_map(|value| value.as_deref()),
                );
                *slot = Some(Field::new(name, field_type));
            }
        }
    }

    (assigned, pool)
}

/// Builds the cells for one data row by zipping the header columns against
/// the row's values.
fn body_cells(
    colmap: &HashMap<usize, (HeaderSlot, Option<Field>)>,
    header_width: usize,
    row: &[Option<String>],
) -> Vec<Cell> {
    let width = header_width.max(row.len());
    (1..=width)
        .map(|column_number| {
            let (header, field) = colmap
                .get(&column_number)
                .cloned()
                .unwrap_or((HeaderSlot::Missing, None));
            Cell {
                column_number,
                header,
                field,
                value: row.get(column_number - 1).cloned().flatten(),
            }
        })
        .collect()
}
