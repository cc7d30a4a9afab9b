// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
//! Batch assembly orchestration.
//!
//! For every column of the target schema, in schema order: locate the
//! foreign column by name, resolve the internal type, create and fill an
//! empty column, cast to the exact declared type, and record the row count.
//! Conversion is all-or-nothing; a failed column aborts the whole batch.

use arrow::record_batch::RecordBatch;

use crate::chunkbridge_logging::debug;
use crate::column::{Column, cast_column, create_column};
use crate::common::types::InternalType;
use crate::error::BridgeError;

use super::fill::fill_column_from_foreign;
use super::resolve::resolve_internal_type;
use super::{ChunkedColumn, ForeignTable};

/// One column of the declared target schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetField {
    pub name: String,
    pub data_type: InternalType,
}

impl TargetField {
    pub fn new(name: impl Into<String>, data_type: InternalType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Declared output schema; columns are converted in this order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetSchema {
    pub fields: Vec<TargetField>,
}

impl TargetSchema {
    pub fn new(fields: Vec<TargetField>) -> Self {
        Self { fields }
    }
}

/// A converted output column carrying its declared type.
#[derive(Clone, Debug, PartialEq)]
pub struct RowColumn {
    pub name: String,
    pub data_type: InternalType,
    pub column: Column,
}

/// Ordered collection of equal-length converted columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowBatch {
    columns: Vec<RowColumn>,
    num_rows: usize,
}

impl RowBatch {
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[RowColumn] {
        &self.columns
    }

    pub fn column_by_name(&self, name: &str) -> Option<&RowColumn> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Converts a foreign table into a row batch shaped by the target schema.
/// `format_name` names the outer data format ("Arrow", "Parquet", ...) for
/// diagnostics only.
pub fn foreign_table_to_row_batch(
    table: &ForeignTable,
    target: &TargetSchema,
    format_name: &str,
) -> Result<RowBatch, BridgeError> {
    let mut columns = Vec::with_capacity(target.fields.len());
    let mut num_rows: Option<usize> = None;

    for field in &target.fields {
        let foreign = table
            .column_by_name(&field.name)
            .ok_or_else(|| BridgeError::MissingColumn {
                column: field.name.clone(),
                format: format_name.to_string(),
            })?;

        let column = convert_column(foreign, field, format_name)?;
        let rows = column.len();
        match num_rows {
            None => num_rows = Some(rows),
            Some(expected) if expected != rows => {
                return Err(BridgeError::RowCountMismatch {
                    column: field.name.clone(),
                    expected,
                    actual: rows,
                });
            }
            Some(_) => {}
        }
        columns.push(RowColumn {
            name: field.name.clone(),
            data_type: field.data_type.clone(),
            column,
        });
    }

    Ok(RowBatch {
        columns,
        num_rows: num_rows.unwrap_or(0),
    })
}

/// Converts record batches directly; each batch contributes one chunk per
/// column.
pub fn record_batches_to_row_batch(
    batches: &[RecordBatch],
    target: &TargetSchema,
    format_name: &str,
) -> Result<RowBatch, BridgeError> {
    let table = ForeignTable::from_record_batches(batches)?;
    foreign_table_to_row_batch(&table, target, format_name)
}

fn convert_column(
    foreign: &ChunkedColumn,
    field: &TargetField,
    format_name: &str,
) -> Result<Column, BridgeError> {
    let resolved = resolve_internal_type(
        foreign.data_type(),
        &field.data_type,
        &field.name,
        format_name,
    )?;
    let mut column = create_column(&resolved);
    fill_column_from_foreign(foreign, &mut column, &field.name, format_name, false)?;
    let column = cast_column(column, &field.data_type, &field.name)?;
    debug!(
        "converted column: name={}, foreign_type={}, resolved_type={}, declared_type={}, rows={}",
        field.name,
        foreign.data_type(),
        resolved,
        field.data_type,
        column.len()
    );
    Ok(column)
}
