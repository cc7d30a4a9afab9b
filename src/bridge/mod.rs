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
//! Arrow-to-engine column conversion pipeline.
//!
//! Responsibilities:
//! - Represent foreign input as chunked Arrow columns (`ChunkedColumn`,
//!   `ForeignTable`).
//! - Resolve foreign type descriptors against declared target types.
//! - Fill engine-native columns per type strategy and assemble row batches.
//!
//! Current limitations:
//! - Reads only; no Arrow writing, compression, or IPC framing.
//! - Column matching is exact name-based; there is no schema evolution.

mod assemble;
mod fill;
mod null_map;
mod offsets;
mod resolve;

pub use assemble::{
    RowBatch, RowColumn, TargetField, TargetSchema, foreign_table_to_row_batch,
    record_batches_to_row_batch,
};
pub use null_map::build_null_map;
pub use offsets::translate_list_offsets;
pub use resolve::{MAX_TYPE_NESTING_DEPTH, resolve_internal_type};

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::BridgeError;

/// A logical foreign column split across independently sized chunks. All
/// chunks carry the column's declared Arrow type; the column length is the
/// sum of chunk lengths.
#[derive(Clone, Debug)]
pub struct ChunkedColumn {
    data_type: DataType,
    chunks: Vec<ArrayRef>,
}

impl ChunkedColumn {
    pub fn try_new(
        data_type: DataType,
        chunks: Vec<ArrayRef>,
        column_name: &str,
    ) -> Result<Self, BridgeError> {
        for chunk in &chunks {
            if chunk.data_type() != &data_type {
                return Err(BridgeError::TypeMismatch {
                    column: column_name.to_string(),
                    detail: format!(
                        "chunk type {} differs from column type {}",
                        chunk.data_type(),
                        data_type
                    ),
                });
            }
        }
        Ok(Self { data_type, chunks })
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn chunks(&self) -> &[ArrayRef] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        self.chunks.iter().map(|chunk| chunk.null_count()).sum()
    }
}

/// Ordered name-to-column mapping handed in by the caller per batch.
#[derive(Clone, Debug, Default)]
pub struct ForeignTable {
    columns: Vec<(String, ChunkedColumn)>,
}

impl ForeignTable {
    pub fn new(columns: Vec<(String, ChunkedColumn)>) -> Self {
        Self { columns }
    }

    /// Builds a table from record batches; each batch contributes one chunk
    /// per column. Batches must agree on column count, names, and types.
    pub fn from_record_batches(batches: &[RecordBatch]) -> Result<Self, BridgeError> {
        let Some(first) = batches.first() else {
            return Ok(Self::default());
        };
        let schema = first.schema();

        let mut columns = Vec::with_capacity(schema.fields().len());
        for (index, field) in schema.fields().iter().enumerate() {
            let mut chunks = Vec::with_capacity(batches.len());
            for batch in batches {
                if batch.num_columns() != schema.fields().len()
                    || batch.schema().field(index).name() != field.name()
                {
                    return Err(BridgeError::TypeMismatch {
                        column: field.name().clone(),
                        detail: "record batches disagree on schema shape".to_string(),
                    });
                }
                chunks.push(batch.column(index).clone());
            }
            columns.push((
                field.name().clone(),
                ChunkedColumn::try_new(field.data_type().clone(), chunks, field.name())?,
            ));
        }
        Ok(Self { columns })
    }

    pub fn column_by_name(&self, name: &str) -> Option<&ChunkedColumn> {
        self.columns
            .iter()
            .find(|(column_name, _)| column_name == name)
            .map(|(_, column)| column)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
