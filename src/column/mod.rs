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
//! Engine-native column storage.
//!
//! Responsibilities:
//! - Contiguous typed value buffers, one variant per internal type.
//! - Nullable columns pair the value column with a one-byte-per-row null map.
//! - Array columns pair a nested column with a `(rows + 1)`-length offsets
//!   buffer starting at 0.
//! - `create_column` manufactures an empty column for an internal type;
//!   `cast_column` adapts a filled column to the declared type.

mod cast;

pub use cast::cast_column;

use crate::common::types::InternalType;

/// Variable-length string storage: a contiguous character buffer holding
/// null-terminated values, plus the end offset of each row. `offsets[i]`
/// answers "end position of row i" directly.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StringColumn {
    pub chars: Vec<u8>,
    pub offsets: Vec<u64>,
}

impl StringColumn {
    /// Byte range of row `row` excluding the terminator, or `None` when the
    /// row is out of range or the storage is inconsistent.
    pub fn value(&self, row: usize) -> Option<&[u8]> {
        let end = (*self.offsets.get(row)? as usize).checked_sub(1)?;
        let start = if row == 0 {
            0
        } else {
            self.offsets[row - 1] as usize
        };
        self.chars.get(start..end)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Decimal128Column {
    pub precision: u8,
    pub scale: i8,
    pub values: Vec<i128>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayColumn {
    pub values: Box<Column>,
    /// `rows + 1` cumulative end positions, `offsets[0] == 0`.
    pub offsets: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NullableColumn {
    pub values: Box<Column>,
    /// One byte per row: 1 = null, 0 = present. Always `values.len()` long.
    pub null_map: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    UInt8(Vec<u8>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Date(Vec<u16>),
    DateTime(Vec<u32>),
    String(StringColumn),
    Decimal128(Decimal128Column),
    Array(ArrayColumn),
    Nullable(NullableColumn),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Self::UInt8(data) => data.len(),
            Self::UInt16(data) => data.len(),
            Self::UInt32(data) => data.len(),
            Self::UInt64(data) => data.len(),
            Self::Int8(data) => data.len(),
            Self::Int16(data) => data.len(),
            Self::Int32(data) => data.len(),
            Self::Int64(data) => data.len(),
            Self::Float32(data) => data.len(),
            Self::Float64(data) => data.len(),
            Self::Date(data) => data.len(),
            Self::DateTime(data) => data.len(),
            Self::String(col) => col.offsets.len(),
            Self::Decimal128(col) => col.values.len(),
            Self::Array(col) => col.offsets.len().saturating_sub(1),
            Self::Nullable(col) => col.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logical type of this column's storage.
    pub fn data_type(&self) -> InternalType {
        match self {
            Self::UInt8(_) => InternalType::UInt8,
            Self::UInt16(_) => InternalType::UInt16,
            Self::UInt32(_) => InternalType::UInt32,
            Self::UInt64(_) => InternalType::UInt64,
            Self::Int8(_) => InternalType::Int8,
            Self::Int16(_) => InternalType::Int16,
            Self::Int32(_) => InternalType::Int32,
            Self::Int64(_) => InternalType::Int64,
            Self::Float32(_) => InternalType::Float32,
            Self::Float64(_) => InternalType::Float64,
            Self::Date(_) => InternalType::Date,
            Self::DateTime(_) => InternalType::DateTime,
            Self::String(_) => InternalType::String,
            Self::Decimal128(col) => InternalType::Decimal128 {
                precision: col.precision,
                scale: col.scale,
            },
            Self::Array(col) => InternalType::Array(Box::new(col.values.data_type())),
            Self::Nullable(col) => InternalType::Nullable(Box::new(col.values.data_type())),
        }
    }
}

/// Manufactures an empty column of the given internal type.
pub fn create_column(data_type: &InternalType) -> Column {
    match data_type {
        InternalType::UInt8 => Column::UInt8(Vec::new()),
        InternalType::UInt16 => Column::UInt16(Vec::new()),
        InternalType::UInt32 => Column::UInt32(Vec::new()),
        InternalType::UInt64 => Column::UInt64(Vec::new()),
        InternalType::Int8 => Column::Int8(Vec::new()),
        InternalType::Int16 => Column::Int16(Vec::new()),
        InternalType::Int32 => Column::Int32(Vec::new()),
        InternalType::Int64 => Column::Int64(Vec::new()),
        InternalType::Float32 => Column::Float32(Vec::new()),
        InternalType::Float64 => Column::Float64(Vec::new()),
        InternalType::Date => Column::Date(Vec::new()),
        InternalType::DateTime => Column::DateTime(Vec::new()),
        InternalType::String => Column::String(StringColumn::default()),
        InternalType::Decimal128 { precision, scale } => Column::Decimal128(Decimal128Column {
            precision: *precision,
            scale: *scale,
            values: Vec::new(),
        }),
        InternalType::Array(inner) => Column::Array(ArrayColumn {
            values: Box::new(create_column(inner)),
            offsets: vec![0],
        }),
        InternalType::Nullable(inner) => Column::Nullable(NullableColumn {
            values: Box::new(create_column(inner)),
            null_map: Vec::new(),
        }),
    }
}
