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
//! Adapts a filled column to the exact declared type.
//!
//! Supports identity, nullable wrapping, recursive array casts, checked
//! integer conversion, and integer/float conversion. Anything else is an
//! explicit type mismatch; nothing is truncated silently.

use crate::common::types::InternalType;
use crate::error::BridgeError;

use super::{Column, NullableColumn};

/// Casts `column` into the declared `target` type.
pub fn cast_column(
    column: Column,
    target: &InternalType,
    column_name: &str,
) -> Result<Column, BridgeError> {
    if column.data_type() == *target {
        return Ok(column);
    }

    match (column, target) {
        (Column::Nullable(col), InternalType::Nullable(inner)) => {
            let values = cast_column(*col.values, inner, column_name)?;
            Ok(Column::Nullable(NullableColumn {
                values: Box::new(values),
                null_map: col.null_map,
            }))
        }
        // Declared-nullable column filled from an all-present source.
        (column, InternalType::Nullable(inner)) => {
            let rows = column.len();
            let values = cast_column(column, inner, column_name)?;
            Ok(Column::Nullable(NullableColumn {
                values: Box::new(values),
                null_map: vec![0; rows],
            }))
        }
        (Column::Array(mut col), InternalType::Array(inner)) => {
            *col.values = cast_column(*col.values, inner, column_name)?;
            Ok(Column::Array(col))
        }
        (column, target) => cast_scalar(column, target, column_name),
    }
}

fn cast_scalar(
    column: Column,
    target: &InternalType,
    column_name: &str,
) -> Result<Column, BridgeError> {
    let from = column.data_type();

    if let Some(ints) = integer_values(&column) {
        return cast_from_integers(&ints, &from, target, column_name);
    }

    match (&column, target) {
        (Column::Float32(data), InternalType::Float64) => {
            Ok(Column::Float64(data.iter().map(|v| *v as f64).collect()))
        }
        (Column::Float64(data), InternalType::Float32) => {
            Ok(Column::Float32(data.iter().map(|v| *v as f32).collect()))
        }
        _ => Err(BridgeError::TypeMismatch {
            column: column_name.to_string(),
            detail: format!("cannot cast column of type {from} to declared type {target}"),
        }),
    }
}

/// Widens every integer-backed column to i128 values. Date and DateTime
/// participate as their underlying unsigned widths.
fn integer_values(column: &Column) -> Option<Vec<i128>> {
    let values = match column {
        Column::UInt8(data) => data.iter().map(|v| *v as i128).collect(),
        Column::UInt16(data) => data.iter().map(|v| *v as i128).collect(),
        Column::UInt32(data) => data.iter().map(|v| *v as i128).collect(),
        Column::UInt64(data) => data.iter().map(|v| *v as i128).collect(),
        Column::Int8(data) => data.iter().map(|v| *v as i128).collect(),
        Column::Int16(data) => data.iter().map(|v| *v as i128).collect(),
        Column::Int32(data) => data.iter().map(|v| *v as i128).collect(),
        Column::Int64(data) => data.iter().map(|v| *v as i128).collect(),
        Column::Date(data) => data.iter().map(|v| *v as i128).collect(),
        Column::DateTime(data) => data.iter().map(|v| *v as i128).collect(),
        _ => return None,
    };
    Some(values)
}

macro_rules! collect_checked {
    ($values:expr, $prim:ty, $variant:ident, $from:expr, $target:expr, $column_name:expr) => {{
        let mut out = Vec::with_capacity($values.len());
        for value in $values {
            let converted = <$prim>::try_from(*value).map_err(|_| BridgeError::OutOfRange {
                column: $column_name.to_string(),
                detail: format!(
                    "value {} of type {} does not fit declared type {}",
                    value, $from, $target
                ),
            })?;
            out.push(converted);
        }
        Ok(Column::$variant(out))
    }};
}

fn cast_from_integers(
    values: &[i128],
    from: &InternalType,
    target: &InternalType,
    column_name: &str,
) -> Result<Column, BridgeError> {
    match target {
        InternalType::UInt8 => collect_checked!(values, u8, UInt8, from, target, column_name),
        InternalType::UInt16 => collect_checked!(values, u16, UInt16, from, target, column_name),
        InternalType::UInt32 => collect_checked!(values, u32, UInt32, from, target, column_name),
        InternalType::UInt64 => collect_checked!(values, u64, UInt64, from, target, column_name),
        InternalType::Int8 => collect_checked!(values, i8, Int8, from, target, column_name),
        InternalType::Int16 => collect_checked!(values, i16, Int16, from, target, column_name),
        InternalType::Int32 => collect_checked!(values, i32, Int32, from, target, column_name),
        InternalType::Int64 => collect_checked!(values, i64, Int64, from, target, column_name),
        InternalType::Date => collect_checked!(values, u16, Date, from, target, column_name),
        InternalType::DateTime => collect_checked!(values, u32, DateTime, from, target, column_name),
        InternalType::Float32 => Ok(Column::Float32(
            values.iter().map(|v| *v as f32).collect(),
        )),
        InternalType::Float64 => Ok(Column::Float64(
            values.iter().map(|v| *v as f64).collect(),
        )),
        _ => Err(BridgeError::TypeMismatch {
            column: column_name.to_string(),
            detail: format!("cannot cast column of type {from} to declared type {target}"),
        }),
    }
}
