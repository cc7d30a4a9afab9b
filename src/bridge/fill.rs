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
//! Per-type filling strategies from foreign chunks into engine columns.
//!
//! Responsibilities:
//! - Width-matched numerics copy raw value buffers chunk by chunk.
//! - Booleans unpack one bit per row into one byte per row.
//! - Strings materialize in two passes with null terminators and per-row end
//!   offsets.
//! - Date32 is range checked; Date64 and timestamps are divided down to
//!   seconds resolution.
//! - Decimal128 copies the payload per row, zero-backing null slots.
//! - Lists recurse into the concatenated child chunks and rebuild offsets.

use arrow::array::{Array, AsArray, GenericByteArray};
use arrow::datatypes::{
    ArrowNativeType, ByteArrayType, DataType, Date32Type, Date64Type, Decimal128Type, Float16Type, Float32Type,
    Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, TimeUnit, TimestampMicrosecondType,
    TimestampMillisecondType, TimestampNanosecondType, TimestampSecondType, UInt8Type, UInt16Type,
    UInt32Type, UInt64Type,
};

use crate::column::{Column, StringColumn};
use crate::common::types::DATE_MAX_DAY_NUM;
use crate::error::BridgeError;

use super::ChunkedColumn;
use super::null_map::build_null_map;
use super::offsets::translate_list_offsets;

/// Fills a freshly created internal column from a foreign chunked column,
/// writing exactly `foreign.len()` values.
///
/// Nullable columns fill the inner column first (nulls permissible) and then
/// attach the null map. Non-nullable, non-array columns reject foreign nulls
/// before any value is written.
pub(crate) fn fill_column_from_foreign(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
    nulls_permitted: bool,
) -> Result<(), BridgeError> {
    if let Column::Nullable(nullable) = column {
        fill_column_from_foreign(foreign, &mut nullable.values, column_name, format_name, true)?;
        nullable.null_map = build_null_map(foreign);
        return Ok(());
    }

    if !nulls_permitted && !matches!(column, Column::Array(_)) && foreign.null_count() > 0 {
        return Err(BridgeError::NullConstraint {
            column: column_name.to_string(),
        });
    }

    match foreign.data_type() {
        DataType::Utf8 | DataType::Binary => {
            fill_string(foreign, column, column_name, format_name)
        }
        DataType::Boolean => fill_boolean(foreign, column, column_name, format_name),
        DataType::Date32 => fill_date32(foreign, column, column_name, format_name),
        DataType::Date64 => fill_date64(foreign, column, column_name, format_name),
        DataType::Timestamp(unit, _) => {
            fill_timestamp(foreign, column, *unit, column_name, format_name)
        }
        DataType::Decimal128(_, _) => fill_decimal(foreign, column, column_name, format_name),
        DataType::List(_) => fill_list(foreign, column, column_name, format_name),
        DataType::Float16 => fill_half_float(foreign, column, column_name, format_name),
        _ => fill_numeric(foreign, column, column_name, format_name),
    }
}

/// Foreign type reached a dispatch with no filling strategy for this column.
fn no_strategy(foreign: &ChunkedColumn, column_name: &str, format_name: &str) -> BridgeError {
    BridgeError::UnsupportedType {
        type_name: foreign.data_type().to_string(),
        column: column_name.to_string(),
        format: format_name.to_string(),
    }
}

/// Raw bulk copy for numerics whose foreign element width equals the
/// internal element width; no per-element conversion.
fn fill_numeric(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    macro_rules! bulk_copy {
        ($arrow_type:ty, $data:expr) => {{
            $data.reserve(foreign.len());
            for chunk in foreign.chunks() {
                $data.extend_from_slice(chunk.as_primitive::<$arrow_type>().values());
            }
            Ok(())
        }};
    }

    match (foreign.data_type(), column) {
        (DataType::UInt8, Column::UInt8(data)) => bulk_copy!(UInt8Type, data),
        (DataType::UInt16, Column::UInt16(data)) => bulk_copy!(UInt16Type, data),
        (DataType::UInt32, Column::UInt32(data)) => bulk_copy!(UInt32Type, data),
        (DataType::UInt64, Column::UInt64(data)) => bulk_copy!(UInt64Type, data),
        (DataType::Int8, Column::Int8(data)) => bulk_copy!(Int8Type, data),
        (DataType::Int16, Column::Int16(data)) => bulk_copy!(Int16Type, data),
        (DataType::Int32, Column::Int32(data)) => bulk_copy!(Int32Type, data),
        (DataType::Int64, Column::Int64(data)) => bulk_copy!(Int64Type, data),
        (DataType::Float32, Column::Float32(data)) => bulk_copy!(Float32Type, data),
        (DataType::Float64, Column::Float64(data)) => bulk_copy!(Float64Type, data),
        _ => Err(no_strategy(foreign, column_name, format_name)),
    }
}

/// Half floats widen per value into the 32-bit float column.
fn fill_half_float(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::Float32(data) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    data.reserve(foreign.len());
    for chunk in foreign.chunks() {
        for value in chunk.as_primitive::<Float16Type>().values().iter() {
            data.push(f32::from(*value));
        }
    }
    Ok(())
}

/// Unpacks one bit per row into one byte per row.
fn fill_boolean(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::UInt8(data) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    data.reserve(foreign.len());
    for chunk in foreign.chunks() {
        let array = chunk.as_boolean();
        for row in 0..array.len() {
            data.push(array.value(row) as u8);
        }
    }
    Ok(())
}

/// Two-pass string materialization: pre-size the character buffer (value
/// bytes plus one terminator byte per row), then copy bytes, append a
/// terminator per value, and record the running end offset per row. Offsets
/// are shifted by one against the foreign convention so `offsets[i]` is the
/// end position of row `i`.
fn fill_string(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::String(col) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };

    let mut chars_size = 0usize;
    for chunk in foreign.chunks() {
        chars_size += match chunk.data_type() {
            DataType::Utf8 => chunk_value_bytes(chunk.as_string::<i32>()),
            DataType::Binary => chunk_value_bytes(chunk.as_binary::<i32>()),
            _ => return Err(no_strategy(foreign, column_name, format_name)),
        };
        chars_size += chunk.len();
    }
    col.chars.reserve(chars_size);
    col.offsets.reserve(foreign.len());

    for chunk in foreign.chunks() {
        match chunk.data_type() {
            DataType::Utf8 => append_byte_values(chunk.as_string::<i32>(), col),
            DataType::Binary => append_byte_values(chunk.as_binary::<i32>(), col),
            _ => return Err(no_strategy(foreign, column_name, format_name)),
        }
    }
    Ok(())
}

fn chunk_value_bytes<T: ByteArrayType>(array: &GenericByteArray<T>) -> usize {
    let offsets = array.value_offsets();
    offsets[offsets.len() - 1].as_usize() - offsets[0].as_usize()
}

fn append_byte_values<T>(array: &GenericByteArray<T>, col: &mut StringColumn)
where
    T: ByteArrayType,
    T::Native: AsRef<[u8]>,
{
    for row in 0..array.len() {
        if !array.is_null(row) {
            col.chars.extend_from_slice(array.value(row).as_ref());
        }
        col.chars.push(0);
        col.offsets.push(col.chars.len() as u64);
    }
}

/// Copies foreign day counts, rejecting values the 16-bit internal date
/// cannot represent instead of truncating them.
fn fill_date32(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::Date(data) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    data.reserve(foreign.len());
    for chunk in foreign.chunks() {
        for value in chunk.as_primitive::<Date32Type>().values().iter() {
            let days = *value as u32;
            if days > DATE_MAX_DAY_NUM {
                return Err(BridgeError::OutOfRange {
                    column: column_name.to_string(),
                    detail: format!(
                        "input day count {days} is greater than max allowed Date value {DATE_MAX_DAY_NUM}"
                    ),
                });
            }
            data.push(days as u16);
        }
    }
    Ok(())
}

/// Foreign 64-bit dates carry milliseconds; the internal value is seconds.
fn fill_date64(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::DateTime(data) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    data.reserve(foreign.len());
    for chunk in foreign.chunks() {
        for value in chunk.as_primitive::<Date64Type>().values().iter() {
            data.push((value / 1000) as u32);
        }
    }
    Ok(())
}

/// Divides foreign timestamps down to seconds resolution according to the
/// foreign time unit.
fn fill_timestamp(
    foreign: &ChunkedColumn,
    column: &mut Column,
    unit: TimeUnit,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::DateTime(data) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    let divide: i64 = match unit {
        TimeUnit::Second => 1,
        TimeUnit::Millisecond => 1_000,
        TimeUnit::Microsecond => 1_000_000,
        TimeUnit::Nanosecond => 1_000_000_000,
    };
    data.reserve(foreign.len());
    for chunk in foreign.chunks() {
        let raw: &[i64] = match unit {
            TimeUnit::Second => chunk.as_primitive::<TimestampSecondType>().values(),
            TimeUnit::Millisecond => chunk.as_primitive::<TimestampMillisecondType>().values(),
            TimeUnit::Microsecond => chunk.as_primitive::<TimestampMicrosecondType>().values(),
            TimeUnit::Nanosecond => chunk.as_primitive::<TimestampNanosecondType>().values(),
        };
        for value in raw {
            data.push((value / divide) as u32);
        }
    }
    Ok(())
}

/// Copies the fixed-width decimal payload per row. Null rows are written as
/// zero in the value buffer; nullness itself lives in the separate null map
/// of the wrapping nullable column.
fn fill_decimal(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::Decimal128(col) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    col.values.reserve(foreign.len());
    for chunk in foreign.chunks() {
        let array = chunk.as_primitive::<Decimal128Type>();
        for row in 0..array.len() {
            col.values
                .push(if array.is_null(row) { 0 } else { array.value(row) });
        }
    }
    Ok(())
}

/// Recursively fills the nested column from the concatenated child chunks,
/// then rebuilds the row-level offsets.
fn fill_list(
    foreign: &ChunkedColumn,
    column: &mut Column,
    column_name: &str,
    format_name: &str,
) -> Result<(), BridgeError> {
    let Column::Array(col) = column else {
        return Err(no_strategy(foreign, column_name, format_name));
    };
    let DataType::List(field) = foreign.data_type() else {
        return Err(no_strategy(foreign, column_name, format_name));
    };

    let mut child_chunks = Vec::with_capacity(foreign.chunks().len());
    for chunk in foreign.chunks() {
        let list = chunk.as_list::<i32>();
        // Sliced chunks view a window of the underlying values array; copy
        // only the element range this chunk's offsets cover, so the rebased
        // offsets and the nested values stay aligned.
        let local = list.value_offsets();
        let first = local[0] as usize;
        let last = local[local.len() - 1] as usize;
        child_chunks.push(list.values().slice(first, last - first));
    }
    let child = ChunkedColumn::try_new(field.data_type().clone(), child_chunks, column_name)?;

    fill_column_from_foreign(&child, &mut col.values, column_name, format_name, false)?;
    col.offsets = translate_list_offsets(foreign, column_name, format_name)?;
    Ok(())
}
