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
use arrow::datatypes::DataType;

use crate::common::types::InternalType;
use crate::error::BridgeError;

/// Upper bound on nullable/array wrapping while reconciling types.
pub const MAX_TYPE_NESTING_DEPTH: usize = 32;

/// Reconciles a foreign Arrow type with the declared target type into the
/// concrete internal type used for filling. The result always matches the
/// declared type's nullability and array nesting shape. Pure function;
/// recursion is bounded by the declared type's nesting depth, checked up
/// front.
pub fn resolve_internal_type(
    foreign: &DataType,
    declared: &InternalType,
    column_name: &str,
    format_name: &str,
) -> Result<InternalType, BridgeError> {
    if declared.nesting_depth() > MAX_TYPE_NESTING_DEPTH {
        return Err(BridgeError::TypeMismatch {
            column: column_name.to_string(),
            detail: format!(
                "declared type nesting depth exceeds limit {MAX_TYPE_NESTING_DEPTH}"
            ),
        });
    }
    resolve_shape(foreign, declared, column_name, format_name)
}

fn resolve_shape(
    foreign: &DataType,
    declared: &InternalType,
    column_name: &str,
    format_name: &str,
) -> Result<InternalType, BridgeError> {
    if let InternalType::Nullable(inner) = declared {
        let resolved = resolve_shape(foreign, inner, column_name, format_name)?;
        return Ok(InternalType::Nullable(Box::new(resolved)));
    }

    match foreign {
        // Precision and scale are carried through from the foreign
        // descriptor verbatim.
        DataType::Decimal128(precision, scale) => Ok(InternalType::Decimal128 {
            precision: *precision,
            scale: *scale,
        }),
        DataType::List(field) => {
            let InternalType::Array(nested) = declared else {
                return Err(BridgeError::TypeMismatch {
                    column: column_name.to_string(),
                    detail: format!(
                        "cannot convert {format_name} list type to non-array declared type {declared}"
                    ),
                });
            };
            let resolved =
                resolve_shape(field.data_type(), nested, column_name, format_name)?;
            Ok(InternalType::Array(Box::new(resolved)))
        }
        other => scalar_internal_type(other).ok_or_else(|| BridgeError::UnsupportedType {
            type_name: other.to_string(),
            column: column_name.to_string(),
            format: format_name.to_string(),
        }),
    }
}

/// Fixed mapping from foreign scalar type ids to internal type names.
fn scalar_internal_type(foreign: &DataType) -> Option<InternalType> {
    match foreign {
        DataType::UInt8 => Some(InternalType::UInt8),
        DataType::UInt16 => Some(InternalType::UInt16),
        DataType::UInt32 => Some(InternalType::UInt32),
        DataType::UInt64 => Some(InternalType::UInt64),
        DataType::Int8 => Some(InternalType::Int8),
        DataType::Int16 => Some(InternalType::Int16),
        DataType::Int32 => Some(InternalType::Int32),
        DataType::Int64 => Some(InternalType::Int64),
        DataType::Float16 => Some(InternalType::Float32),
        DataType::Float32 => Some(InternalType::Float32),
        DataType::Float64 => Some(InternalType::Float64),
        DataType::Boolean => Some(InternalType::UInt8),
        DataType::Date32 => Some(InternalType::Date),
        DataType::Date64 => Some(InternalType::DateTime),
        DataType::Timestamp(_, _) => Some(InternalType::DateTime),
        DataType::Utf8 => Some(InternalType::String),
        DataType::Binary => Some(InternalType::String),
        _ => None,
    }
}
