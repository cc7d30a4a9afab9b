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
use std::fmt;

/// Errors raised while converting a foreign batch. Every error aborts the
/// whole batch conversion; no column is installed after a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeError {
    /// Foreign type id has no internal mapping or no filling strategy.
    UnsupportedType {
        type_name: String,
        column: String,
        format: String,
    },
    /// Foreign and declared types cannot be reconciled, or an unsupported
    /// cast was requested.
    TypeMismatch { column: String, detail: String },
    /// Foreign column carries nulls but the resolved type is non-nullable.
    NullConstraint { column: String },
    /// A converted value exceeds the internal representation's valid range.
    OutOfRange { column: String, detail: String },
    /// Target schema column name absent from the foreign table.
    MissingColumn { column: String, format: String },
    /// Converted columns disagree on the batch row count.
    RowCountMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType {
                type_name,
                column,
                format,
            } => write!(
                f,
                "unsupported {format} type for conversion: type={type_name}, column={column}"
            ),
            Self::TypeMismatch { column, detail } => {
                write!(f, "type mismatch: column={column}, {detail}")
            }
            Self::NullConstraint { column } => write!(
                f,
                "cannot insert NULL data into non-nullable column: column={column}"
            ),
            Self::OutOfRange { column, detail } => {
                write!(f, "value out of range of data type: column={column}, {detail}")
            }
            Self::MissingColumn { column, format } => write!(
                f,
                "column is not present in {format} input data: column={column}"
            ),
            Self::RowCountMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "row count mismatch in converted batch: column={column}, expected_rows={expected}, actual_rows={actual}"
            ),
        }
    }
}

impl std::error::Error for BridgeError {}
