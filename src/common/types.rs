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

/// Maximum day count representable by the internal 16-bit `Date` type.
pub const DATE_MAX_DAY_NUM: u32 = u16::MAX as u32;

/// Engine-native logical type. Declared target schemas and resolved
/// conversion types both use this closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InternalType {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Day count since the unix epoch, stored as 16 bits.
    Date,
    /// Seconds since the unix epoch, stored as 32 bits.
    DateTime,
    /// Variable-length bytes with a contiguous character buffer and per-row
    /// end offsets.
    String,
    Decimal128 {
        precision: u8,
        scale: i8,
    },
    Array(Box<InternalType>),
    Nullable(Box<InternalType>),
}

impl InternalType {
    /// Nesting depth counting nullable and array wrappers.
    pub fn nesting_depth(&self) -> usize {
        match self {
            Self::Nullable(inner) | Self::Array(inner) => 1 + inner.nesting_depth(),
            _ => 0,
        }
    }
}

impl fmt::Display for InternalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt8 => write!(f, "UInt8"),
            Self::UInt16 => write!(f, "UInt16"),
            Self::UInt32 => write!(f, "UInt32"),
            Self::UInt64 => write!(f, "UInt64"),
            Self::Int8 => write!(f, "Int8"),
            Self::Int16 => write!(f, "Int16"),
            Self::Int32 => write!(f, "Int32"),
            Self::Int64 => write!(f, "Int64"),
            Self::Float32 => write!(f, "Float32"),
            Self::Float64 => write!(f, "Float64"),
            Self::Date => write!(f, "Date"),
            Self::DateTime => write!(f, "DateTime"),
            Self::String => write!(f, "String"),
            Self::Decimal128 { precision, scale } => {
                write!(f, "Decimal({precision}, {scale})")
            }
            Self::Array(inner) => write!(f, "Array({inner})"),
            Self::Nullable(inner) => write!(f, "Nullable({inner})"),
        }
    }
}
