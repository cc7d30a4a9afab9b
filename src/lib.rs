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
//! chunkbridge converts Arrow chunked columnar data into engine-native
//! column storage: contiguous typed buffers plus separate null maps and
//! array offsets, resolved against a declared target schema.

pub mod bridge;
pub mod column;
pub mod common;
pub mod error;

pub use common::logging as chunkbridge_logging;

pub use bridge::{
    ChunkedColumn, ForeignTable, RowBatch, RowColumn, TargetField, TargetSchema,
    foreign_table_to_row_batch, record_batches_to_row_batch, resolve_internal_type,
};
pub use column::{Column, cast_column, create_column};
pub use common::endian::{ByteOrder, EnumRepr, TransformEndianness, enum_from_order, enum_to_order};
pub use common::types::InternalType;
pub use error::BridgeError;
