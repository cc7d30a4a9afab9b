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
use arrow::array::{Array, ListArray};

use super::ChunkedColumn;
use crate::error::BridgeError;

/// Rebuilds a single contiguous offsets buffer from per-chunk list offsets.
///
/// Each chunk's offsets are local to the chunk; they are rebased onto the
/// running total established by prior chunks. The output has `rows + 1`
/// entries, starts at 0, and is monotonic non-decreasing.
pub fn translate_list_offsets(
    column: &ChunkedColumn,
    column_name: &str,
    format_name: &str,
) -> Result<Vec<u64>, BridgeError> {
    let mut offsets = Vec::with_capacity(column.len() + 1);
    offsets.push(0u64);

    for chunk in column.chunks() {
        let list = chunk
            .as_any()
            .downcast_ref::<ListArray>()
            .ok_or_else(|| BridgeError::UnsupportedType {
                type_name: chunk.data_type().to_string(),
                column: column_name.to_string(),
                format: format_name.to_string(),
            })?;
        let local = list.value_offsets();
        let start = offsets[offsets.len() - 1];
        // Sliced chunks may not begin at local offset 0; rebase against the
        // chunk's first offset.
        let base = local[0];
        for offset in &local[1..] {
            offsets.push(start + (offset - base) as u64);
        }
    }
    Ok(offsets)
}
