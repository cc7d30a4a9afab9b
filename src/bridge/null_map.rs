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
use arrow::array::Array;

use super::ChunkedColumn;

/// Builds a one-byte-per-row null map (1 = null, 0 = present) by
/// concatenating the per-chunk validity state in chunk order. The output
/// length always equals the column's total row count.
pub fn build_null_map(column: &ChunkedColumn) -> Vec<u8> {
    let mut null_map = Vec::with_capacity(column.len());
    for chunk in column.chunks() {
        for row in 0..chunk.len() {
            null_map.push(chunk.is_null(row) as u8);
        }
    }
    null_map
}
