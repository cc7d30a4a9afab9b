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
//! Integration tests for foreign-batch-to-row-batch conversion.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Date32Array, Date64Array, Decimal128Array, Float16Array, Int32Array,
    LargeStringArray, ListArray, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{Field, Int32Type, Schema};
use arrow::record_batch::RecordBatch;
use half::f16;

use chunkbridge::{
    BridgeError, ChunkedColumn, Column, ForeignTable, InternalType, TargetField, TargetSchema,
    foreign_table_to_row_batch, record_batches_to_row_batch,
};

fn batch(columns: Vec<(&str, ArrayRef)>) -> RecordBatch {
    let fields = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect::<Vec<_>>();
    let arrays = columns.into_iter().map(|(_, array)| array).collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("build record batch")
}

fn target(fields: Vec<(&str, InternalType)>) -> TargetSchema {
    TargetSchema::new(
        fields
            .into_iter()
            .map(|(name, data_type)| TargetField::new(name, data_type))
            .collect(),
    )
}

#[test]
fn int32_chunks_concatenate_without_null_buffer() {
    let batches = vec![
        batch(vec![("v", Arc::new(Int32Array::from(vec![1])) as ArrayRef)]),
        batch(vec![("v", Arc::new(Int32Array::from(vec![2])) as ArrayRef)]),
        batch(vec![("v", Arc::new(Int32Array::from(vec![3])) as ArrayRef)]),
    ];
    let out = record_batches_to_row_batch(
        &batches,
        &target(vec![("v", InternalType::Int32)]),
        "Arrow",
    )
    .unwrap();

    assert_eq!(out.num_rows(), 3);
    let column = &out.column_by_name("v").unwrap().column;
    assert_eq!(*column, Column::Int32(vec![1, 2, 3]));
}

#[test]
fn string_chunks_materialize_with_terminators_and_shifted_offsets() {
    let batches = vec![
        batch(vec![(
            "s",
            Arc::new(StringArray::from(vec!["a", "b"])) as ArrayRef,
        )]),
        batch(vec![("s", Arc::new(StringArray::from(vec!["c"])) as ArrayRef)]),
    ];
    let out = record_batches_to_row_batch(
        &batches,
        &target(vec![("s", InternalType::String)]),
        "Arrow",
    )
    .unwrap();

    let Column::String(col) = &out.column_by_name("s").unwrap().column else {
        panic!("expected string column");
    };
    assert_eq!(col.chars, b"a\0b\0c\0".to_vec());
    assert_eq!(col.offsets, vec![2, 4, 6]);
    assert_eq!(col.value(1), Some(b"b".as_slice()));
}

#[test]
fn binary_column_converts_to_string_storage() {
    let values: Vec<&[u8]> = vec![b"\x01\x02", b""];
    let array = Arc::new(arrow::array::BinaryArray::from(values)) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("b", array)])],
        &target(vec![("b", InternalType::String)]),
        "Arrow",
    )
    .unwrap();

    let Column::String(col) = &out.column_by_name("b").unwrap().column else {
        panic!("expected string column");
    };
    assert_eq!(col.chars, vec![1, 2, 0, 0]);
    assert_eq!(col.offsets, vec![3, 4]);
}

#[test]
fn list_of_int32_rebuilds_nested_column_and_offsets() {
    let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(1), Some(2)]),
        Some(vec![Some(3)]),
    ]);
    let out = record_batches_to_row_batch(
        &[batch(vec![("l", Arc::new(list) as ArrayRef)])],
        &target(vec![(
            "l",
            InternalType::Array(Box::new(InternalType::Int32)),
        )]),
        "Arrow",
    )
    .unwrap();

    let Column::Array(col) = &out.column_by_name("l").unwrap().column else {
        panic!("expected array column");
    };
    assert_eq!(*col.values, Column::Int32(vec![1, 2, 3]));
    assert_eq!(col.offsets, vec![0, 2, 3]);
    assert_eq!(out.num_rows(), 2);
}

#[test]
fn list_offsets_rebase_across_chunks() {
    let chunk_a = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(1), Some(2)]),
        Some(vec![]),
    ]);
    let chunk_b =
        ListArray::from_iter_primitive::<Int32Type, _, _>(vec![Some(vec![Some(3), Some(4)])]);
    let batches = vec![
        batch(vec![("l", Arc::new(chunk_a) as ArrayRef)]),
        batch(vec![("l", Arc::new(chunk_b) as ArrayRef)]),
    ];
    let out = record_batches_to_row_batch(
        &batches,
        &target(vec![(
            "l",
            InternalType::Array(Box::new(InternalType::Int32)),
        )]),
        "Arrow",
    )
    .unwrap();

    let Column::Array(col) = &out.column_by_name("l").unwrap().column else {
        panic!("expected array column");
    };
    assert_eq!(*col.values, Column::Int32(vec![1, 2, 3, 4]));
    assert_eq!(col.offsets, vec![0, 2, 2, 4]);
}

#[test]
fn sliced_list_chunk_copies_only_the_windowed_values() {
    let full = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(1), Some(2)]),
        Some(vec![Some(3)]),
        Some(vec![Some(4), Some(5)]),
    ]);
    let sliced = full.slice(1, 2);
    let out = record_batches_to_row_batch(
        &[batch(vec![("l", Arc::new(sliced) as ArrayRef)])],
        &target(vec![(
            "l",
            InternalType::Array(Box::new(InternalType::Int32)),
        )]),
        "Arrow",
    )
    .unwrap();

    let Column::Array(col) = &out.column_by_name("l").unwrap().column else {
        panic!("expected array column");
    };
    assert_eq!(*col.values, Column::Int32(vec![3, 4, 5]));
    assert_eq!(col.offsets, vec![0, 1, 3]);
    // The last offset always addresses the end of the nested column.
    assert_eq!(col.offsets[col.offsets.len() - 1] as usize, col.values.len());
}

#[test]
fn nullable_column_builds_null_map_per_row() {
    let array = Arc::new(Int32Array::from(vec![Some(1), None, Some(3)])) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("v", array)])],
        &target(vec![(
            "v",
            InternalType::Nullable(Box::new(InternalType::Int32)),
        )]),
        "Arrow",
    )
    .unwrap();

    let Column::Nullable(col) = &out.column_by_name("v").unwrap().column else {
        panic!("expected nullable column");
    };
    assert_eq!(col.null_map, vec![0, 1, 0]);
    assert_eq!(col.values.len(), 3);
    let Column::Int32(values) = col.values.as_ref() else {
        panic!("expected int32 values");
    };
    assert_eq!(values[0], 1);
    assert_eq!(values[2], 3);
}

#[test]
fn nulls_into_non_nullable_column_are_rejected() {
    let array = Arc::new(Int32Array::from(vec![Some(1), None])) as ArrayRef;
    let err = record_batches_to_row_batch(
        &[batch(vec![("v", array)])],
        &target(vec![("v", InternalType::Int32)]),
        "Arrow",
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::NullConstraint { .. }), "{err}");
}

#[test]
fn date32_within_range_is_copied() {
    let array = Arc::new(Date32Array::from(vec![18262, 0])) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("d", array)])],
        &target(vec![("d", InternalType::Date)]),
        "Arrow",
    )
    .unwrap();
    assert_eq!(
        out.column_by_name("d").unwrap().column,
        Column::Date(vec![18262, 0])
    );
}

#[test]
fn date32_above_max_day_count_fails_with_range_error() {
    let array = Arc::new(Date32Array::from(vec![70_000])) as ArrayRef;
    let err = record_batches_to_row_batch(
        &[batch(vec![("d", array)])],
        &target(vec![("d", InternalType::Date)]),
        "Arrow",
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::OutOfRange { .. }), "{err}");
}

#[test]
fn timestamp_microseconds_divide_down_to_seconds() {
    let array = Arc::new(TimestampMicrosecondArray::from(vec![1_000_000i64, 2_500_000]))
        as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("t", array)])],
        &target(vec![("t", InternalType::DateTime)]),
        "Arrow",
    )
    .unwrap();
    assert_eq!(
        out.column_by_name("t").unwrap().column,
        Column::DateTime(vec![1, 2])
    );
}

#[test]
fn date64_milliseconds_divide_down_to_seconds() {
    let array = Arc::new(Date64Array::from(vec![86_400_000i64])) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("d", array)])],
        &target(vec![("d", InternalType::DateTime)]),
        "Arrow",
    )
    .unwrap();
    assert_eq!(
        out.column_by_name("d").unwrap().column,
        Column::DateTime(vec![86_400])
    );
}

#[test]
fn boolean_bits_unpack_into_bytes() {
    let array = Arc::new(BooleanArray::from(vec![true, false, true])) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("b", array)])],
        &target(vec![("b", InternalType::UInt8)]),
        "Arrow",
    )
    .unwrap();
    assert_eq!(
        out.column_by_name("b").unwrap().column,
        Column::UInt8(vec![1, 0, 1])
    );
}

#[test]
fn half_floats_widen_to_float32() {
    let array = Arc::new(Float16Array::from(vec![
        f16::from_f32(1.5),
        f16::from_f32(-0.25),
    ])) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("f", array)])],
        &target(vec![("f", InternalType::Float32)]),
        "Arrow",
    )
    .unwrap();
    assert_eq!(
        out.column_by_name("f").unwrap().column,
        Column::Float32(vec![1.5, -0.25])
    );
}

#[test]
fn decimal_precision_and_scale_carry_through() {
    let array = Decimal128Array::from(vec![Some(12_345i128), None])
        .with_precision_and_scale(27, 5)
        .expect("decimal metadata");
    let out = record_batches_to_row_batch(
        &[batch(vec![("d", Arc::new(array) as ArrayRef)])],
        &target(vec![(
            "d",
            InternalType::Nullable(Box::new(InternalType::Decimal128 {
                precision: 27,
                scale: 5,
            })),
        )]),
        "Arrow",
    )
    .unwrap();

    let Column::Nullable(col) = &out.column_by_name("d").unwrap().column else {
        panic!("expected nullable column");
    };
    assert_eq!(col.null_map, vec![0, 1]);
    let Column::Decimal128(decimal) = col.values.as_ref() else {
        panic!("expected decimal values");
    };
    assert_eq!(decimal.precision, 27);
    assert_eq!(decimal.scale, 5);
    // Null rows are zero-backed in the value buffer; nullness lives in the
    // null map only.
    assert_eq!(decimal.values, vec![12_345, 0]);
}

#[test]
fn resolved_column_casts_to_wider_declared_type() {
    let array = Arc::new(Int32Array::from(vec![7, -9])) as ArrayRef;
    let out = record_batches_to_row_batch(
        &[batch(vec![("v", array)])],
        &target(vec![("v", InternalType::Int64)]),
        "Arrow",
    )
    .unwrap();
    assert_eq!(
        out.column_by_name("v").unwrap().column,
        Column::Int64(vec![7, -9])
    );
}

#[test]
fn missing_target_column_aborts_conversion() {
    let array = Arc::new(Int32Array::from(vec![1])) as ArrayRef;
    let err = record_batches_to_row_batch(
        &[batch(vec![("v", array)])],
        &target(vec![("absent", InternalType::Int32)]),
        "Parquet",
    )
    .unwrap_err();
    match err {
        BridgeError::MissingColumn { column, format } => {
            assert_eq!(column, "absent");
            assert_eq!(format, "Parquet");
        }
        other => panic!("expected MissingColumn, got {other}"),
    }
}

#[test]
fn list_against_non_array_declared_type_is_a_mismatch() {
    let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![Some(vec![Some(1)])]);
    let err = record_batches_to_row_batch(
        &[batch(vec![("l", Arc::new(list) as ArrayRef)])],
        &target(vec![("l", InternalType::Int32)]),
        "Arrow",
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::TypeMismatch { .. }), "{err}");
}

#[test]
fn unsupported_foreign_type_is_a_defined_failure() {
    let array = Arc::new(LargeStringArray::from(vec!["x"])) as ArrayRef;
    let err = record_batches_to_row_batch(
        &[batch(vec![("s", array)])],
        &target(vec![("s", InternalType::String)]),
        "Arrow",
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::UnsupportedType { .. }), "{err}");
}

#[test]
fn every_output_column_shares_the_batch_row_count() {
    let batches = vec![
        batch(vec![
            ("a", Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef),
            ("b", Arc::new(StringArray::from(vec!["x", "y"])) as ArrayRef),
        ]),
        batch(vec![
            ("a", Arc::new(Int32Array::from(vec![3])) as ArrayRef),
            ("b", Arc::new(StringArray::from(vec!["z"])) as ArrayRef),
        ]),
    ];
    let out = record_batches_to_row_batch(
        &batches,
        &target(vec![
            ("b", InternalType::String),
            ("a", InternalType::Int32),
        ]),
        "Arrow",
    )
    .unwrap();

    assert_eq!(out.num_rows(), 3);
    assert_eq!(out.num_columns(), 2);
    // Target schema order is preserved regardless of foreign order.
    assert_eq!(out.columns()[0].name, "b");
    for column in out.columns() {
        assert_eq!(column.column.len(), out.num_rows(), "column={}", column.name);
    }
}

#[test]
fn mismatched_column_lengths_fail_instead_of_truncating() {
    let a = ChunkedColumn::try_new(
        arrow::datatypes::DataType::Int32,
        vec![Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef],
        "a",
    )
    .unwrap();
    let b = ChunkedColumn::try_new(
        arrow::datatypes::DataType::Int32,
        vec![Arc::new(Int32Array::from(vec![1, 2, 3])) as ArrayRef],
        "b",
    )
    .unwrap();
    let table = ForeignTable::new(vec![("a".to_string(), a), ("b".to_string(), b)]);
    let err = foreign_table_to_row_batch(
        &table,
        &target(vec![("a", InternalType::Int32), ("b", InternalType::Int32)]),
        "Arrow",
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::RowCountMismatch { .. }), "{err}");
}

#[test]
fn nested_nullable_list_values_keep_their_null_map() {
    let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![
        Some(vec![Some(1), None]),
        Some(vec![Some(3)]),
    ]);
    let out = record_batches_to_row_batch(
        &[batch(vec![("l", Arc::new(list) as ArrayRef)])],
        &target(vec![(
            "l",
            InternalType::Array(Box::new(InternalType::Nullable(Box::new(
                InternalType::Int32,
            )))),
        )]),
        "Arrow",
    )
    .unwrap();

    let Column::Array(col) = &out.column_by_name("l").unwrap().column else {
        panic!("expected array column");
    };
    assert_eq!(col.offsets, vec![0, 2, 3]);
    let Column::Nullable(nested) = col.values.as_ref() else {
        panic!("expected nullable nested column");
    };
    assert_eq!(nested.null_map, vec![0, 1, 0]);
}
