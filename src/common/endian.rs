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
//! In-place byte-order normalization for scalar-like values.
//!
//! Responsibilities:
//! - Convert values between native byte order and a requested target order,
//!   dispatched by structural category: plain integers, floating point,
//!   wide integers, ordered pairs, scoped enumerations.
//! - Every transform is a no-op when the target order equals the native one
//!   and is its own inverse otherwise.

/// Byte order of a value's in-memory representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Host byte order, fixed at build time.
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
}

/// In-place conversion of a value's representation to a target byte order.
pub trait TransformEndianness {
    fn transform_endianness(&mut self, target: ByteOrder);
}

macro_rules! impl_transform_endianness_for_int {
    ($($ty:ty),+) => {
        $(
            impl TransformEndianness for $ty {
                fn transform_endianness(&mut self, target: ByteOrder) {
                    if target != ByteOrder::NATIVE {
                        *self = self.swap_bytes();
                    }
                }
            }
        )+
    };
}

impl_transform_endianness_for_int!(u8, u16, u32, u64, i8, i16, i32, i64);

macro_rules! impl_transform_endianness_for_float {
    ($($ty:ty),+) => {
        $(
            impl TransformEndianness for $ty {
                fn transform_endianness(&mut self, target: ByteOrder) {
                    if target != ByteOrder::NATIVE {
                        *self = Self::from_bits(self.to_bits().swap_bytes());
                    }
                }
            }
        )+
    };
}

impl_transform_endianness_for_float!(f32, f64);

// Wide integers are an ordered sequence of 64-bit words: swap the bytes of
// each word, then reverse the word order. Decimal128 payloads share this
// representation.
macro_rules! impl_transform_endianness_for_wide_int {
    ($($ty:ty),+) => {
        $(
            impl TransformEndianness for $ty {
                fn transform_endianness(&mut self, target: ByteOrder) {
                    if target == ByteOrder::NATIVE {
                        return;
                    }
                    let bytes = self.to_ne_bytes();
                    let mut words = [0u64; 2];
                    for (i, word) in words.iter_mut().enumerate() {
                        let mut buf = [0u8; 8];
                        buf.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
                        *word = u64::from_ne_bytes(buf).swap_bytes();
                    }
                    words.reverse();
                    let mut out = [0u8; 16];
                    for (i, word) in words.iter().enumerate() {
                        out[i * 8..(i + 1) * 8].copy_from_slice(&word.to_ne_bytes());
                    }
                    *self = Self::from_ne_bytes(out);
                }
            }
        )+
    };
}

impl_transform_endianness_for_wide_int!(u128, i128);

impl<A: TransformEndianness, B: TransformEndianness> TransformEndianness for (A, B) {
    fn transform_endianness(&mut self, target: ByteOrder) {
        self.0.transform_endianness(target);
        self.1.transform_endianness(target);
    }
}

/// Capability for enumerations that delegate byte-order handling to their
/// underlying integer representation.
///
/// A byte-swapped discriminant is generally not a declared variant, so the
/// swapped value travels as the raw representation and only maps back onto
/// the enumeration after normalization to native order.
pub trait EnumRepr: Sized + Copy {
    type Repr: TransformEndianness + Copy;

    fn to_repr(self) -> Self::Repr;
    fn from_repr(repr: Self::Repr) -> Option<Self>;
}

/// Converts an enumeration value to its representation in `target` order.
pub fn enum_to_order<E: EnumRepr>(value: E, target: ByteOrder) -> E::Repr {
    let mut repr = value.to_repr();
    repr.transform_endianness(target);
    repr
}

/// Maps a representation read in `source` order back onto the enumeration.
/// Returns `None` when the normalized value names no declared variant.
pub fn enum_from_order<E: EnumRepr>(mut repr: E::Repr, source: ByteOrder) -> Option<E> {
    repr.transform_endianness(source);
    E::from_repr(repr)
}
