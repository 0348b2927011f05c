// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rust primitive types that can back a reflected field.

use crate::types::{FieldType, Value};

/// A primitive Rust type with a fixed [`FieldType`].
pub trait Scalar: Clone + 'static {
    /// Field type this Rust type is registered as.
    const FIELD_TYPE: FieldType;

    /// Wrap into a [`Value`].
    fn to_value(&self) -> Value;

    /// Unwrap an exactly matching [`Value`].
    fn from_value(value: Value) -> Option<Self>;

    /// Build from a widened integer (integer types only).
    fn from_wide_int(_v: i128) -> Option<Self> {
        None
    }

    /// Build from a widened float (float types only).
    fn from_wide_float(_v: f64) -> Option<Self> {
        None
    }
}

macro_rules! impl_scalar_int {
    ($ty:ty, $variant:ident) => {
        impl Scalar for $ty {
            const FIELD_TYPE: FieldType = FieldType::$variant;

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_wide_int(v: i128) -> Option<Self> {
                <$ty>::try_from(v).ok()
            }
        }
    };
}

impl_scalar_int!(u8, U8);
impl_scalar_int!(u16, U16);
impl_scalar_int!(u32, U32);
impl_scalar_int!(u64, U64);
impl_scalar_int!(i8, I8);
impl_scalar_int!(i16, I16);
impl_scalar_int!(i32, I32);
impl_scalar_int!(i64, I64);

impl Scalar for bool {
    const FIELD_TYPE: FieldType = FieldType::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        value.as_bool()
    }
}

impl Scalar for f32 {
    const FIELD_TYPE: FieldType = FieldType::F32;

    fn to_value(&self) -> Value {
        Value::F32(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::F32(v) => Some(v),
            _ => None,
        }
    }
}

impl Scalar for f64 {
    const FIELD_TYPE: FieldType = FieldType::F64;

    fn to_value(&self) -> Value {
        Value::F64(*self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    fn from_wide_float(v: f64) -> Option<Self> {
        Some(v)
    }
}

impl Scalar for String {
    const FIELD_TYPE: FieldType = FieldType::CString;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}
