// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Element values exchanged with host accessors.

use crate::types::FieldType;

/// One element of a reflected field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    /// Enum ordinal.
    Enum(i32),
}

impl Value {
    /// Check whether this value is the payload of the given field type.
    pub fn matches(&self, field_type: FieldType) -> bool {
        matches!(
            (self, field_type),
            (Self::Bool(_), FieldType::Bool)
                | (Self::U8(_), FieldType::U8)
                | (Self::U16(_), FieldType::U16)
                | (Self::U32(_), FieldType::U32)
                | (Self::U64(_), FieldType::U64)
                | (Self::I8(_), FieldType::I8)
                | (Self::I16(_), FieldType::I16)
                | (Self::I32(_), FieldType::I32)
                | (Self::I64(_), FieldType::I64)
                | (Self::F32(_), FieldType::F32)
                | (Self::F64(_), FieldType::F64)
                | (Self::String(_), FieldType::CString)
                | (Self::Enum(_), FieldType::Enum(_))
        )
    }

    /// Integer payload (including enum ordinals), widened.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::U8(v) => Some(i128::from(*v)),
            Self::U16(v) => Some(i128::from(*v)),
            Self::U32(v) => Some(i128::from(*v)),
            Self::U64(v) => Some(i128::from(*v)),
            Self::I8(v) => Some(i128::from(*v)),
            Self::I16(v) => Some(i128::from(*v)),
            Self::I32(v) | Self::Enum(v) => Some(i128::from(*v)),
            Self::I64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    /// Float payload, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Build the value of an integer-typed field, refusing out-of-range input.
    ///
    /// Enum fields take the integer as ordinal.
    pub fn integer(field_type: FieldType, v: i128) -> Option<Self> {
        Some(match field_type {
            FieldType::U8 => Self::U8(u8::try_from(v).ok()?),
            FieldType::U16 => Self::U16(u16::try_from(v).ok()?),
            FieldType::U32 => Self::U32(u32::try_from(v).ok()?),
            FieldType::U64 => Self::U64(u64::try_from(v).ok()?),
            FieldType::I8 => Self::I8(i8::try_from(v).ok()?),
            FieldType::I16 => Self::I16(i16::try_from(v).ok()?),
            FieldType::I32 => Self::I32(i32::try_from(v).ok()?),
            FieldType::I64 => Self::I64(i64::try_from(v).ok()?),
            FieldType::Enum(_) => Self::Enum(i32::try_from(v).ok()?),
            _ => return None,
        })
    }

    /// Narrow a double into an `f32` payload, refusing finite values that
    /// overflow. Infinities and NaN carry over.
    pub fn narrow_f32(v: f64) -> Option<Self> {
        if v.is_finite() && v.abs() > f64::from(f32::MAX) {
            return None;
        }
        Some(Self::F32(v as f32))
    }
}

macro_rules! impl_from_value {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_value!(bool, Bool);
impl_from_value!(u8, U8);
impl_from_value!(u16, U16);
impl_from_value!(u32, U32);
impl_from_value!(u64, U64);
impl_from_value!(i8, I8);
impl_from_value!(i16, I16);
impl_from_value!(i32, I32);
impl_from_value!(i64, I64);
impl_from_value!(f32, F32);
impl_from_value!(f64, F64);
impl_from_value!(String, String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
