// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed field access with a fixed conversion lattice.
//!
//! Reads convert only where no precision or sign can be lost:
//!
//! - exact type match,
//! - registered enum to a 32-bit integer (the ordinal),
//! - integer to a wider integer, if the source is unsigned or both are signed,
//! - `f32` to `f64`.
//!
//! Writes accept an `i32`, a string or a bool and map them onto the field
//! type with the rules documented on [`set`].

use crate::enum_registry::enum_registry;
use crate::error::{ReflectError, Result};
use crate::reflect::Struct;
use crate::types::{classify, FieldType, Kind, Scalar, Value};

/// Writer input accepted by [`set`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    Int(i32),
    Str(&'a str),
    Bool(bool),
}

impl From<i32> for Input<'_> {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Input<'_> {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(v: &'a str) -> Self {
        Self::Str(v)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(v: &'a String) -> Self {
        Self::Str(v)
    }
}

/// Read element 0 of `name` as `T`.
pub fn get<T: Scalar, S: Struct + ?Sized>(target: &S, name: &str) -> Result<T> {
    get_at(target, name, 0)
}

/// Read element `index` of `name` as `T`.
pub fn get_at<T: Scalar, S: Struct + ?Sized>(target: &S, name: &str, index: usize) -> Result<T> {
    let source = target
        .type_of(name)
        .ok_or_else(|| ReflectError::FieldNotFound(name.to_string()))?;
    let value = read_element(target, name, index)?;
    coerce(source, value).ok_or_else(|| ReflectError::TypeMismatch {
        field: name.to_string(),
        expected: T::FIELD_TYPE.name().to_string(),
        found: source.name().to_string(),
    })
}

/// Apply the conversion lattice to a value read from a `source` field.
fn coerce<T: Scalar>(source: FieldType, value: Value) -> Option<T> {
    if source == T::FIELD_TYPE {
        return T::from_value(value);
    }

    let dst = classify(T::FIELD_TYPE);
    if let FieldType::Enum(key) = source {
        if dst.kind == Kind::Integer && dst.width == 4 && enum_registry().contains(key) {
            return T::from_wide_int(value.as_i128()?);
        }
        return None;
    }

    let src = classify(source);
    match (src.kind, dst.kind) {
        (Kind::Integer, Kind::Integer) if dst.width > src.width && (!src.signed || dst.signed) => {
            T::from_wide_int(value.as_i128()?)
        }
        (Kind::Float, Kind::Float) if dst.width > src.width => T::from_wide_float(value.as_f64()?),
        _ => None,
    }
}

fn read_element<S: Struct + ?Sized>(target: &S, name: &str, index: usize) -> Result<Value> {
    let count = target.count_of(name);
    if index >= count {
        return Err(ReflectError::IndexOutOfBounds {
            field: name.to_string(),
            index,
            count,
        });
    }
    // A declared element the host cannot produce is not a convertible value.
    target.read(name, index).ok_or_else(|| ReflectError::TypeMismatch {
        field: name.to_string(),
        expected: "value".to_string(),
        found: "none".to_string(),
    })
}

/// Write `input` to element 0 of `name`.
///
/// - `Int`: stored as-is in an `i32` field or as the ordinal of a registered
///   enum (not bounds-checked here; the host decides), widened for an `i64`
///   field. Other field types are refused.
/// - `Str`: enum fields only, by exact name.
/// - `Bool`: bool fields only.
pub fn set<'a, S: Struct + ?Sized>(
    target: &mut S,
    name: &str,
    input: impl Into<Input<'a>>,
) -> Result<()> {
    set_at(target, name, 0, input)
}

/// Write `input` to element `index` of `name`, with the rules of [`set`].
pub fn set_at<'a, S: Struct + ?Sized>(
    target: &mut S,
    name: &str,
    index: usize,
    input: impl Into<Input<'a>>,
) -> Result<()> {
    let input = input.into();
    let field_type = target
        .type_of(name)
        .ok_or_else(|| ReflectError::FieldNotFound(name.to_string()))?;

    let value = match (input, field_type) {
        (Input::Int(v), FieldType::I32) => Value::I32(v),
        (Input::Int(v), FieldType::I64) => Value::I64(i64::from(v)),
        (Input::Int(v), FieldType::Enum(key)) if enum_registry().contains(key) => Value::Enum(v),
        (Input::Str(text), FieldType::Enum(key)) if enum_registry().contains(key) => {
            let ordinal = enum_registry().ordinal_of(key, text).ok_or_else(|| {
                ReflectError::UnknownEnumName {
                    field: name.to_string(),
                    name: text.to_string(),
                }
            })?;
            Value::Enum(ordinal)
        }
        (Input::Bool(v), FieldType::Bool) => Value::Bool(v),
        (input, field_type) => {
            return Err(ReflectError::TypeMismatch {
                field: name.to_string(),
                expected: field_type.name().to_string(),
                found: input.type_name().to_string(),
            })
        }
    };

    write_element(target, name, index, value)
}

/// Assign an enum field from loosely formatted text.
///
/// Tries an exact name first, then the first name of equal length that
/// matches ignoring ASCII case.
pub fn fuzzy_set<S: Struct + ?Sized>(target: &mut S, name: &str, text: &str) -> Result<()> {
    let field_type = target
        .type_of(name)
        .ok_or_else(|| ReflectError::FieldNotFound(name.to_string()))?;
    let key = match field_type {
        FieldType::Enum(key) if enum_registry().contains(key) => key,
        other => {
            return Err(ReflectError::TypeMismatch {
                field: name.to_string(),
                expected: "enum".to_string(),
                found: other.name().to_string(),
            })
        }
    };

    let registry = enum_registry();
    let ordinal = registry
        .ordinal_of(key, text)
        .or_else(|| registry.ordinal_of_ignore_case(key, text))
        .ok_or_else(|| ReflectError::UnknownEnumName {
            field: name.to_string(),
            name: text.to_string(),
        })?;

    write_element(target, name, 0, Value::Enum(ordinal))
}

pub(crate) fn write_element<S: Struct + ?Sized>(
    target: &mut S,
    name: &str,
    index: usize,
    value: Value,
) -> Result<()> {
    let count = target.count_of(name);
    if index >= count {
        return Err(ReflectError::IndexOutOfBounds {
            field: name.to_string(),
            index,
            count,
        });
    }
    if target.write(name, index, value) {
        Ok(())
    } else {
        Err(ReflectError::WriteRejected(name.to_string()))
    }
}

impl Input<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Str(_) => "string",
            Self::Bool(_) => "bool",
        }
    }
}
