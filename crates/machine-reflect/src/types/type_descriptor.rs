// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field types and their primitive classification.

use crate::enum_registry::EnumKey;

/// Declared type of a reflected field, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Text owned by the host.
    CString,
    /// A registered enumeration, stored as an ordinal.
    Enum(EnumKey),
    /// A nested struct implementing the reflection contract.
    Struct,
}

impl FieldType {
    /// Short lowercase name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::CString => "string",
            Self::Enum(key) => key.type_name(),
            Self::Struct => "struct",
        }
    }

    /// Check if this is one of the eight integer types.
    pub fn is_integer(&self) -> bool {
        classify(*self).kind == Kind::Integer
    }

    /// Get the enum key if this is an enum field.
    pub fn enum_key(&self) -> Option<EnumKey> {
        match self {
            Self::Enum(key) => Some(*key),
            _ => None,
        }
    }
}

/// Primitive classification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Integer,
    Float,
    CString,
    /// Enum or nested struct; tell them apart with [`FieldType`].
    Compound,
}

/// Width and signedness of a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Classification kind.
    pub kind: Kind,
    /// Storage width in bytes (0 for compound types).
    pub width: usize,
    /// Whether the type is signed (floats count as signed).
    pub signed: bool,
}

impl TypeDescriptor {
    const fn new(kind: Kind, width: usize, signed: bool) -> Self {
        Self {
            kind,
            width,
            signed,
        }
    }

    /// Check if this is a zero-width compound descriptor.
    pub fn is_compound(&self) -> bool {
        self.kind == Kind::Compound
    }
}

/// Classify a field type. Total over every [`FieldType`].
// @audit-ok: Simple pattern matching (cyclo 14, cogni 1) - classification table
pub fn classify(field_type: FieldType) -> TypeDescriptor {
    match field_type {
        FieldType::Bool => TypeDescriptor::new(Kind::Bool, 1, false),
        FieldType::U8 => TypeDescriptor::new(Kind::Integer, 1, false),
        FieldType::U16 => TypeDescriptor::new(Kind::Integer, 2, false),
        FieldType::U32 => TypeDescriptor::new(Kind::Integer, 4, false),
        FieldType::U64 => TypeDescriptor::new(Kind::Integer, 8, false),
        FieldType::I8 => TypeDescriptor::new(Kind::Integer, 1, true),
        FieldType::I16 => TypeDescriptor::new(Kind::Integer, 2, true),
        FieldType::I32 => TypeDescriptor::new(Kind::Integer, 4, true),
        FieldType::I64 => TypeDescriptor::new(Kind::Integer, 8, true),
        FieldType::F32 => TypeDescriptor::new(Kind::Float, 4, true),
        FieldType::F64 => TypeDescriptor::new(Kind::Float, 8, true),
        FieldType::CString => {
            TypeDescriptor::new(Kind::CString, std::mem::size_of::<*const u8>(), false)
        }
        FieldType::Enum(_) | FieldType::Struct => TypeDescriptor::new(Kind::Compound, 0, false),
    }
}
