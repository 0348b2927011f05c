// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recoverable reflection errors.

use crate::document::DocumentError;
use std::fmt;

/// Errors for field access, enum registration and restore.
#[derive(Debug, Clone, PartialEq)]
pub enum ReflectError {
    FieldNotFound(String),
    IndexOutOfBounds {
        field: String,
        index: usize,
        count: usize,
    },
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    UnknownEnumName {
        field: String,
        name: String,
    },
    /// The host refused the written value.
    WriteRejected(String),
    DuplicateEnumName {
        type_name: String,
        name: String,
    },
    EnumConflict {
        type_name: String,
    },
    Document(DocumentError),
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound(name) => write!(f, "Field not found: {}", name),
            Self::IndexOutOfBounds {
                field,
                index,
                count,
            } => write!(
                f,
                "Index out of bounds for {}: {} >= {}",
                field, index, count
            ),
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "Type mismatch for {}: expected {}, found {}",
                field, expected, found
            ),
            Self::UnknownEnumName { field, name } => {
                write!(f, "Unknown enum name for {}: {}", field, name)
            }
            Self::WriteRejected(field) => write!(f, "Write rejected by host: {}", field),
            Self::DuplicateEnumName { type_name, name } => {
                write!(f, "Duplicate name {} in enum {}", name, type_name)
            }
            Self::EnumConflict { type_name } => {
                write!(f, "Enum {} already registered with other names", type_name)
            }
            Self::Document(e) => write!(f, "Document error: {}", e),
        }
    }
}

impl std::error::Error for ReflectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Document(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DocumentError> for ReflectError {
    fn from(e: DocumentError) -> Self {
        Self::Document(e)
    }
}

pub type Result<T> = std::result::Result<T, ReflectError>;
