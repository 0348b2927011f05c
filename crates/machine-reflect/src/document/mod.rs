// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Binary documents in a BSON subset.
//!
//! A document is `i32 LE total length`, a run of elements and a `0x00`
//! terminator. Each element is `tag(1) + NUL-terminated name + payload`.

mod reader;
mod restore;
mod writer;

pub use reader::{Document, Element};
pub use restore::{restore, RestoreReport};
pub use writer::{serialise, DocumentWriter};

use std::fmt;

/// Element tags.
pub mod tag {
    pub const DOUBLE: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const DOCUMENT: u8 = 0x03;
    /// Accepted on input only; arrays are written as [`DOCUMENT`].
    pub const ARRAY: u8 = 0x04;
    pub const BOOLEAN: u8 = 0x08;
    pub const INT32: u8 = 0x10;
    pub const INT64: u8 = 0x12;
}

/// Smallest valid document: length prefix plus terminator.
pub const MIN_DOCUMENT_LEN: usize = 5;

/// Nesting limit enforced by the reader.
pub const MAX_DEPTH: usize = 64;

/// Errors raised while parsing a document. Offsets are absolute byte positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    Truncated { offset: usize, need: usize },
    BadLength { offset: usize, length: i64 },
    MissingTerminator { offset: usize },
    UnsupportedTag { offset: usize, tag: u8 },
    InvalidUtf8 { offset: usize },
    InvalidBoolean { offset: usize, value: u8 },
    NestingTooDeep { offset: usize },
    TrailingBytes { offset: usize },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { offset, need } => {
                write!(f, "Truncated at offset {}: need {} more bytes", offset, need)
            }
            Self::BadLength { offset, length } => {
                write!(f, "Bad length {} at offset {}", length, offset)
            }
            Self::MissingTerminator { offset } => {
                write!(f, "Missing terminator at offset {}", offset)
            }
            Self::UnsupportedTag { offset, tag } => {
                write!(f, "Unsupported tag 0x{:02x} at offset {}", tag, offset)
            }
            Self::InvalidUtf8 { offset } => write!(f, "Invalid UTF-8 at offset {}", offset),
            Self::InvalidBoolean { offset, value } => {
                write!(f, "Invalid boolean 0x{:02x} at offset {}", value, offset)
            }
            Self::NestingTooDeep { offset } => {
                write!(f, "Nesting deeper than {} at offset {}", MAX_DEPTH, offset)
            }
            Self::TrailingBytes { offset } => write!(f, "Trailing bytes at offset {}", offset),
        }
    }
}

impl std::error::Error for DocumentError {}
