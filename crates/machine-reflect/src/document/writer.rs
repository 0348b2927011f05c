// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct to document encoding.

use super::tag;
use crate::access::get_at;
use crate::enum_registry::enum_registry;
use crate::reflect::Struct;
use crate::types::FieldType;

/// Encode every serializable field of `target` as a document.
///
/// # Panics
///
/// Panics on a contract violation: a field whose type has no encoding
/// (an unregistered enum, an array of nested structs) or a host whose
/// reads disagree with the declared field type.
pub fn serialise<S: Struct + ?Sized>(target: &S) -> Vec<u8> {
    let mut writer = DocumentWriter::new();
    write_struct(&mut writer, target);
    let bytes = writer.into_bytes();
    log::trace!("[Document] serialised {} bytes", bytes.len());
    bytes
}

/// Low-level document builder.
///
/// Documents are opened with [`begin_document`](Self::begin_document), which
/// reserves the length prefix, and closed with
/// [`end_document`](Self::end_document), which writes the terminator and
/// patches the prefix.
#[derive(Debug, Default)]
pub struct DocumentWriter {
    buffer: Vec<u8>,
}

impl DocumentWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Reserve a length prefix; returns the document start offset.
    pub fn begin_document(&mut self) -> usize {
        let start = self.buffer.len();
        self.buffer.extend_from_slice(&[0; 4]);
        start
    }

    /// Terminate the document opened at `start`.
    ///
    /// # Panics
    ///
    /// Panics if the document exceeds `i32::MAX` bytes.
    pub fn end_document(&mut self, start: usize) {
        self.buffer.push(0);
        let length = i32::try_from(self.buffer.len() - start)
            .unwrap_or_else(|_| panic!("document at offset {} exceeds i32::MAX bytes", start));
        self.buffer[start..start + 4].copy_from_slice(&length.to_le_bytes());
    }

    /// Element header: tag and NUL-terminated name.
    ///
    /// # Panics
    ///
    /// Panics if `name` contains a NUL byte.
    pub fn element(&mut self, tag: u8, name: &str) {
        assert!(!name.contains('\0'), "element name {:?} contains NUL", name);
        self.buffer.push(tag);
        self.buffer.extend_from_slice(name.as_bytes());
        self.buffer.push(0);
    }

    pub fn boolean(&mut self, name: &str, v: bool) {
        self.element(tag::BOOLEAN, name);
        self.buffer.push(u8::from(v));
    }

    pub fn int32(&mut self, name: &str, v: i32) {
        self.element(tag::INT32, name);
        self.buffer.extend_from_slice(&v.to_le_bytes());
    }

    pub fn int64(&mut self, name: &str, v: i64) {
        self.element(tag::INT64, name);
        self.buffer.extend_from_slice(&v.to_le_bytes());
    }

    pub fn double(&mut self, name: &str, v: f64) {
        self.element(tag::DOUBLE, name);
        self.buffer.extend_from_slice(&v.to_le_bytes());
    }

    /// String element: i32 length including the terminator, bytes, `0x00`.
    pub fn string(&mut self, name: &str, text: &str) {
        self.element(tag::STRING, name);
        let length = i32::try_from(text.len() + 1)
            .unwrap_or_else(|_| panic!("string element {} exceeds i32::MAX bytes", name));
        self.buffer.extend_from_slice(&length.to_le_bytes());
        self.buffer.extend_from_slice(text.as_bytes());
        self.buffer.push(0);
    }
}

fn write_struct<S: Struct + ?Sized>(writer: &mut DocumentWriter, target: &S) {
    let start = writer.begin_document();
    for name in target.all_keys() {
        if !target.should_serialise(name) {
            continue;
        }
        let field_type = target
            .type_of(name)
            .unwrap_or_else(|| panic!("field `{}` is listed but has no type", name));
        let count = target.count_of(name);

        if count > 1 {
            assert!(
                field_type != FieldType::Struct,
                "field `{}`: arrays of nested structs cannot be serialised",
                name
            );
            writer.element(tag::DOCUMENT, name);
            let array = writer.begin_document();
            for index in 0..count {
                write_field(writer, target, name, field_type, index, &index.to_string());
            }
            writer.end_document(array);
        } else {
            write_field(writer, target, name, field_type, 0, name);
        }
    }
    writer.end_document(start);
}

/// Write element `index` of `field` under the key `key`.
fn write_field<S: Struct + ?Sized>(
    writer: &mut DocumentWriter,
    target: &S,
    field: &str,
    field_type: FieldType,
    index: usize,
    key: &str,
) {
    match field_type {
        FieldType::Bool => {
            if let Ok(v) = get_at::<bool, _>(target, field, index) {
                writer.boolean(key, v);
                return;
            }
        }
        FieldType::Enum(enum_key) if enum_registry().contains(enum_key) => {
            if let Ok(ordinal) = get_at::<i32, _>(target, field, index) {
                match enum_registry().name_of(enum_key, ordinal) {
                    Some(name) => writer.string(key, name),
                    None => writer.string(key, &ordinal.to_string()),
                }
                return;
            }
        }
        FieldType::Struct => {
            if let Some(child) = target.nested(field) {
                writer.element(tag::DOCUMENT, key);
                write_struct(writer, child);
                return;
            }
        }
        FieldType::Enum(_) => {}
        FieldType::U64 => {
            if let Ok(v) = get_at::<u64, _>(target, field, index) {
                // Same 64 bits; readers reinterpret for u64 fields.
                writer.int64(key, v as i64);
                return;
            }
        }
        FieldType::F32 | FieldType::F64 => {
            if let Ok(v) = get_at::<f64, _>(target, field, index) {
                writer.double(key, v);
                return;
            }
        }
        FieldType::CString => {
            if let Ok(v) = get_at::<String, _>(target, field, index) {
                writer.string(key, &v);
                return;
            }
        }
        _ => {
            if let Ok(v) = get_at::<i32, _>(target, field, index) {
                writer.int32(key, v);
                return;
            }
            if let Ok(v) = get_at::<i64, _>(target, field, index) {
                writer.int64(key, v);
                return;
            }
        }
    }
    panic!(
        "field `{}` of type {} cannot be serialised",
        field,
        field_type.name()
    );
}
