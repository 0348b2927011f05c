// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Apply a serialized document back onto a struct.

use super::{Document, Element};
use crate::access::write_element;
use crate::enum_registry::enum_registry;
use crate::error::Result;
use crate::reflect::Struct;
use crate::types::{FieldType, Value};

/// Outcome of [`restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Elements written to the struct.
    pub applied: usize,
    /// Dotted paths of elements that were not applied.
    pub skipped: Vec<String>,
}

impl RestoreReport {
    /// Check if every element was applied.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, path: String, reason: &str) {
        log::warn!("[Restore] skipping {}: {}", path, reason);
        self.skipped.push(path);
    }
}

/// Parse `bytes` and write every matching serializable field of `target`.
///
/// Parse errors abort before anything is written. Elements that do not fit
/// their field, name no serializable field, or are refused by the host are
/// skipped and listed in the report.
pub fn restore<S: Struct + ?Sized>(target: &mut S, bytes: &[u8]) -> Result<RestoreReport> {
    let document = Document::from_bytes(bytes)?;
    let mut report = RestoreReport::default();
    apply_document(target, &document, "", &mut report);
    log::debug!(
        "[Restore] applied {} elements, skipped {}",
        report.applied,
        report.skipped.len()
    );
    Ok(report)
}

fn apply_document<S: Struct + ?Sized>(
    target: &mut S,
    document: &Document,
    prefix: &str,
    report: &mut RestoreReport,
) {
    for (name, element) in document.iter() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };

        let field_type = match target.type_of(name) {
            Some(t) if target.should_serialise(name) => t,
            Some(_) => {
                report.skip(path, "field is not serializable");
                continue;
            }
            None => {
                report.skip(path, "no such field");
                continue;
            }
        };
        let count = target.count_of(name);

        if count > 1 {
            let Some(items) = element.as_document() else {
                report.skip(path, "expected an array document");
                continue;
            };
            for index in 0..count {
                let item_path = format!("{}.{}", path, index);
                match items.get(&index.to_string()) {
                    Some(item) => {
                        apply_element(target, name, index, field_type, item, item_path, report)
                    }
                    None => report.skip(item_path, "missing array element"),
                }
            }
        } else if field_type == FieldType::Struct {
            match (element.as_document(), target.nested_mut(name)) {
                (Some(child_doc), Some(child)) => apply_document(child, child_doc, &path, report),
                (None, _) => report.skip(path, "expected a document"),
                (_, None) => report.skip(path, "host exposes no nested struct"),
            }
        } else {
            apply_element(target, name, 0, field_type, element, path, report);
        }
    }
}

fn apply_element<S: Struct + ?Sized>(
    target: &mut S,
    field: &str,
    index: usize,
    field_type: FieldType,
    element: &Element,
    path: String,
    report: &mut RestoreReport,
) {
    let Some(value) = convert(field_type, element) else {
        let reason = format!("{} does not fit {}", element.type_name(), field_type.name());
        report.skip(path, &reason);
        return;
    };
    match write_element(target, field, index, value) {
        Ok(()) => report.applied += 1,
        Err(e) => report.skip(path, &e.to_string()),
    }
}

/// Map an element payload onto a field type.
fn convert(field_type: FieldType, element: &Element) -> Option<Value> {
    match (element, field_type) {
        (Element::Boolean(v), FieldType::Bool) => Some(Value::Bool(*v)),
        (Element::String(text), FieldType::Enum(key)) => {
            let registry = enum_registry();
            registry
                .ordinal_of(key, text)
                .or_else(|| registry.ordinal_of_ignore_case(key, text))
                .or_else(|| text.parse::<i32>().ok())
                .map(Value::Enum)
        }
        (Element::String(text), FieldType::CString) => Some(Value::String(text.clone())),
        (Element::Int64(v), FieldType::U64) => Some(Value::U64(*v as u64)),
        (Element::Int32(v), t) => Value::integer(t, i128::from(*v)),
        (Element::Int64(v), t) => Value::integer(t, i128::from(*v)),
        (Element::Double(v), FieldType::F64) => Some(Value::F64(*v)),
        (Element::Double(v), FieldType::F32) => Value::narrow_f32(*v),
        _ => None,
    }
}
