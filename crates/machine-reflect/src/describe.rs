// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Human-readable rendering of a struct.

use crate::enum_registry::enum_registry;
use crate::reflect::Struct;
use crate::types::{classify, FieldType, Value};
use std::fmt::Write;

/// Render `target` as `{name: value, name: [v, v], ...}`.
///
/// Integers print as zero-padded lowercase hex, two digits per byte of
/// width. Enums print their name, or the decimal ordinal when no name
/// exists. Nested structs are rendered recursively. Debug-only fields are
/// included.
pub fn description<S: Struct + ?Sized>(target: &S) -> String {
    let mut out = String::new();
    describe_into(&mut out, target);
    out
}

fn describe_into<S: Struct + ?Sized>(out: &mut String, target: &S) {
    out.push('{');
    for (i, name) in target.all_keys().into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");

        let Some(field_type) = target.type_of(name) else {
            continue;
        };
        let count = target.count_of(name);
        if count != 1 {
            out.push('[');
        }
        for index in 0..count {
            if index > 0 {
                out.push_str(", ");
            }
            append_element(out, target, name, field_type, index);
        }
        if count != 1 {
            out.push(']');
        }
    }
    out.push('}');
}

fn append_element<S: Struct + ?Sized>(
    out: &mut String,
    target: &S,
    name: &str,
    field_type: FieldType,
    index: usize,
) {
    if field_type == FieldType::Struct {
        if let Some(child) = target.nested(name) {
            describe_into(out, child);
        }
        return;
    }

    let Some(value) = target.read(name, index) else {
        return;
    };
    let digits = classify(field_type).width * 2;
    // Writing into a String cannot fail.
    let _ = match value {
        Value::Bool(v) => write!(out, "{}", v),
        Value::U8(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::U16(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::U32(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::U64(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::I8(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::I16(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::I32(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::I64(v) => write!(out, "{:0w$x}", v, w = digits),
        Value::F32(v) => write!(out, "{}", v),
        Value::F64(v) => write!(out, "{}", v),
        Value::String(v) => write!(out, "{}", v),
        Value::Enum(ordinal) => match field_type
            .enum_key()
            .and_then(|key| enum_registry().name_of(key, ordinal))
        {
            Some(text) => write!(out, "{}", text),
            None => write!(out, "{}", ordinal),
        },
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Layout, LayoutBuilder, StructExt};
    use std::sync::OnceLock;

    crate::reflect_enum! {
        enum Colour { Red, Green }
    }

    #[derive(Default)]
    struct Nothing;

    impl Nothing {
        fn layout() -> &'static Layout<Nothing> {
            static LAYOUT: OnceLock<Layout<Nothing>> = OnceLock::new();
            LAYOUT.get_or_init(|| LayoutBuilder::<Nothing>::new().build())
        }
    }

    crate::impl_struct!(Nothing, Nothing::layout());

    struct Pixel {
        a: u8,
        neg: i8,
        wide: i32,
        colour: Colour,
        gamma: f64,
        label: String,
        rgb: [u16; 3],
        inner: Nothing,
    }

    impl Pixel {
        fn layout() -> &'static Layout<Pixel> {
            static LAYOUT: OnceLock<Layout<Pixel>> = OnceLock::new();
            LAYOUT.get_or_init(|| {
                LayoutBuilder::<Pixel>::new()
                    .field("a", |p| &p.a, |p| &mut p.a)
                    .field("neg", |p| &p.neg, |p| &mut p.neg)
                    .field("wide", |p| &p.wide, |p| &mut p.wide)
                    .enumeration("colour", |p| &p.colour, |p| &mut p.colour)
                    .field("gamma", |p| &p.gamma, |p| &mut p.gamma)
                    .field("label", |p| &p.label, |p| &mut p.label)
                    .array("rgb", |p| &p.rgb, |p| &mut p.rgb)
                    .nested("inner", |p| &p.inner, |p| &mut p.inner)
                    .debug_only()
                    .build()
            })
        }
    }

    crate::impl_struct!(Pixel, Pixel::layout());

    #[test]
    fn test_empty_struct() {
        assert_eq!(Nothing.description(), "{}");
    }

    #[test]
    fn test_full_rendering() {
        let pixel = Pixel {
            a: 1,
            neg: -5,
            wide: 0x1234,
            colour: Colour::Green,
            gamma: 2.2,
            label: "dot".into(),
            rgb: [0xff, 0x10, 0],
            inner: Nothing,
        };
        assert_eq!(
            pixel.description(),
            "{a: 01, neg: fb, wide: 00001234, colour: Green, gamma: 2.2, label: dot, \
             rgb: [00ff, 0010, 0000], inner: {}}"
        );
    }
}
