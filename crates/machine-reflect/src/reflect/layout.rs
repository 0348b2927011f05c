// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration-time field tables for host types.
//!
//! A [`Layout`] binds each field name of a host type `T` to typed accessors
//! over `&T` / `&mut T`. Build it once (typically inside a `OnceLock`) and
//! implement [`Struct`] with [`impl_struct!`](crate::impl_struct).
//!
//! # Example
//!
//! ```rust
//! use machine_reflect::{impl_struct, Layout, LayoutBuilder, StructExt};
//! use std::sync::OnceLock;
//!
//! #[derive(Default)]
//! struct Timer {
//!     counter: u16,
//!     reload: u16,
//!     running: bool,
//! }
//!
//! impl Timer {
//!     fn layout() -> &'static Layout<Timer> {
//!         static LAYOUT: OnceLock<Layout<Timer>> = OnceLock::new();
//!         LAYOUT.get_or_init(|| {
//!             LayoutBuilder::<Timer>::new()
//!                 .field("counter", |t| &t.counter, |t| &mut t.counter)
//!                 .field("reload", |t| &t.reload, |t| &mut t.reload)
//!                 .field("running", |t| &t.running, |t| &mut t.running)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_struct!(Timer, Timer::layout());
//!
//! let mut timer = Timer::default();
//! timer.set("running", true).unwrap();
//! assert_eq!(timer.description(), "{counter: 0000, reload: 0000, running: true}");
//! ```

use crate::enum_registry::{register_enum, EnumKey, ReflectEnum};
use crate::reflect::Struct;
use crate::types::{FieldType, Scalar, Value};

/// Per-element read/write capability for one field.
trait ElementAccess<T>: Send + Sync {
    fn read(&self, host: &T, index: usize) -> Option<Value>;
    fn write(&self, host: &mut T, index: usize, value: Value) -> bool;
}

/// Access to a nested struct field.
trait NestedAccess<T>: Send + Sync {
    fn get<'a>(&self, host: &'a T) -> &'a dyn Struct;
    fn get_mut<'a>(&self, host: &'a mut T) -> &'a mut dyn Struct;
}

struct ScalarSlot<T, S> {
    get: fn(&T) -> &S,
    get_mut: fn(&mut T) -> &mut S,
}

impl<T, S: Scalar> ElementAccess<T> for ScalarSlot<T, S> {
    fn read(&self, host: &T, index: usize) -> Option<Value> {
        (index == 0).then(|| (self.get)(host).to_value())
    }

    fn write(&self, host: &mut T, index: usize, value: Value) -> bool {
        if index != 0 {
            return false;
        }
        match S::from_value(value) {
            Some(v) => {
                *(self.get_mut)(host) = v;
                true
            }
            None => false,
        }
    }
}

struct ArraySlot<T, S, const N: usize> {
    get: fn(&T) -> &[S; N],
    get_mut: fn(&mut T) -> &mut [S; N],
}

impl<T, S: Scalar, const N: usize> ElementAccess<T> for ArraySlot<T, S, N> {
    fn read(&self, host: &T, index: usize) -> Option<Value> {
        (self.get)(host).get(index).map(Scalar::to_value)
    }

    fn write(&self, host: &mut T, index: usize, value: Value) -> bool {
        let Some(v) = S::from_value(value) else {
            return false;
        };
        match (self.get_mut)(host).get_mut(index) {
            Some(slot) => {
                *slot = v;
                true
            }
            None => false,
        }
    }
}

struct EnumSlot<T, E> {
    get: fn(&T) -> &E,
    get_mut: fn(&mut T) -> &mut E,
}

impl<T, E: ReflectEnum> ElementAccess<T> for EnumSlot<T, E> {
    fn read(&self, host: &T, index: usize) -> Option<Value> {
        (index == 0).then(|| Value::Enum((self.get)(host).ordinal()))
    }

    fn write(&self, host: &mut T, index: usize, value: Value) -> bool {
        // Ordinals the Rust enum cannot represent are refused here.
        match (index, value) {
            (0, Value::Enum(ordinal)) => match E::from_ordinal(ordinal) {
                Some(v) => {
                    *(self.get_mut)(host) = v;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

/// Enum field stored as a raw ordinal; any `i32` is accepted.
struct OrdinalSlot<T> {
    get: fn(&T) -> &i32,
    get_mut: fn(&mut T) -> &mut i32,
}

impl<T> ElementAccess<T> for OrdinalSlot<T> {
    fn read(&self, host: &T, index: usize) -> Option<Value> {
        (index == 0).then(|| Value::Enum(*(self.get)(host)))
    }

    fn write(&self, host: &mut T, index: usize, value: Value) -> bool {
        match (index, value) {
            (0, Value::Enum(ordinal)) => {
                *(self.get_mut)(host) = ordinal;
                true
            }
            _ => false,
        }
    }
}

struct NestedSlot<T, N> {
    get: fn(&T) -> &N,
    get_mut: fn(&mut T) -> &mut N,
}

impl<T, N: Struct + 'static> NestedAccess<T> for NestedSlot<T, N> {
    fn get<'a>(&self, host: &'a T) -> &'a dyn Struct {
        (self.get)(host)
    }

    fn get_mut<'a>(&self, host: &'a mut T) -> &'a mut dyn Struct {
        (self.get_mut)(host)
    }
}

enum Access<T> {
    Elements(Box<dyn ElementAccess<T>>),
    Nested(Box<dyn NestedAccess<T>>),
}

/// Descriptor of one registered field.
pub struct FieldDescriptor<T> {
    name: String,
    field_type: FieldType,
    count: usize,
    serializable: bool,
    access: Access<T>,
}

impl<T> FieldDescriptor<T> {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared field type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Element count (1 for scalars).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether documents include this field.
    pub fn is_serializable(&self) -> bool {
        self.serializable
    }
}

/// Immutable field table for a host type.
pub struct Layout<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T> Layout<T> {
    /// Registered fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn type_of(&self, name: &str) -> Option<FieldType> {
        self.field(name).map(|f| f.field_type)
    }

    pub fn count_of(&self, name: &str) -> usize {
        self.field(name).map_or(0, |f| f.count)
    }

    pub fn should_serialise(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.serializable)
    }

    /// Read element `index` of `name` from `host`.
    pub fn read(&self, host: &T, name: &str, index: usize) -> Option<Value> {
        let field = self.field(name)?;
        if index >= field.count {
            return None;
        }
        match &field.access {
            Access::Elements(access) => access.read(host, index),
            Access::Nested(_) => None,
        }
    }

    /// Write element `index` of `name` on `host`.
    pub fn write(&self, host: &mut T, name: &str, index: usize, value: Value) -> bool {
        let Some(field) = self.field(name) else {
            return false;
        };
        if index >= field.count || !value.matches(field.field_type) {
            return false;
        }
        match &field.access {
            Access::Elements(access) => access.write(host, index, value),
            Access::Nested(_) => false,
        }
    }

    pub fn nested<'a>(&self, host: &'a T, name: &str) -> Option<&'a dyn Struct> {
        match &self.field(name)?.access {
            Access::Nested(access) => Some(access.get(host)),
            Access::Elements(_) => None,
        }
    }

    pub fn nested_mut<'a>(&self, host: &'a mut T, name: &str) -> Option<&'a mut dyn Struct> {
        match &self.field(name)?.access {
            Access::Nested(access) => Some(access.get_mut(host)),
            Access::Elements(_) => None,
        }
    }
}

/// Builder for [`Layout`].
///
/// # Panics
///
/// Registering the same field name twice, or a zero-length array, is a
/// contract violation and panics.
pub struct LayoutBuilder<T> {
    fields: Vec<FieldDescriptor<T>>,
}

impl<T: 'static> LayoutBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a scalar field.
    pub fn field<S: Scalar>(
        self,
        name: impl Into<String>,
        get: fn(&T) -> &S,
        get_mut: fn(&mut T) -> &mut S,
    ) -> Self {
        let access = Access::Elements(Box::new(ScalarSlot { get, get_mut }));
        self.push(name.into(), S::FIELD_TYPE, 1, access)
    }

    /// Add a fixed-size array field.
    pub fn array<S: Scalar, const N: usize>(
        self,
        name: impl Into<String>,
        get: fn(&T) -> &[S; N],
        get_mut: fn(&mut T) -> &mut [S; N],
    ) -> Self {
        let access = Access::Elements(Box::new(ArraySlot { get, get_mut }));
        self.push(name.into(), S::FIELD_TYPE, N, access)
    }

    /// Add an enum field, registering the enum's names.
    pub fn enumeration<E: ReflectEnum>(
        self,
        name: impl Into<String>,
        get: fn(&T) -> &E,
        get_mut: fn(&mut T) -> &mut E,
    ) -> Self {
        let name = name.into();
        if let Err(e) = register_enum::<E>() {
            log::error!("[Layout] field {}: {}", name, e);
        }
        let access = Access::Elements(Box::new(EnumSlot { get, get_mut }));
        self.push(name, FieldType::Enum(EnumKey::of::<E>()), 1, access)
    }

    /// Add an enum field kept as a raw `i32` ordinal.
    ///
    /// Names come from `E`, but the field accepts ordinals outside its
    /// range; those render and serialise as decimal text.
    pub fn enum_ordinal<E: ReflectEnum>(
        self,
        name: impl Into<String>,
        get: fn(&T) -> &i32,
        get_mut: fn(&mut T) -> &mut i32,
    ) -> Self {
        let name = name.into();
        if let Err(e) = register_enum::<E>() {
            log::error!("[Layout] field {}: {}", name, e);
        }
        let access = Access::Elements(Box::new(OrdinalSlot { get, get_mut }));
        self.push(name, FieldType::Enum(EnumKey::of::<E>()), 1, access)
    }

    /// Add a nested struct field.
    pub fn nested<N: Struct + 'static>(
        self,
        name: impl Into<String>,
        get: fn(&T) -> &N,
        get_mut: fn(&mut T) -> &mut N,
    ) -> Self {
        let access = Access::Nested(Box::new(NestedSlot { get, get_mut }));
        self.push(name.into(), FieldType::Struct, 1, access)
    }

    /// Exclude the most recently added field from documents.
    pub fn debug_only(mut self) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.serializable = false;
        }
        self
    }

    /// Build the layout.
    pub fn build(self) -> Layout<T> {
        Layout {
            fields: self.fields,
        }
    }

    fn push(mut self, name: String, field_type: FieldType, count: usize, access: Access<T>) -> Self {
        assert!(
            self.fields.iter().all(|f| f.name != name),
            "field `{}` registered twice",
            name
        );
        assert!(count > 0, "field `{}` has no elements", name);
        self.fields.push(FieldDescriptor {
            name,
            field_type,
            count,
            serializable: true,
            access,
        });
        self
    }
}

impl<T: 'static> Default for LayoutBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implement [`Struct`] for a host type by delegating to a `'static` [`Layout`].
///
/// ```rust,ignore
/// impl_struct!(Machine, Machine::layout());
/// ```
#[macro_export]
macro_rules! impl_struct {
    ($ty:ty, $layout:expr) => {
        impl $crate::Struct for $ty {
            fn all_keys(&self) -> ::std::vec::Vec<&str> {
                $layout.keys()
            }

            fn type_of(&self, name: &str) -> ::std::option::Option<$crate::FieldType> {
                $layout.type_of(name)
            }

            fn count_of(&self, name: &str) -> usize {
                $layout.count_of(name)
            }

            fn read(&self, name: &str, index: usize) -> ::std::option::Option<$crate::Value> {
                $layout.read(self, name, index)
            }

            fn write(&mut self, name: &str, index: usize, value: $crate::Value) -> bool {
                $layout.write(self, name, index, value)
            }

            fn nested(&self, name: &str) -> ::std::option::Option<&dyn $crate::Struct> {
                $layout.nested(self, name)
            }

            fn nested_mut(&mut self, name: &str) -> ::std::option::Option<&mut dyn $crate::Struct> {
                $layout.nested_mut(self, name)
            }

            fn should_serialise(&self, name: &str) -> bool {
                $layout.should_serialise(name)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    crate::reflect_enum! {
        enum Phase { Fetch, Execute }
    }

    #[derive(Default)]
    struct Inner {
        x: u8,
    }

    impl Inner {
        fn layout() -> &'static Layout<Inner> {
            static LAYOUT: OnceLock<Layout<Inner>> = OnceLock::new();
            LAYOUT.get_or_init(|| {
                LayoutBuilder::<Inner>::new()
                    .field("x", |s| &s.x, |s| &mut s.x)
                    .build()
            })
        }
    }

    crate::impl_struct!(Inner, Inner::layout());

    struct Host {
        a: i16,
        regs: [u8; 3],
        phase: Phase,
        inner: Inner,
        scratch: u32,
    }

    impl Host {
        fn new() -> Self {
            Self {
                a: -2,
                regs: [1, 2, 3],
                phase: Phase::Fetch,
                inner: Inner::default(),
                scratch: 0,
            }
        }

        fn layout() -> &'static Layout<Host> {
            static LAYOUT: OnceLock<Layout<Host>> = OnceLock::new();
            LAYOUT.get_or_init(|| {
                LayoutBuilder::<Host>::new()
                    .field("a", |h| &h.a, |h| &mut h.a)
                    .array("regs", |h| &h.regs, |h| &mut h.regs)
                    .enumeration("phase", |h| &h.phase, |h| &mut h.phase)
                    .nested("inner", |h| &h.inner, |h| &mut h.inner)
                    .field("scratch", |h| &h.scratch, |h| &mut h.scratch)
                    .debug_only()
                    .build()
            })
        }
    }

    crate::impl_struct!(Host, Host::layout());

    #[test]
    fn test_layout_shape() {
        let host = Host::new();
        assert_eq!(host.all_keys(), vec!["a", "regs", "phase", "inner", "scratch"]);
        assert_eq!(host.type_of("a"), Some(FieldType::I16));
        assert_eq!(host.type_of("inner"), Some(FieldType::Struct));
        assert_eq!(
            host.type_of("phase"),
            Some(FieldType::Enum(EnumKey::of::<Phase>()))
        );
        assert_eq!(host.count_of("regs"), 3);
        assert_eq!(host.count_of("nope"), 0);
        assert!(host.should_serialise("a"));
        assert!(!host.should_serialise("scratch"));
        assert!(!host.should_serialise("nope"));
    }

    #[test]
    fn test_element_access() {
        let mut host = Host::new();
        assert_eq!(host.read("regs", 2), Some(Value::U8(3)));
        assert_eq!(host.read("regs", 3), None);
        assert!(host.write("regs", 1, Value::U8(9)));
        assert!(!host.write("regs", 1, Value::U16(9)));
        assert_eq!(host.regs, [1, 9, 3]);

        assert_eq!(host.read("phase", 0), Some(Value::Enum(0)));
        assert!(host.write("phase", 0, Value::Enum(1)));
        assert_eq!(host.phase, Phase::Execute);
        assert!(!host.write("phase", 0, Value::Enum(7)));
        assert_eq!(host.phase, Phase::Execute);
    }

    #[test]
    fn test_ordinal_enum_accepts_any_ordinal() {
        struct Latch {
            phase: i32,
        }
        impl Latch {
            fn layout() -> &'static Layout<Latch> {
                static LAYOUT: OnceLock<Layout<Latch>> = OnceLock::new();
                LAYOUT.get_or_init(|| {
                    LayoutBuilder::<Latch>::new()
                        .enum_ordinal::<Phase>("phase", |l| &l.phase, |l| &mut l.phase)
                        .build()
                })
            }
        }
        crate::impl_struct!(Latch, Latch::layout());

        let mut latch = Latch { phase: 0 };
        assert_eq!(
            latch.type_of("phase"),
            Some(FieldType::Enum(EnumKey::of::<Phase>()))
        );
        assert!(latch.write("phase", 0, Value::Enum(-3)));
        assert_eq!(latch.phase, -3);
        assert_eq!(latch.read("phase", 0), Some(Value::Enum(-3)));
        assert!(!latch.write("phase", 0, Value::I32(1)));
        assert!(!latch.write("phase", 1, Value::Enum(1)));
    }

    #[test]
    fn test_nested_access() {
        let mut host = Host::new();
        assert!(host.read("inner", 0).is_none());
        let inner = host.nested_mut("inner").expect("nested");
        assert!(inner.write("x", 0, Value::U8(5)));
        assert_eq!(host.inner.x, 5);
        assert!(host.nested("a").is_none());
        assert_eq!(
            host.nested("inner").and_then(|n| n.read("x", 0)),
            Some(Value::U8(5))
        );
    }

    #[test]
    fn test_enum_names_registered_by_layout() {
        let _ = Host::layout();
        let key = EnumKey::of::<Phase>();
        assert_eq!(
            crate::enum_registry().names(key),
            Some(&["Fetch", "Execute"][..])
        );
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_field_panics() {
        let _ = LayoutBuilder::<Host>::new()
            .field("a", |h| &h.a, |h| &mut h.a)
            .field("a", |h| &h.a, |h| &mut h.a);
    }
}
