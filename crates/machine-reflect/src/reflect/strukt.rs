// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The contract a host object implements to expose its state.

use crate::types::{FieldType, Value};

/// A named, ordered, fixed set of typed fields.
///
/// Hosts normally implement this through a [`Layout`](crate::Layout) and
/// [`impl_struct!`](crate::impl_struct); a hand-written implementation must
/// keep the answers for one field name consistent with each other:
/// `read` returns values matching `type_of`, and indices below `count_of`
/// are valid.
pub trait Struct {
    /// Field names in declaration order.
    fn all_keys(&self) -> Vec<&str>;

    /// Declared type of a field.
    fn type_of(&self, name: &str) -> Option<FieldType>;

    /// Element count of a field (0 if absent).
    fn count_of(&self, name: &str) -> usize;

    /// Current value of element `index`.
    fn read(&self, name: &str, index: usize) -> Option<Value>;

    /// Store `value` into element `index`. Returns false if refused.
    fn write(&mut self, name: &str, index: usize, value: Value) -> bool;

    /// Nested struct held by a [`FieldType::Struct`] field.
    fn nested(&self, name: &str) -> Option<&dyn Struct>;

    /// Mutable nested struct held by a [`FieldType::Struct`] field.
    fn nested_mut(&mut self, name: &str) -> Option<&mut dyn Struct>;

    /// Whether the field is included in serialized documents.
    fn should_serialise(&self, _name: &str) -> bool {
        true
    }
}
