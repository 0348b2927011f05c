// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct contract, field layouts and the convenience extension trait.

mod layout;
mod strukt;

pub use layout::{FieldDescriptor, Layout, LayoutBuilder};
pub use strukt::Struct;

use crate::access::{self, Input};
use crate::document::{self, RestoreReport};
use crate::error::Result;
use crate::options::{OptionReport, OptionSet};
use crate::types::Scalar;

/// Method-call access to the reflection operations for every [`Struct`].
pub trait StructExt: Struct {
    /// Typed read of element 0. See [`access::get`].
    fn get<T: Scalar>(&self, name: &str) -> Result<T> {
        access::get_at(self, name, 0)
    }

    /// Typed read of element `index`.
    fn get_at<T: Scalar>(&self, name: &str, index: usize) -> Result<T> {
        access::get_at(self, name, index)
    }

    /// Write an int, string or bool to element 0. See [`access::set`].
    fn set<'a>(&mut self, name: &str, input: impl Into<Input<'a>>) -> Result<()> {
        access::set_at(self, name, 0, input)
    }

    /// Write an int, string or bool to element `index`.
    fn set_at<'a>(&mut self, name: &str, index: usize, input: impl Into<Input<'a>>) -> Result<()> {
        access::set_at(self, name, index, input)
    }

    /// Tolerant enum assignment. See [`access::fuzzy_set`].
    fn fuzzy_set(&mut self, name: &str, text: &str) -> Result<()> {
        access::fuzzy_set(self, name, text)
    }

    /// Encode as a document. See [`document::serialise`].
    fn serialise(&self) -> Vec<u8> {
        document::serialise(self)
    }

    /// Apply a serialized document. See [`document::restore`].
    fn restore(&mut self, bytes: &[u8]) -> Result<RestoreReport> {
        document::restore(self, bytes)
    }

    /// Human-readable rendering. See [`crate::describe::description`].
    fn description(&self) -> String {
        crate::describe::description(self)
    }

    /// Apply configuration options. See [`OptionSet::apply`].
    fn apply_options(&mut self, options: &OptionSet) -> OptionReport {
        options.apply(self)
    }
}

impl<S: Struct + ?Sized> StructExt for S {}
