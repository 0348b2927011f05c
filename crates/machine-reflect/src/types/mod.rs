// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field type classification and element values.

mod scalar;
mod type_descriptor;
mod value;

pub use scalar::Scalar;
pub use type_descriptor::{classify, FieldType, Kind, TypeDescriptor};
pub use value::Value;
