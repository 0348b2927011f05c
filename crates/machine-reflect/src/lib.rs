// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # machine-reflect - Runtime field reflection for emulated machine state
//!
//! Host types expose their fields by name through the [`Struct`] contract.
//! On top of that contract the crate provides typed access with a safe
//! conversion lattice, compact binary save states, human-readable dumps and
//! text configuration.
//!
//! ## Quick Start
//!
//! ```rust
//! use machine_reflect::{impl_struct, reflect_enum, Layout, LayoutBuilder, StructExt};
//! use std::sync::OnceLock;
//!
//! reflect_enum! {
//!     pub enum Model { Standard, Turbo }
//! }
//!
//! struct Config {
//!     model: Model,
//!     ram_kb: u16,
//!     fast_boot: bool,
//! }
//!
//! impl Config {
//!     fn layout() -> &'static Layout<Config> {
//!         static LAYOUT: OnceLock<Layout<Config>> = OnceLock::new();
//!         LAYOUT.get_or_init(|| {
//!             LayoutBuilder::<Config>::new()
//!                 .enumeration("model", |c| &c.model, |c| &mut c.model)
//!                 .field("ram_kb", |c| &c.ram_kb, |c| &mut c.ram_kb)
//!                 .field("fast_boot", |c| &c.fast_boot, |c| &mut c.fast_boot)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_struct!(Config, Config::layout());
//!
//! let mut config = Config { model: Model::Standard, ram_kb: 64, fast_boot: false };
//! config.fuzzy_set("model", "turbo").unwrap();
//! assert_eq!(config.get::<i32>("ram_kb").unwrap(), 64);
//! assert_eq!(config.description(), "{model: Turbo, ram_kb: 0040, fast_boot: false}");
//!
//! let saved = config.serialise();
//! let mut restored = Config { model: Model::Standard, ram_kb: 0, fast_boot: true };
//! restored.restore(&saved).unwrap();
//! assert_eq!(restored.model, Model::Turbo);
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Struct`] | Field enumeration and element access contract |
//! | [`StructExt`] | Method syntax for every operation below |
//! | [`LayoutBuilder`] | Builds the field table that backs [`impl_struct!`] |
//! | [`EnumRegistry`] | Process-wide enum name tables |
//! | [`Document`] | Parsed binary document |
//! | [`OptionSet`] | `path=value` configuration entries |
//!
//! ## Features
//!
//! - `yaml-options` (default): load [`OptionSet`]s from YAML files.

pub mod access;
pub mod describe;
pub mod document;
pub mod enum_registry;
pub mod error;
pub mod options;
pub mod reflect;
pub mod types;

pub use access::{fuzzy_set, get, get_at, set, set_at, Input};
pub use describe::description;
pub use document::{restore, serialise, Document, DocumentError, Element, RestoreReport};
pub use enum_registry::{enum_registry, register_enum, EnumKey, EnumRegistry, ReflectEnum};
pub use error::{ReflectError, Result};
pub use options::{OptionError, OptionReport, OptionSet};
pub use reflect::{FieldDescriptor, Layout, LayoutBuilder, Struct, StructExt};
pub use types::{classify, FieldType, Kind, Scalar, TypeDescriptor, Value};
