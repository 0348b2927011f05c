// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Process-wide table of enum symbol names.
//!
//! Entries are appended during start-up (normally when a host type's layout
//! is first built) and only read afterwards. Ordinals index the name list.

use crate::error::{ReflectError, Result};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

static REGISTRY: OnceLock<EnumRegistry> = OnceLock::new();

/// A fieldless enum whose variants can be named by ordinal.
///
/// Usually implemented through [`reflect_enum!`](crate::reflect_enum).
pub trait ReflectEnum: Copy + 'static {
    /// Variant names, indexed by ordinal.
    const NAMES: &'static [&'static str];

    /// Ordinal of this variant.
    fn ordinal(self) -> i32;

    /// Variant for an ordinal, if one exists.
    fn from_ordinal(ordinal: i32) -> Option<Self>;
}

/// Identity of an enumerated type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumKey {
    id: TypeId,
    name: &'static str,
}

impl EnumKey {
    /// Key for a Rust type.
    pub fn of<E: 'static>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }

    /// Full type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for EnumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumKey({})", self.name)
    }
}

/// Append-only map from enum type to its ordered names.
pub struct EnumRegistry {
    entries: RwLock<HashMap<EnumKey, &'static [&'static str]>>,
}

impl EnumRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Register a [`ReflectEnum`] type. Registering twice is a no-op.
    pub fn register<E: ReflectEnum>(&self) -> Result<EnumKey> {
        let key = EnumKey::of::<E>();
        self.register_names(key, E::NAMES)?;
        Ok(key)
    }

    /// Register a name list under `key`.
    ///
    /// Names must be unique. Re-registering the same list is accepted; a
    /// different list for a known key is refused.
    pub fn register_names(&self, key: EnumKey, names: &'static [&'static str]) -> Result<()> {
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ReflectError::DuplicateEnumName {
                    type_name: key.type_name().to_string(),
                    name: (*name).to_string(),
                });
            }
        }

        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&key) {
            if *existing == names {
                return Ok(());
            }
            log::error!(
                "[EnumRegistry] {} registered again with different names",
                key.type_name()
            );
            return Err(ReflectError::EnumConflict {
                type_name: key.type_name().to_string(),
            });
        }

        log::debug!(
            "[EnumRegistry] registered {} ({} names)",
            key.type_name(),
            names.len()
        );
        entries.insert(key, names);
        Ok(())
    }

    /// Check if `key` is registered.
    pub fn contains(&self, key: EnumKey) -> bool {
        self.entries.read().contains_key(&key)
    }

    /// All names for `key`, in ordinal order.
    pub fn names(&self, key: EnumKey) -> Option<&'static [&'static str]> {
        self.entries.read().get(&key).copied()
    }

    /// Name of `ordinal`, if it is in range.
    pub fn name_of(&self, key: EnumKey, ordinal: i32) -> Option<&'static str> {
        let index = usize::try_from(ordinal).ok()?;
        self.names(key)?.get(index).copied()
    }

    /// Ordinal of an exactly matching name.
    pub fn ordinal_of(&self, key: EnumKey, name: &str) -> Option<i32> {
        let position = self.names(key)?.iter().position(|n| *n == name)?;
        i32::try_from(position).ok()
    }

    /// Ordinal of the first name equal to `name` ignoring ASCII case.
    pub fn ordinal_of_ignore_case(&self, key: EnumKey, name: &str) -> Option<i32> {
        let position = self
            .names(key)?
            .iter()
            .position(|n| n.len() == name.len() && n.eq_ignore_ascii_case(name))?;
        i32::try_from(position).ok()
    }

    /// Number of registered enum types.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EnumRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry.
pub fn enum_registry() -> &'static EnumRegistry {
    REGISTRY.get_or_init(EnumRegistry::new)
}

/// Register `E` in the process-wide registry.
pub fn register_enum<E: ReflectEnum>() -> Result<EnumKey> {
    enum_registry().register::<E>()
}

/// Declare a fieldless enum together with its [`ReflectEnum`] implementation.
///
/// The generated enum derives `Debug`, `Clone`, `Copy`, `PartialEq` and `Eq`;
/// variant identifiers become the registered names.
///
/// ```rust
/// machine_reflect::reflect_enum! {
///     pub enum Speed { Slow, Fast }
/// }
/// use machine_reflect::ReflectEnum;
/// assert_eq!(Speed::NAMES, &["Slow", "Fast"]);
/// assert_eq!(Speed::from_ordinal(1), Some(Speed::Fast));
/// ```
#[macro_export]
macro_rules! reflect_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::ReflectEnum for $name {
            const NAMES: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn ordinal(self) -> i32 {
                self as i32
            }

            fn from_ordinal(ordinal: i32) -> Option<Self> {
                const ALL: &[$name] = &[$($name::$variant),+];
                usize::try_from(ordinal).ok().and_then(|i| ALL.get(i).copied())
            }
        }
    };
}
