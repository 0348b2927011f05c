// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text options applied to structs by dotted path.
//!
//! An [`OptionSet`] is an ordered list of `path=value` pairs. Paths walk
//! nested structs (`cpu.mode`) and may end in an array index (`regs.2`).
//!
//! ```rust
//! use machine_reflect::OptionSet;
//!
//! let options = OptionSet::parse("speed=0x10, mode=turbo; verbose");
//! assert_eq!(options.len(), 3);
//! assert_eq!(options.get("verbose"), Some("true"));
//! ```
//!
//! With the default `yaml-options` feature, nested YAML mappings are
//! flattened into the same dotted paths:
//!
//! ```yaml
//! cpu:
//!   mode: turbo
//!   regs: [1, 2, 3]
//! audio: off
//! ```

use crate::access::{self, write_element};
use crate::enum_registry::enum_registry;
use crate::error::ReflectError;
use crate::reflect::Struct;
use crate::types::{FieldType, Value};
use std::fmt;
#[cfg(feature = "yaml-options")]
use std::path::Path;

/// Errors for loading or applying options.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionError {
    Io(String),
    Yaml(String),
    UnknownPath(String),
    InvalidValue {
        path: String,
        value: String,
        expected: &'static str,
    },
    Rejected {
        path: String,
        source: ReflectError,
    },
}

impl OptionError {
    /// Option path this error is about, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Io(_) | Self::Yaml(_) => None,
            Self::UnknownPath(path)
            | Self::InvalidValue { path, .. }
            | Self::Rejected { path, .. } => Some(path),
        }
    }
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "Failed to read options: {}", msg),
            Self::Yaml(msg) => write!(f, "Failed to parse YAML options: {}", msg),
            Self::UnknownPath(path) => write!(f, "Unknown option path: {}", path),
            Self::InvalidValue {
                path,
                value,
                expected,
            } => write!(
                f,
                "Invalid value '{}' for {}: expected {}",
                value, path, expected
            ),
            Self::Rejected { path, source } => write!(f, "Option {} rejected: {}", path, source),
        }
    }
}

impl std::error::Error for OptionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Outcome of [`OptionSet::apply`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionReport {
    /// Paths written successfully.
    pub applied: Vec<String>,
    pub rejected: Vec<OptionError>,
}

impl OptionReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Ordered `path=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<(String, String)>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs separated by `,`, `;` or newlines.
    ///
    /// A bare key means `true`. Lines starting with `#` are ignored.
    pub fn parse(text: &str) -> Self {
        let mut set = Self::new();
        for item in text.split([',', ';', '\n']) {
            let item = item.trim();
            if item.is_empty() || item.starts_with('#') {
                continue;
            }
            match item.split_once('=') {
                Some((key, value)) => set.push(key.trim(), value.trim()),
                None => set.push(item, "true"),
            }
        }
        set
    }

    /// Collect `--key=value`, `--flag` and `--no-flag` arguments.
    ///
    /// Arguments without a leading `--` are ignored.
    pub fn from_args<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<str>,
    {
        let mut set = Self::new();
        for arg in args {
            let Some(option) = arg.as_ref().strip_prefix("--") else {
                continue;
            };
            if option.is_empty() {
                continue;
            }
            if let Some((key, value)) = option.split_once('=') {
                set.push(key, value);
            } else if let Some(key) = option.strip_prefix("no-") {
                set.push(key, "false");
            } else {
                set.push(option, "true");
            }
        }
        set
    }

    /// Flatten a YAML mapping into dotted paths.
    #[cfg(feature = "yaml-options")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, OptionError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        let root: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| OptionError::Yaml(e.to_string()))?;
        let mut set = Self::new();
        match root {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(_) => flatten_yaml(&mut set, "", &root)?,
            _ => return Err(OptionError::Yaml("top level must be a mapping".into())),
        }
        Ok(set)
    }

    /// Read and flatten a YAML options file.
    #[cfg(feature = "yaml-options")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OptionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| OptionError::Io(format!("{}: {}", path.display(), e)))?;
        let set = Self::from_yaml_str(&content)?;
        log::debug!("[Options] loaded {} entries from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn push(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.entries.push((path.into(), value.into()));
    }

    /// Append `other`; later entries win when applied.
    pub fn extend(&mut self, other: OptionSet) {
        self.entries.extend(other.entries);
    }

    /// Last value given for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry in order. Failures are collected, never fatal.
    pub fn apply<S: Struct + ?Sized>(&self, target: &mut S) -> OptionReport {
        let mut report = OptionReport::default();
        for (path, text) in &self.entries {
            let segments: Vec<&str> = path.split('.').collect();
            match apply_path(target, path, &segments, text) {
                Ok(()) => report.applied.push(path.clone()),
                Err(e) => {
                    log::warn!("[Options] {}", e);
                    report.rejected.push(e);
                }
            }
        }
        report
    }
}

#[cfg(feature = "yaml-options")]
fn flatten_yaml(
    set: &mut OptionSet,
    prefix: &str,
    value: &serde_yaml::Value,
) -> Result<(), OptionError> {
    use serde_yaml::Value as Yaml;

    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Yaml::Mapping(map) => {
            for (key, child) in map {
                let key = match key {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    _ => return Err(OptionError::Yaml(format!("unsupported key under '{}'", prefix))),
                };
                flatten_yaml(set, &join(&key), child)?;
            }
        }
        Yaml::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_yaml(set, &join(&index.to_string()), child)?;
            }
        }
        Yaml::String(s) => set.push(prefix, s.as_str()),
        Yaml::Number(n) => set.push(prefix, n.to_string()),
        Yaml::Bool(b) => set.push(prefix, b.to_string()),
        Yaml::Null => {}
        Yaml::Tagged(tagged) => flatten_yaml(set, prefix, &tagged.value)?,
    }
    Ok(())
}

fn apply_path<S: Struct + ?Sized>(
    target: &mut S,
    path: &str,
    segments: &[&str],
    text: &str,
) -> Result<(), OptionError> {
    let unknown = || OptionError::UnknownPath(path.to_string());
    let (&head, rest) = segments.split_first().ok_or_else(unknown)?;
    let field_type = target.type_of(head).ok_or_else(unknown)?;

    match (field_type, rest) {
        (FieldType::Struct, []) => Err(OptionError::InvalidValue {
            path: path.to_string(),
            value: text.to_string(),
            expected: "a field inside the nested struct",
        }),
        (FieldType::Struct, _) => {
            let child = target.nested_mut(head).ok_or_else(unknown)?;
            apply_path(child, path, rest, text)
        }
        (_, []) => apply_text(target, path, head, 0, field_type, text),
        (_, [index]) => {
            let index = index.parse::<usize>().map_err(|_| unknown())?;
            apply_text(target, path, head, index, field_type, text)
        }
        _ => Err(unknown()),
    }
}

fn apply_text<S: Struct + ?Sized>(
    target: &mut S,
    path: &str,
    field: &str,
    index: usize,
    field_type: FieldType,
    text: &str,
) -> Result<(), OptionError> {
    let invalid = |expected: &'static str| OptionError::InvalidValue {
        path: path.to_string(),
        value: text.to_string(),
        expected,
    };
    let rejected = |source: ReflectError| OptionError::Rejected {
        path: path.to_string(),
        source,
    };

    let value = match field_type {
        FieldType::Bool => Value::Bool(parse_bool(text).ok_or_else(|| invalid("a boolean"))?),
        FieldType::Enum(key) => {
            if index == 0 {
                match access::fuzzy_set(target, field, text) {
                    Err(ReflectError::UnknownEnumName { .. }) => {}
                    other => return other.map_err(rejected),
                }
            } else if let Some(ordinal) = enum_registry()
                .ordinal_of(key, text)
                .or_else(|| enum_registry().ordinal_of_ignore_case(key, text))
            {
                return write_element(target, field, index, Value::Enum(ordinal)).map_err(rejected);
            }
            let ordinal = text
                .parse::<i32>()
                .map_err(|_| invalid("an enum name or ordinal"))?;
            Value::Enum(ordinal)
        }
        FieldType::F32 => text
            .parse::<f64>()
            .ok()
            .and_then(Value::narrow_f32)
            .ok_or_else(|| invalid("a number in f32 range"))?,
        FieldType::F64 => Value::F64(text.parse().map_err(|_| invalid("a number"))?),
        FieldType::CString => Value::String(text.to_string()),
        FieldType::Struct => return Err(invalid("a field inside the nested struct")),
        _ => parse_int(text)
            .and_then(|v| Value::integer(field_type, v))
            .ok_or_else(|| invalid("an integer in range"))?,
    };

    write_element(target, field, index, value).map_err(rejected)
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Decimal or `0x` hex, with an optional leading `-`.
fn parse_int(text: &str) -> Option<i128> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.starts_with(['-', '+']) {
        return None;
    }
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if !hex.starts_with(['-', '+']) => i128::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None => digits.parse::<i128>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Layout, LayoutBuilder, StructExt};
    use std::sync::OnceLock;

    crate::reflect_enum! {
        enum Speed { Slow, Normal, Turbo }
    }

    #[derive(Default)]
    struct Cpu {
        clock: u32,
        regs: [u8; 4],
    }

    impl Cpu {
        fn layout() -> &'static Layout<Cpu> {
            static LAYOUT: OnceLock<Layout<Cpu>> = OnceLock::new();
            LAYOUT.get_or_init(|| {
                LayoutBuilder::<Cpu>::new()
                    .field("clock", |c| &c.clock, |c| &mut c.clock)
                    .array("regs", |c| &c.regs, |c| &mut c.regs)
                    .build()
            })
        }
    }

    crate::impl_struct!(Cpu, Cpu::layout());

    struct Machine {
        speed: Speed,
        sound: bool,
        volume: f32,
        offset: i16,
        title: String,
        cpu: Cpu,
    }

    impl Default for Machine {
        fn default() -> Self {
            Self {
                speed: Speed::Normal,
                sound: true,
                volume: 1.0,
                offset: 0,
                title: String::new(),
                cpu: Cpu::default(),
            }
        }
    }

    impl Machine {
        fn layout() -> &'static Layout<Machine> {
            static LAYOUT: OnceLock<Layout<Machine>> = OnceLock::new();
            LAYOUT.get_or_init(|| {
                LayoutBuilder::<Machine>::new()
                    .enumeration("speed", |m| &m.speed, |m| &mut m.speed)
                    .field("sound", |m| &m.sound, |m| &mut m.sound)
                    .field("volume", |m| &m.volume, |m| &mut m.volume)
                    .field("offset", |m| &m.offset, |m| &mut m.offset)
                    .field("title", |m| &m.title, |m| &mut m.title)
                    .nested("cpu", |m| &m.cpu, |m| &mut m.cpu)
                    .build()
            })
        }
    }

    crate::impl_struct!(Machine, Machine::layout());

    #[test]
    fn test_parse_separators() {
        let set = OptionSet::parse("a=1, b = two;c\n# note\n\nd=x=y");
        let pairs: Vec<_> = set.iter().collect();
        assert_eq!(
            pairs,
            vec![("a", "1"), ("b", "two"), ("c", "true"), ("d", "x=y")]
        );
    }

    #[test]
    fn test_from_args() {
        let set = OptionSet::from_args(["prog", "--speed=turbo", "--no-sound", "--fast", "--", "x"]);
        assert_eq!(set.get("speed"), Some("turbo"));
        assert_eq!(set.get("sound"), Some("false"));
        assert_eq!(set.get("fast"), Some("true"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_apply_all_kinds() {
        let mut machine = Machine::default();
        let options = OptionSet::parse(
            "speed=TURBO, sound=off, volume=0.5, offset=-0x10, title=demo, \
             cpu.clock=0x3d0900, cpu.regs.2=255",
        );
        let report = machine.apply_options(&options);
        assert!(report.is_clean(), "{:?}", report.rejected);
        assert_eq!(report.applied.len(), 7);
        assert_eq!(machine.speed, Speed::Turbo);
        assert!(!machine.sound);
        assert_eq!(machine.volume, 0.5);
        assert_eq!(machine.offset, -16);
        assert_eq!(machine.title, "demo");
        assert_eq!(machine.cpu.clock, 4_000_000);
        assert_eq!(machine.cpu.regs, [0, 0, 255, 0]);
    }

    #[test]
    fn test_f32_out_of_range_rejected() {
        let mut machine = Machine::default();
        let report = machine.apply_options(&OptionSet::parse("volume=1e300"));
        assert!(matches!(
            report.rejected.as_slice(),
            [OptionError::InvalidValue { path, .. }] if path == "volume"
        ));
        assert_eq!(machine.volume, 1.0);
    }

    #[test]
    fn test_enum_ordinal_text() {
        let mut machine = Machine::default();
        let report = machine.apply_options(&OptionSet::parse("speed=0"));
        assert!(report.is_clean());
        assert_eq!(machine.speed, Speed::Slow);
    }

    #[test]
    fn test_rejections_are_collected() {
        let mut machine = Machine::default();
        let options = OptionSet::parse(
            "speed=warp, sound=maybe, offset=40000, nope=1, cpu=1, cpu.regs.9=1, cpu.clock.x=1, volume=3",
        );
        let report = machine.apply_options(&options);
        assert_eq!(report.applied, vec!["volume"]);
        let paths: Vec<_> = report.rejected.iter().filter_map(|e| e.path()).collect();
        assert_eq!(
            paths,
            vec!["speed", "sound", "offset", "nope", "cpu", "cpu.regs.9", "cpu.clock.x"]
        );
        assert!(matches!(
            report.rejected[5],
            OptionError::Rejected {
                source: ReflectError::IndexOutOfBounds { .. },
                ..
            }
        ));
        assert_eq!(machine.speed, Speed::Normal);
        assert!(machine.sound);
    }

    #[test]
    fn test_parse_int_forms() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-42"), Some(-42));
        assert_eq!(parse_int("0xff"), Some(255));
        assert_eq!(parse_int("-0X10"), Some(-16));
        assert_eq!(parse_int("--1"), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("1.5"), None);
    }

    #[cfg(feature = "yaml-options")]
    #[test]
    fn test_yaml_flattening() {
        let set = OptionSet::from_yaml_str(
            "speed: Slow\nsound: false\ncpu:\n  clock: 1000\n  regs: [1, 2, 3, 4]\n",
        )
        .unwrap();
        assert_eq!(set.get("cpu.regs.3"), Some("4"));

        let mut machine = Machine::default();
        let report = machine.apply_options(&set);
        assert!(report.is_clean(), "{:?}", report.rejected);
        assert_eq!(machine.speed, Speed::Slow);
        assert_eq!(machine.cpu.clock, 1000);
        assert_eq!(machine.cpu.regs, [1, 2, 3, 4]);
    }

    #[cfg(feature = "yaml-options")]
    #[test]
    fn test_yaml_errors() {
        assert!(matches!(
            OptionSet::from_yaml_str("- a\n- b\n"),
            Err(OptionError::Yaml(_))
        ));
        assert!(OptionSet::from_yaml_str("").unwrap().is_empty());
    }

    #[cfg(feature = "yaml-options")]
    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title: from-file\noffset: -2").unwrap();
        let set = OptionSet::load(file.path()).unwrap();

        let mut machine = Machine::default();
        machine.apply_options(&set);
        assert_eq!(machine.title, "from-file");
        assert_eq!(machine.offset, -2);

        assert!(matches!(
            OptionSet::load("/nonexistent/options.yaml"),
            Err(OptionError::Io(_))
        ));
    }
}
