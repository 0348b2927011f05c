// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::float_cmp)] // Exact parsed values

//! Configuring the emulated machine from text, arguments and YAML files.

mod common;

use common::{Machine, Region, VideoMode};
use machine_reflect::{OptionError, OptionSet, StructExt};

#[test]
fn test_inline_options() {
    let mut machine = Machine::default();
    let report = machine.apply_options(&OptionSet::parse(
        "region=ntsc; video.mode=graphics; cpu.pc=0xfffc; ram_banks.1=512; name=arcade",
    ));
    assert!(report.is_clean(), "{:?}", report.rejected);
    assert_eq!(machine.region, Region::Ntsc);
    assert_eq!(machine.video.mode, VideoMode::Graphics);
    assert_eq!(machine.cpu.pc, 0xfffc);
    assert_eq!(machine.ram_banks, [0, 512, 0]);
    assert_eq!(machine.name, "arcade");
}

#[test]
fn test_command_line_options() {
    let args = ["emu", "--cpu.halted", "--no-cpu.halted", "--video.scanline=-1", "rom.bin"];
    let mut machine = Machine::default();
    machine.cpu.halted = true;
    let report = machine.apply_options(&OptionSet::from_args(args));
    assert_eq!(report.applied, vec!["cpu.halted", "cpu.halted", "video.scanline"]);
    assert!(!machine.cpu.halted);
    assert_eq!(machine.video.scanline, -1);
}

#[test]
fn test_debug_only_fields_accept_options() {
    let mut machine = Machine::default();
    let report = machine.apply_options(&OptionSet::parse("debug_counter=7"));
    assert!(report.is_clean());
    assert_eq!(machine.debug_counter, 7);
}

#[test]
fn test_bad_options_do_not_stop_the_rest() {
    let mut machine = Machine::default();
    let report = machine.apply_options(&OptionSet::parse(
        "cpu.a=300, region=secam, video.palette.4=1, cpu.x=0x20",
    ));
    assert_eq!(report.applied, vec!["cpu.x"]);
    assert_eq!(report.rejected.len(), 3);
    assert!(matches!(report.rejected[0], OptionError::InvalidValue { .. }));
    assert_eq!(machine.cpu.x, 0x20);
    assert_eq!(machine.cpu.a, 0);
}

#[cfg(feature = "yaml-options")]
#[test]
fn test_yaml_file_configures_machine() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "name: cabinet\n\
         region: Ntsc\n\
         clock_rate: 3579545.0\n\
         cpu:\n  sp: 0xfd\n  halted: no\n\
         video:\n  mode: mixed\n  palette: [1, 2, 3, 4]\n  brightness: 0.5\n"
    )
    .unwrap();

    let options = OptionSet::load(file.path()).unwrap();
    let mut machine = Machine::default();
    let report = machine.apply_options(&options);
    assert!(report.is_clean(), "{:?}", report.rejected);
    assert_eq!(machine.name, "cabinet");
    assert_eq!(machine.region, Region::Ntsc);
    assert_eq!(machine.clock_rate, 3_579_545.0);
    assert_eq!(machine.cpu.sp, 0xfd);
    assert_eq!(machine.video.mode, VideoMode::Mixed);
    assert_eq!(machine.video.palette, [1, 2, 3, 4]);
    assert_eq!(machine.video.brightness, 0.5);
}

#[cfg(feature = "yaml-options")]
#[test]
fn test_later_sources_override_earlier() {
    let mut options = OptionSet::from_yaml_str("cpu:\n  a: 1\n").unwrap();
    options.extend(OptionSet::from_args(["--cpu.a=2"]));
    assert_eq!(options.get("cpu.a"), Some("2"));

    let mut machine = Machine::default();
    machine.apply_options(&options);
    assert_eq!(machine.cpu.a, 2);
}
