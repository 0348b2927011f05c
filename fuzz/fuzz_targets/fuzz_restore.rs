// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use machine_reflect::{impl_struct, reflect_enum, Layout, LayoutBuilder, StructExt};
use std::sync::OnceLock;

reflect_enum! {
    enum Mode { Idle, Run, Halt }
}

struct Target {
    mode: Mode,
    pc: u16,
    cycles: u64,
    gain: f32,
    regs: [i8; 4],
    label: String,
    ready: bool,
}

impl Target {
    fn new() -> Self {
        Self {
            mode: Mode::Idle,
            pc: 0,
            cycles: 0,
            gain: 0.0,
            regs: [0; 4],
            label: String::new(),
            ready: false,
        }
    }

    fn layout() -> &'static Layout<Target> {
        static LAYOUT: OnceLock<Layout<Target>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            LayoutBuilder::<Target>::new()
                .enumeration("mode", |t| &t.mode, |t| &mut t.mode)
                .field("pc", |t| &t.pc, |t| &mut t.pc)
                .field("cycles", |t| &t.cycles, |t| &mut t.cycles)
                .field("gain", |t| &t.gain, |t| &mut t.gain)
                .array("regs", |t| &t.regs, |t| &mut t.regs)
                .field("label", |t| &t.label, |t| &mut t.label)
                .field("ready", |t| &t.ready, |t| &mut t.ready)
                .build()
        })
    }
}

impl_struct!(Target, Target::layout());

fuzz_target!(|data: &[u8]| {
    let mut target = Target::new();
    if target.restore(data).is_ok() {
        // Whatever was restored must serialise and restore again
        let bytes = target.serialise();
        let mut copy = Target::new();
        let report = copy.restore(&bytes).expect("re-encoded state parses");
        assert!(report.is_complete());
        assert_eq!(copy.serialise(), bytes);
    }
});
