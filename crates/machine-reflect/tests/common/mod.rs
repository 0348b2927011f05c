// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Emulated machine used as a reflection host by the integration tests.

#![allow(dead_code)]

use machine_reflect::{impl_struct, reflect_enum, Layout, LayoutBuilder};
use std::sync::OnceLock;

reflect_enum! {
    pub enum VideoMode { Text, Graphics, Mixed }
}

reflect_enum! {
    pub enum Region { Pal, Ntsc }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub flags: u8,
    pub cycles: u64,
    pub halted: bool,
}

impl Cpu {
    pub fn layout() -> &'static Layout<Cpu> {
        static LAYOUT: OnceLock<Layout<Cpu>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            LayoutBuilder::<Cpu>::new()
                .field("a", |c| &c.a, |c| &mut c.a)
                .field("x", |c| &c.x, |c| &mut c.x)
                .field("y", |c| &c.y, |c| &mut c.y)
                .field("sp", |c| &c.sp, |c| &mut c.sp)
                .field("pc", |c| &c.pc, |c| &mut c.pc)
                .field("flags", |c| &c.flags, |c| &mut c.flags)
                .field("cycles", |c| &c.cycles, |c| &mut c.cycles)
                .field("halted", |c| &c.halted, |c| &mut c.halted)
                .build()
        })
    }
}

impl_struct!(Cpu, Cpu::layout());

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub mode: VideoMode,
    pub scanline: i16,
    pub palette: [u8; 4],
    pub brightness: f32,
}

impl Default for Video {
    fn default() -> Self {
        Self {
            mode: VideoMode::Text,
            scanline: 0,
            palette: [0; 4],
            brightness: 1.0,
        }
    }
}

impl Video {
    pub fn layout() -> &'static Layout<Video> {
        static LAYOUT: OnceLock<Layout<Video>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            LayoutBuilder::<Video>::new()
                .enumeration("mode", |v| &v.mode, |v| &mut v.mode)
                .field("scanline", |v| &v.scanline, |v| &mut v.scanline)
                .array("palette", |v| &v.palette, |v| &mut v.palette)
                .field("brightness", |v| &v.brightness, |v| &mut v.brightness)
                .build()
        })
    }
}

impl_struct!(Video, Video::layout());

#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    pub name: String,
    pub region: Region,
    pub cpu: Cpu,
    pub video: Video,
    pub ram_banks: [u16; 3],
    pub clock_rate: f64,
    pub tick: i64,
    pub irq_line: i32,
    pub debug_counter: u32,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            name: String::new(),
            region: Region::Pal,
            cpu: Cpu::default(),
            video: Video::default(),
            ram_banks: [0; 3],
            clock_rate: 1_000_000.0,
            tick: 0,
            irq_line: 0,
            debug_counter: 0,
        }
    }
}

impl Machine {
    pub fn layout() -> &'static Layout<Machine> {
        static LAYOUT: OnceLock<Layout<Machine>> = OnceLock::new();
        LAYOUT.get_or_init(|| {
            LayoutBuilder::<Machine>::new()
                .field("name", |m| &m.name, |m| &mut m.name)
                .enumeration("region", |m| &m.region, |m| &mut m.region)
                .nested("cpu", |m| &m.cpu, |m| &mut m.cpu)
                .nested("video", |m| &m.video, |m| &mut m.video)
                .array("ram_banks", |m| &m.ram_banks, |m| &mut m.ram_banks)
                .field("clock_rate", |m| &m.clock_rate, |m| &mut m.clock_rate)
                .field("tick", |m| &m.tick, |m| &mut m.tick)
                .field("irq_line", |m| &m.irq_line, |m| &mut m.irq_line)
                .field("debug_counter", |m| &m.debug_counter, |m| &mut m.debug_counter)
                .debug_only()
                .build()
        })
    }

    /// A machine with every field set to a random value.
    pub fn random() -> Self {
        let modes = [VideoMode::Text, VideoMode::Graphics, VideoMode::Mixed];
        let name: String = (0..fastrand::usize(0..12))
            .map(|_| fastrand::alphanumeric())
            .collect();
        Self {
            name,
            region: if fastrand::bool() { Region::Pal } else { Region::Ntsc },
            cpu: Cpu {
                a: fastrand::u8(..),
                x: fastrand::u8(..),
                y: fastrand::u8(..),
                sp: fastrand::u8(..),
                pc: fastrand::u16(..),
                flags: fastrand::u8(..),
                cycles: fastrand::u64(..),
                halted: fastrand::bool(),
            },
            video: Video {
                mode: modes[fastrand::usize(..modes.len())],
                scanline: fastrand::i16(..),
                palette: [fastrand::u8(..), fastrand::u8(..), fastrand::u8(..), fastrand::u8(..)],
                brightness: fastrand::f32(),
            },
            ram_banks: [fastrand::u16(..), fastrand::u16(..), fastrand::u16(..)],
            clock_rate: fastrand::f64() * 4_000_000.0,
            tick: fastrand::i64(..),
            irq_line: fastrand::i32(..),
            debug_counter: fastrand::u32(..),
        }
    }
}

impl_struct!(Machine, Machine::layout());
