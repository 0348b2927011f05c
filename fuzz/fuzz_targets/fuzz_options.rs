// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use machine_reflect::OptionSet;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = OptionSet::parse(text);
        let _ = OptionSet::from_args(text.split_whitespace());
        let _ = OptionSet::from_yaml_str(text);
    }
});
