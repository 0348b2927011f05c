// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use machine_reflect::{Document, Element};

fn walk(document: &Document) -> usize {
    document
        .iter()
        .map(|(_, e)| match e {
            Element::Document(d) | Element::Array(d) => 1 + walk(d),
            _ => 1,
        })
        .sum()
}

fuzz_target!(|data: &[u8]| {
    // Any accepted document must be fully walkable
    if let Ok(document) = Document::from_bytes(data) {
        let _ = walk(&document);
    }
});
