// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for the NDJSON driver: must never panic, and a
//! successful parse's document count must match the number of non-blank
//! lines in the input.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 200_000 {
        return;
    }

    if let Ok(parsed) = jtape::parse_nd(data) {
        let expected_lines = data
            .split(|&b| b == b'\n')
            .flat_map(|line| line.split(|&b| b == b'\r'))
            .filter(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
            .count();
        assert_eq!(parsed.documents().count(), expected_lines);
    }
});
