// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for the JSON number grammar scanner: must never panic
//! or read past the end of the input on arbitrary bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;
use jtape_tape::number::parse_number;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 10_000 {
        return;
    }
    let _ = parse_number(data, 0);
});
