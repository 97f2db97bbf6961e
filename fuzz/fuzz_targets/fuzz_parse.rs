// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for the full single-document pipeline: whatever
//! `jtape::parse` accepts must also round-trip through `marshal_json` and
//! re-parse cleanly.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 200_000 {
        return;
    }

    if let Ok(parsed) = jtape::parse(data) {
        let marshalled = parsed.iter().marshal_json();
        let reparsed = jtape::parse(marshalled.as_bytes());
        assert!(reparsed.is_ok(), "marshalled output failed to re-parse: {marshalled}");
    }
});
