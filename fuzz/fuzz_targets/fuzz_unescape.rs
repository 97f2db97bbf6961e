// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for string unescaping: feeds arbitrary bytes preceded
//! by a synthetic opening quote and checks that any successfully decoded
//! string is valid UTF-8, matching invariant I4.

#![no_main]

use libfuzzer_sys::fuzz_target;
use jtape_tape::stringbuf::StringBuffer;
use jtape_tape::unescape::consume_string;
use jtape_tape::StringLocation;

fuzz_target!(|data: &[u8]| {
    if data.len() > 50_000 {
        return;
    }

    let mut input = Vec::with_capacity(data.len() + 1);
    input.push(b'"');
    input.extend_from_slice(data);

    for &is_key in &[false, true] {
        for &copy_strings in &[false, true] {
            let mut strings = StringBuffer::new();
            if let Ok((location, _end)) =
                consume_string(&input, 0, is_key, copy_strings, &mut strings)
            {
                let bytes = match location {
                    StringLocation::Buffered(off) => strings.read(off).to_vec(),
                    StringLocation::AliasedInput(off) => {
                        let start = off as usize;
                        let close = memchr::memchr(b'"', &input[start..]).unwrap();
                        input[start..start + close].to_vec()
                    }
                };
                assert!(std::str::from_utf8(&bytes).is_ok());
            }
        }
    }
});
