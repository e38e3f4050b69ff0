#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: structural protector mask/restore roundtrip.
//
// Catches bugs in:
// - Fence open/close tracking (unclosed fences, indented fences)
// - Inline span pairing (unmatched backticks, empty spans)
// - Placeholder parsing during restore
// - Byte-offset arithmetic on multi-byte UTF-8
fuzz_target!(|text: &str| {
    let protected = tokpress_scan::Protected::mask(text);
    let restored = protected.restore(protected.masked());
    assert_eq!(restored, text, "mask → restore must be lossless");
});
