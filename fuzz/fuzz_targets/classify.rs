#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: classifier totality and confidence bounds.
fuzz_target!(|text: &str| {
    let classification = tokpress_engine::detect_content_type(text);
    assert!((0.0..=1.0).contains(&classification.confidence));
});
