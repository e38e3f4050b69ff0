#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: JSON minifier totality.
//
// Any input must produce Ok or a structured MinifyError — never a panic.
// Valid outputs must re-parse to the same value.
fuzz_target!(|text: &str| {
    let options = tokpress_passes::MinifyOptions::default();
    if let Ok(out) = tokpress_passes::json_minify(text, &options) {
        if !text.trim().contains('\n') {
            let before: serde_json::Value =
                serde_json::from_str(text.trim()).expect("minify succeeded, input must parse");
            let after: serde_json::Value =
                serde_json::from_str(&out.text).expect("minified output must parse");
            assert_eq!(before, after);
        }
    }
});
