#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing, unknown-key warnings included, should never panic
        let _ = dhow::config::parse_with_warnings(content, Path::new("dhow.toml"));
    }
});
