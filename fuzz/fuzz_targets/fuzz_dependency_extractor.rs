#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

use dhow::domain::services::extract_local_dependencies;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let deps = extract_local_dependencies(Path::new("/site/pages/blog/post.js"), content);
        for dep in deps {
            assert!(dep.is_absolute());
        }
    }
});
