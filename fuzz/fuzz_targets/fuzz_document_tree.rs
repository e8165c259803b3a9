#![no_main]

use libfuzzer_sys::fuzz_target;

use dhow::domain::entities::{DocumentShell, Node};

fuzz_target!(|data: &[u8]| {
    // Trees come from the page runtime as JSON; decoding, validating and
    // composing must never panic
    if let Ok(Node::Element(root)) = serde_json::from_slice::<Node>(data) {
        let _ = root.to_html();
        if let Ok(shell) = DocumentShell::new(root) {
            let _ = shell.compose("<p>page</p>", &["<title>t</title>".to_string()]);
        }
    }
});
