#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz make-include parsing - this should never panic
        if let Ok(record) = stampcheck::parse_depfile(content) {
            // Whatever parsed must survive a render/parse cycle
            let rendered = stampcheck::render_depfile(&record);
            let _ = stampcheck::parse_depfile(&rendered);
        }
    }
});
