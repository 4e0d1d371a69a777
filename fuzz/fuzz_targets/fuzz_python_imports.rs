#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        // Fuzz import extraction - this should never panic
        let _ = stampcheck::infrastructure::discovery::parse_imports(source);
    }
});
