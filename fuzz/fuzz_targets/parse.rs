#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every input must parse or fail with a typed error, never panic.
    let _ = jpeg_structure::Jpeg::from_bytes(data);
});
