#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(fields) = factura_cr::validate_consecutive(s) {
            assert_eq!(fields.encode(), s);
        }
    }
});
