#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // A decoded clave must re-encode to the same 50 digits.
        if let Ok(fields) = factura_cr::decompose_key(s) {
            assert_eq!(fields.encode(), s);
            let _ = fields.consecutive_fields();
        }
    }
});
