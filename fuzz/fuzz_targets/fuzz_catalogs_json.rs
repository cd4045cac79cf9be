#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(catalogs) = factura_cr::Catalogs::from_json(s) {
            let _ = catalogs.is_known_unit("Unid");
        }
    }
});
