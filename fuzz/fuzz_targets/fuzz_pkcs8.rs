#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = rsalite_pki::pkcs8::parse_pkcs8_der(data);
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = rsalite_pki::pkcs8::parse_pkcs8_pem(text);
    }
});
