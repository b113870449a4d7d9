#![no_main]
use libfuzzer_sys::fuzz_target;
use rsalite_utils::asn1;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let _ = asn1::is_valid_der(s);
    let mut pending = vec![0usize];
    let mut visited = 0;
    while let Some(idx) = pending.pop() {
        visited += 1;
        if visited > 256 {
            break;
        }
        let _ = asn1::value_hex(s, idx);
        if let Ok(children) = asn1::child_indices(s, idx) {
            pending.extend(children);
        }
    }
});
