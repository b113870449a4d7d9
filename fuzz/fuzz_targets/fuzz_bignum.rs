#![no_main]
use libfuzzer_sys::fuzz_target;
use rsalite_bignum::BigInt;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let radix = u32::from(data[0] % 40);
    let Ok(text) = std::str::from_utf8(&data[1..]) else {
        return;
    };
    if let Ok(x) = BigInt::from_str_radix(text, radix) {
        let rendered = x.to_str_radix(radix).unwrap();
        assert_eq!(BigInt::from_str_radix(&rendered, radix).unwrap(), x);

        let (half, rest) = data[1..].split_at(data.len() / 2);
        let m = BigInt::from_bytes_be(half);
        let e = BigInt::from_bytes_be(&rest[..rest.len().min(8)]);
        if m.signum() > 0 && !e.is_zero() {
            let r = x.mod_pow(&e, &m).unwrap();
            assert!(r.signum() >= 0 && r < m);
        }
    }
});
