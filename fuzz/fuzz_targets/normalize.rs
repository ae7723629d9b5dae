#![no_main]

use libfuzzer_sys::fuzz_target;
use url_normalize::normalize;

fuzz_target!(|data: &[u8]| {
    if let Ok(url) = std::str::from_utf8(data) {
        if let Ok(normalized) = normalize(url) {
            assert_eq!(normalize(&normalized).as_ref(), Ok(&normalized));
        }
    }
});
