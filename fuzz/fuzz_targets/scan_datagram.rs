#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{catalog, scan_with_limits, CigiMessage, CigiVersion, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();
    for version in CigiVersion::ALL {
        let mut scanner = scan_with_limits(data, version, &limits);
        while let Some(result) = scanner.next() {
            let Ok(packet) = result else {
                break;
            };
            // Anything the scanner accepts must encode again at its declared length.
            let bytes = packet.to_bytes().expect("decoded packet re-encodes");
            assert_eq!(bytes.len(), packet.encoded_len());
            let _ = catalog(version).decode(&bytes);
        }
        assert!(scanner.position() <= data.len());
    }
});
