#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{scan_with_limits, CigiMessage, CigiVersion, Limits, MessageBuilder};

fuzz_target!(|data: &[u8]| {
    let [from, to, rest @ ..] = data else {
        return;
    };
    let all = CigiVersion::ALL;
    let from = all[usize::from(*from) % all.len()];
    let to = all[usize::from(*to) % all.len()];

    let limits = Limits::for_testing();
    let mut builder = MessageBuilder::with_limits(to, limits.clone());
    for packet in scan_with_limits(rest, from, &limits).map_while(Result::ok) {
        let Ok(converted) = convert::convert_packet(&packet, to) else {
            continue;
        };
        assert!(converted.version() <= to);
        assert_eq!(converted.version().major(), to.major());
        if builder.push(&converted).is_err() {
            break;
        }
    }
});
