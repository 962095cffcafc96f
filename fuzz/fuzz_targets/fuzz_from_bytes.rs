//! Fuzz testing for external buffer decoding.
//!
//! Feeds arbitrary bytes to `Arguments::from_bytes`. Rejection must be an
//! error, never a panic, and any accepted buffer must be fully traversable.

#![no_main]

use libfuzzer_sys::fuzz_target;

use argbuf::Arguments;

fuzz_target!(|data: &[u8]| {
    let Ok(args) = Arguments::from_bytes(data) else {
        return;
    };

    let mut total = 0;
    for arg in &args {
        total += arg.span();
        let _ = arg.value().get_string();
        let _ = arg.value().get_decimal();
    }
    assert_eq!(total, args.len());
    assert_eq!(args.as_bytes(), data);

    let _ = args.print_json();
    let _ = args.print_format("{a}{{b}}{");
});
