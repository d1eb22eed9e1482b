#![no_main]

use jsonpull::{Decoder, Options};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A tiny initial buffer forces the compact and grow refill paths even on
    // short inputs.
    let options = Options {
        initial_buffer_size: 16,
    };
    let mut decoder = Decoder::with_options(data, options);
    while let Ok(Some(_)) = decoder.next_token() {}
});
