#![no_main]

use jsonpull::{Options, Scanner};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = Options {
        initial_buffer_size: 16,
    };
    let mut scanner = Scanner::with_options(data, options);
    // Tokens must always be sub-slices of the input.
    while let Some(tok) = scanner.next() {
        assert!(!tok.is_empty());
    }
});
