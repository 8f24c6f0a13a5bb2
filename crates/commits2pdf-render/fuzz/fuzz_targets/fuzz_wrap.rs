#![no_main]

use commits2pdf_render::text::{wrap, wrap_description};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, u8)| {
    let (text, width) = input;
    let width = usize::from(width);

    for line in wrap(text, width) {
        assert!(line.chars().count() <= width.max(1));
        assert!(!line.is_empty());
    }
    for line in wrap_description(text, width) {
        assert!(line.chars().count() <= width.max(1));
    }
});
