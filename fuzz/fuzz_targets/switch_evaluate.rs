#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use switchtag_host::{EvalContext, EvalOptions, HtmlEntityDecoder, SwitchBlock};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // First line is the input value, the rest is tagdata.
    let (input, tagdata) = match text.split_once('\n') {
        Some(pair) => pair,
        None => ("", text),
    };

    let ctx = EvalContext::new().with_decoder(Arc::new(HtmlEntityDecoder));
    let block = SwitchBlock::parse(tagdata);
    for match_all in [false, true] {
        let options = EvalOptions {
            match_all,
            debug: false,
        };
        let _ = block.evaluate(input, options, &ctx);
    }
});
