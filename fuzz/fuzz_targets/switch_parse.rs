#![no_main]

use libfuzzer_sys::fuzz_target;
use switchtag_engine::SwitchBlock;

fuzz_target!(|data: &[u8]| {
    if let Ok(tagdata) = std::str::from_utf8(data) {
        let _ = SwitchBlock::parse(tagdata);
    }
});
