#![no_main]
use libfuzzer_sys::fuzz_target;

use streamnbt::{Buffer, NbtReader};

fuzz_target!(|data: &[u8]| {
    let mut buf = Buffer::from_vec(data.to_vec());
    let mut reader = NbtReader::new(&mut buf);
    loop {
        match reader.advance_to_next() {
            Ok(true) if reader.has_value() => {
                let _ = reader.read_value();
            }
            Ok(true) => {}
            Ok(false) | Err(_) => break,
        }
    }
});
