#![no_main]
use libfuzzer_sys::fuzz_target;

use streamnbt::{Compression, NbtFile};

fuzz_target!(|data: &[u8]| {
    let mut file = NbtFile::new();
    if file.load_from_bytes(data, Compression::AutoDetect).is_err() {
        return;
    }
    // Re-encoding can still fail when a Latin-1 string grows past the
    // length limit as UTF-8.
    if let Ok((bytes, _)) = file.save_to_vec(Compression::None) {
        let mut again = NbtFile::new();
        again.load_from_bytes(&bytes, Compression::None).unwrap();
        let (twice, _) = again.save_to_vec(Compression::None).unwrap();
        assert_eq!(bytes, twice);
    }
});
