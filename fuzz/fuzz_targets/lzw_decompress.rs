#![no_main]

use libfuzzer_sys::fuzz_target;
use u6dev::utils::compression::lzw::{self, DecompressionError};

fuzz_target!(|data: &[u8]| {
    match lzw::decompress(data) {
        Ok(output) => {
            let expected = lzw::uncompressed_size(data).unwrap();
            assert_eq!(output.len(), expected as usize);
        }
        Err(DecompressionError::PrematureEnd { expected, written }) => {
            assert!(written < expected);
        }
        Err(_) => {}
    }
});
