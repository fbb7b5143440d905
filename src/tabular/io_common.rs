use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use snafu::prelude::*;

use crate::tabular::*;

use std::fs;

/// Reads a text file of unknown encoding and returns its content as UTF-8.
pub fn read_text_file(path: &str) -> CliResult<String> {
    let bytes = fs::read(path).context(ReadingInputSnafu { path })?;
    let (text, encoding) = decode_text(&bytes);
    info!("read_text_file: {:?} decoded as {}", path, encoding.name());
    Ok(text)
}

/// Decodes bytes of unknown encoding.
///
/// A byte order mark takes precedence. Otherwise the encoding is guessed
/// from the content. The byte order mark is not part of the returned text.
pub fn decode_text(bytes: &[u8]) -> (String, &'static Encoding) {
    let guessed = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };
    let (text, encoding, had_errors) = guessed.decode(bytes);
    if had_errors {
        warn!(
            "decode_text: some characters could not be decoded as {}",
            encoding.name()
        );
    }
    (text.into_owned(), encoding)
}
