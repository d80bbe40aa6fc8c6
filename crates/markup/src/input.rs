use std::io::Read;

/// Read a whole byte stream into a `String`.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD; markup from backends is
/// not trusted to be well-encoded, and a bad byte must not abort a page.
pub fn decode_input(mut reader: impl Read) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            log::debug!(
                target: "markup.tokenizer",
                "input is not valid UTF-8 (first error at byte {}); decoding lossily",
                err.utf8_error().valid_up_to()
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}
