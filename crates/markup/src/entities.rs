/// Decode the entity subset that shows up in attribute values.
///
/// Contract:
/// - Named: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// - Numeric: `&#34;` and `&#x22;`, only when semicolon-terminated and a valid scalar.
/// - Anything else (unknown names, missing `;`, overlong digits) is copied through.
///
/// Attribute values are re-escaped on output, so an undecoded entity survives a
/// round trip as `&amp;name;`. Keep the set narrow and predictable.
pub(crate) fn decode_entities(s: &str) -> String {
    let Some(first) = memchr::memchr(b'&', s.as_bytes()) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut rest = &s[first..];

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_one(rest) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

const MAX_ENTITY_LEN: usize = 10; // "&#x10FFFF;"

/// Decode the entity at the start of `s` (which begins with `&`).
/// Returns the decoded char and the number of bytes consumed.
fn decode_one(s: &str) -> Option<(char, usize)> {
    let window = &s.as_bytes()[..s.len().min(MAX_ENTITY_LEN + 1)];
    // `;` is ASCII, so slicing at it stays on a char boundary.
    let semi = memchr::memchr(b';', window)?;
    let body = &s[1..semi];
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
                if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return None;
                }
                u32::from_str_radix(hex, 16).ok()?
            } else {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semi + 1))
}
