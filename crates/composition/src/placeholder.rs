//! Placeholder markers embedded in fragment text.
//!
//! ```text
//! §[> url]§                         include, always rendered
//! §[#> url]§ fallback §[/url]§      optional include with literal fallback
//! §[ name ]§                        variable, passed through untouched
//! ```
//!
//! The compositor substitutes these after the fetches complete; the grammar is
//! matched byte for byte, so writers and scanner must stay in lockstep.

pub const MARKER_START: &str = "§[";
pub const MARKER_END: &str = "]§";
pub const INCLUDE_PREFIX: &str = "> ";
pub const OPTIONAL_PREFIX: &str = "#> ";
pub const CLOSE_PREFIX: &str = "/";

pub fn write_include(out: &mut String, url: &str) {
    out.push_str(MARKER_START);
    out.push_str(INCLUDE_PREFIX);
    out.push_str(url);
    out.push_str(MARKER_END);
}

pub fn write_optional_open(out: &mut String, url: &str) {
    out.push_str(MARKER_START);
    out.push_str(OPTIONAL_PREFIX);
    out.push_str(url);
    out.push_str(MARKER_END);
}

pub fn write_optional_close(out: &mut String, url: &str) {
    out.push_str(MARKER_START);
    out.push_str(CLOSE_PREFIX);
    out.push_str(url);
    out.push_str(MARKER_END);
}

pub fn include(url: &str) -> String {
    let mut out = String::new();
    write_include(&mut out, url);
    out
}

/// Full optional bracket around `fallback`.
pub fn optional_include(url: &str, fallback: &str) -> String {
    let mut out = String::new();
    write_optional_open(&mut out, url);
    out.push_str(fallback);
    write_optional_close(&mut out, url);
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Include(&'a str),
    OptionalOpen(&'a str),
    OptionalClose(&'a str),
    Variable(&'a str),
}

/// Split `text` into literal text and placeholder segments, in order.
///
/// An unterminated `§[` is reported as text.
pub fn scan(text: &str) -> Placeholders<'_> {
    Placeholders { rest: text }
}

pub struct Placeholders<'a> {
    rest: &'a str,
}

impl<'a> Placeholders<'a> {
    /// Byte offset of the next `§[` in `rest`.
    fn next_marker(&self) -> Option<usize> {
        let bytes = self.rest.as_bytes();
        let lead = MARKER_START.as_bytes()[0];
        let mut from = 0;
        while let Some(rel) = memchr::memchr(lead, &bytes[from..]) {
            let at = from + rel;
            if self.rest[at..].starts_with(MARKER_START) {
                return Some(at);
            }
            from = at + 1;
        }
        None
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.rest.is_empty() {
            return None;
        }
        let rest = self.rest;
        let Some(start) = self.next_marker() else {
            self.rest = "";
            return Some(Segment::Text(rest));
        };
        if start > 0 {
            self.rest = &rest[start..];
            return Some(Segment::Text(&rest[..start]));
        }
        let body_start = MARKER_START.len();
        let Some(end) = rest[body_start..].find(MARKER_END) else {
            self.rest = "";
            return Some(Segment::Text(rest));
        };
        let body = &rest[body_start..body_start + end];
        self.rest = &rest[body_start + end + MARKER_END.len()..];
        Some(if let Some(url) = body.strip_prefix(OPTIONAL_PREFIX) {
            Segment::OptionalOpen(url)
        } else if let Some(url) = body.strip_prefix(INCLUDE_PREFIX) {
            Segment::Include(url)
        } else if let Some(url) = body.strip_prefix(CLOSE_PREFIX) {
            Segment::OptionalClose(url)
        } else {
            Segment::Variable(body.trim())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writers_produce_the_marker_grammar() {
        assert_eq!(include("example.com/foo#content"), "§[> example.com/foo#content]§");
        assert_eq!(
            optional_include("a.com/x", "<p>alt</p>"),
            "§[#> a.com/x]§<p>alt</p>§[/a.com/x]§"
        );
    }

    #[test]
    fn scan_splits_text_and_markers() {
        let text = "Bli §[> a#c]§ x §[#> b]§<p>f</p>§[/b]§ §[ aVariable ]§";
        let segments: Vec<Segment<'_>> = scan(text).collect();
        assert_eq!(
            segments,
            vec![
                Segment::Text("Bli "),
                Segment::Include("a#c"),
                Segment::Text(" x "),
                Segment::OptionalOpen("b"),
                Segment::Text("<p>f</p>"),
                Segment::OptionalClose("b"),
                Segment::Text(" "),
                Segment::Variable("aVariable"),
            ]
        );
    }

    #[test]
    fn scan_treats_unterminated_marker_and_lone_section_sign_as_text() {
        let segments: Vec<Segment<'_>> = scan("§ 12 and §[> open").collect();
        assert_eq!(
            segments,
            vec![Segment::Text("§ 12 and "), Segment::Text("§[> open")]
        );
    }

    #[test]
    fn scan_of_empty_text_is_empty() {
        assert_eq!(scan("").count(), 0);
    }
}
