//! Pull-based HTML tokenizer with a practical, non-HTML5 grammar.
//!
//! Tag names use the ASCII class `[A-Za-z0-9:_-]` and are lowercased. Attribute
//! names accept any character except whitespace, `/`, `>`, `=` and quotes, and
//! are lowercased too. Attribute values are entity-decoded; text and comments are
//! handed out raw so that re-emitting them reproduces the source byte for byte.
//!
//! Known limitations (intentional):
//! - No HTML5 error recovery: an unterminated tag, comment or doctype at end of
//!   input is an error instead of being patched up.
//! - `self_closing` reflects only a literal `/>`; void elements are not rewritten.
//! - Raw text content is recognized for `script`, `style`, `textarea` and `title`.
//!   A missing close tag makes the raw text run to end of input without a
//!   synthesized end tag.
use crate::entities::decode_entities;
use crate::types::{Attribute, Span, Token};
use memchr::memchr;
use std::fmt;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

/// Elements whose content is not tokenized, paired with their close-tag prefix.
const RAWTEXT_ELEMENTS: &[(&str, &[u8])] = &[
    ("script", b"</script"),
    ("style", b"</style"),
    ("textarea", b"</textarea"),
    ("title", b"</title"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    UnterminatedTag,
    UnterminatedComment,
    UnterminatedDoctype,
}

/// Syntax error with the byte offset where the offending construct starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub offset: usize,
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            TokenizeErrorKind::UnterminatedTag => "unterminated tag",
            TokenizeErrorKind::UnterminatedComment => "unterminated comment",
            TokenizeErrorKind::UnterminatedDoctype => "unterminated markup declaration",
        };
        write!(f, "{what} at byte {}", self.offset)
    }
}

impl std::error::Error for TokenizeError {}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_tag_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn is_attr_name_char(c: u8) -> bool {
    !(c.is_ascii_whitespace() || matches!(c, b'/' | b'>' | b'=' | b'"' | b'\''))
}

/// Whether the `<` at `i` opens markup rather than being literal text.
fn opens_markup(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i + 1) {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => bytes.get(i + 2).is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Find `</name` followed by optional ASCII whitespace and `>`, case-insensitively.
/// Returns the start of the close tag and the index just past its `>`.
fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= len {
        i += memchr(b'<', &bytes[i..])?;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Forward-only tokenizer over a complete input string.
///
/// Tokens are produced lazily, one per `next_token` call. After an error the
/// tokenizer is exhausted.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    rawtext: Option<(&'static str, &'static [u8])>,
    pending: Option<(Token, Span)>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            rawtext: None,
            pending: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the next unread input.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn next_token(&mut self) -> Result<Option<(Token, Span)>, TokenizeError> {
        if let Some(pending) = self.pending.take() {
            return Ok(Some(pending));
        }
        if let Some((name, close_tag)) = self.rawtext.take() {
            return Ok(self.read_rawtext(name, close_tag));
        }
        if self.pos >= self.input.len() {
            return Ok(None);
        }
        let result = self.read_token();
        if result.is_err() {
            self.pos = self.input.len();
        }
        result.map(Some)
    }

    fn read_token(&mut self) -> Result<(Token, Span), TokenizeError> {
        let bytes = self.input.as_bytes();
        let i = self.pos;
        if bytes[i] != b'<' || !opens_markup(bytes, i) {
            return Ok(self.read_text());
        }
        if self.input[i..].starts_with(COMMENT_START) {
            return self.read_comment();
        }
        match bytes[i + 1] {
            b'!' | b'?' => self.read_declaration(),
            b'/' => self.read_end_tag(),
            _ => self.read_start_tag(),
        }
    }

    fn read_text(&mut self) -> (Token, Span) {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        // The first byte may be a literal `<`; skip it before searching.
        let mut i = start + 1;
        while i < bytes.len() {
            match memchr(b'<', &bytes[i..]) {
                Some(rel) if opens_markup(bytes, i + rel) => {
                    i += rel;
                    break;
                }
                Some(rel) => i += rel + 1,
                None => i = bytes.len(),
            }
        }
        // `<` is ASCII, so `i` is a char boundary.
        debug_assert!(self.input.is_char_boundary(i));
        self.pos = i;
        (Token::Text(self.input[start..i].to_string()), Span::new(start, i))
    }

    fn read_comment(&mut self) -> Result<(Token, Span), TokenizeError> {
        let start = self.pos;
        let body_start = start + COMMENT_START.len();
        let Some(rel) = self.input[body_start..].find(COMMENT_END) else {
            return Err(TokenizeError {
                kind: TokenizeErrorKind::UnterminatedComment,
                offset: start,
            });
        };
        let body_end = body_start + rel;
        self.pos = body_end + COMMENT_END.len();
        Ok((
            Token::Comment(self.input[body_start..body_end].to_string()),
            Span::new(start, self.pos),
        ))
    }

    /// `<!DOCTYPE ...>`, `<![CDATA[...]]>` and `<?...>`.
    fn read_declaration(&mut self) -> Result<(Token, Span), TokenizeError> {
        let start = self.pos;
        let Some(rel) = memchr(b'>', &self.input.as_bytes()[start..]) else {
            return Err(TokenizeError {
                kind: TokenizeErrorKind::UnterminatedDoctype,
                offset: start,
            });
        };
        let end = start + rel;
        self.pos = end + 1;
        let span = Span::new(start, self.pos);
        if self.input.as_bytes()[start + 1] == b'?' {
            // Processing instructions become bogus comments, as in HTML5.
            return Ok((Token::Comment(self.input[start + 1..end].to_string()), span));
        }
        Ok((Token::Doctype(self.input[start + 2..end].to_string()), span))
    }

    fn read_end_tag(&mut self) -> Result<(Token, Span), TokenizeError> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let name_start = start + 2;
        let mut j = name_start;
        while j < bytes.len() && is_tag_name_char(bytes[j]) {
            j += 1;
        }
        let name = self.input[name_start..j].to_ascii_lowercase();
        let Some(rel) = memchr(b'>', &bytes[j..]) else {
            return Err(TokenizeError {
                kind: TokenizeErrorKind::UnterminatedTag,
                offset: start,
            });
        };
        self.pos = j + rel + 1;
        Ok((Token::EndTag(name), Span::new(start, self.pos)))
    }

    fn read_start_tag(&mut self) -> Result<(Token, Span), TokenizeError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let len = bytes.len();
        let start = self.pos;
        let unterminated = TokenizeError {
            kind: TokenizeErrorKind::UnterminatedTag,
            offset: start,
        };

        let mut k = start + 1;
        while k < len && is_tag_name_char(bytes[k]) {
            k += 1;
        }
        let name = input[start + 1..k].to_ascii_lowercase();

        let mut attributes: Vec<Attribute> = Vec::new();
        let mut self_closing = false;
        let skip_whitespace = |k: &mut usize| {
            while *k < len && bytes[*k].is_ascii_whitespace() {
                *k += 1;
            }
        };

        loop {
            skip_whitespace(&mut k);
            if k >= len {
                return Err(unterminated);
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            let name_start = k;
            while k < len && is_attr_name_char(bytes[k]) {
                k += 1;
            }
            if name_start == k {
                // Stray `=` or quote; drop it.
                k += 1;
                continue;
            }
            let attr_name = input[name_start..k].to_ascii_lowercase();

            skip_whitespace(&mut k);
            let value = if k < len && bytes[k] == b'=' {
                k += 1;
                skip_whitespace(&mut k);
                if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                    let quote = bytes[k];
                    let vstart = k + 1;
                    let Some(rel) = memchr(quote, &bytes[vstart..]) else {
                        return Err(unterminated);
                    };
                    k = vstart + rel + 1;
                    Some(decode_entities(&input[vstart..vstart + rel]))
                } else {
                    let vstart = k;
                    while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                            break;
                        }
                        k += 1;
                    }
                    Some(decode_entities(&input[vstart..k]))
                }
            } else {
                None
            };
            attributes.push(Attribute {
                namespace: None,
                name: attr_name,
                value,
            });
        }

        self.pos = k;
        if !self_closing {
            self.rawtext = RAWTEXT_ELEMENTS
                .iter()
                .find(|(raw, _)| *raw == name)
                .copied();
        }
        Ok((
            Token::StartTag {
                name,
                attributes,
                self_closing,
            },
            Span::new(start, k),
        ))
    }

    fn read_rawtext(&mut self, name: &'static str, close_tag: &[u8]) -> Option<(Token, Span)> {
        let start = self.pos;
        let rest = &self.input[start..];
        let Some((rel_start, rel_end)) = find_rawtext_close_tag(rest, close_tag) else {
            log::trace!(
                target: "markup.tokenizer",
                "no closing </{name}> after byte {start}; raw text runs to end of input"
            );
            self.pos = self.input.len();
            return (!rest.is_empty())
                .then(|| (Token::Text(rest.to_string()), Span::new(start, self.pos)));
        };
        let text_end = start + rel_start;
        self.pos = start + rel_end;
        let end_tag = (Token::EndTag(name.to_string()), Span::new(text_end, self.pos));
        if rel_start == 0 {
            return Some(end_tag);
        }
        self.pending = Some(end_tag);
        Some((
            Token::Text(self.input[start..text_end].to_string()),
            Span::new(start, text_end),
        ))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<(Token, Span), TokenizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize a whole input eagerly, dropping spans.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    Tokenizer::new(input)
        .map(|item| item.map(|(token, _)| token))
        .collect()
}
