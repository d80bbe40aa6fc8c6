//! Re-serialization of tokens the parser passes through.

use markup::{Attribute, Token};

use crate::error::ParseError;

/// Control attribute marking a subtree for removal.
pub const UIC_REMOVE: &str = "uic-remove";

/// Render attributes as space-joined `key="value"` pairs in input order.
///
/// `uic-remove` is never rendered; valueless attributes render as the bare key.
pub fn join_attrs(attributes: &[Attribute]) -> String {
    let mut out = String::new();
    for attr in attributes {
        if attr.namespace.is_none() && attr.name.eq_ignore_ascii_case(UIC_REMOVE) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        if let Some(namespace) = &attr.namespace {
            out.push_str(namespace);
            out.push(':');
        }
        out.push_str(&attr.name);
        if let Some(value) = &attr.value {
            out.push_str("=\"");
            escape_attr_value(value, &mut out);
            out.push('"');
        }
    }
    out
}

fn escape_attr_value(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(ch),
        }
    }
}

pub(crate) fn write_start_tag(
    out: &mut String,
    name: &str,
    attributes: &[Attribute],
    self_closing: bool,
) {
    out.push('<');
    out.push_str(name);
    let attrs = join_attrs(attributes);
    if !attrs.is_empty() {
        out.push(' ');
        out.push_str(&attrs);
    }
    if self_closing {
        out.push('/');
    }
    out.push('>');
}

/// Append `token` in canonical form. Text is copied raw.
pub(crate) fn write_token(out: &mut String, token: &Token) {
    match token {
        Token::StartTag {
            name,
            attributes,
            self_closing,
        } => write_start_tag(out, name, attributes, *self_closing),
        Token::EndTag(name) => {
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Token::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Token::Doctype(content) => {
            out.push_str("<!");
            out.push_str(content);
            out.push('>');
        }
        Token::Text(text) => out.push_str(text),
    }
}

/// `required` must be literally `true` or `false`; absent yields `default`.
pub(crate) fn parse_required(
    tag: &str,
    value: Option<&str>,
    default: bool,
) -> Result<bool, ParseError> {
    match value {
        None => Ok(default),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(ParseError::MalformedAttribute {
            tag: tag.to_string(),
            attribute: "required".to_string(),
            value: other.to_string(),
        }),
    }
}
