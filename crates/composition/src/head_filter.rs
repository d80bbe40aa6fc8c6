//! De-duplication of head elements when several backend heads are stacked.
//!
//! Property keys: `title`, `meta_charset` and `meta_name_<name>`, with the
//! name exactly as written in the attribute.

use std::collections::HashMap;

use markup::{Token, TokenStream, TokenizeError};

use crate::fragment::Fragment;

/// Property key an element stands for, if it is one the filter knows.
fn property_key(token: &Token) -> Option<String> {
    if token.is_start_tag("title") {
        return Some("title".to_string());
    }
    if !token.is_start_tag("meta") {
        return None;
    }
    if token.has_attr("charset") {
        return Some("meta_charset".to_string());
    }
    token
        .attr("name")
        .filter(|name| !name.is_empty())
        .map(|name| format!("meta_name_{name}"))
}

/// Remove from `head` every element whose property key is in `properties`.
///
/// Everything else is copied from the source byte for byte.
pub fn filter_head_fragment<V>(
    head: &mut Fragment,
    properties: &HashMap<String, V>,
) -> Result<(), TokenizeError> {
    if properties.is_empty() {
        return Ok(());
    }
    let source = head.content().to_string();
    let mut stream = TokenStream::new(&source);
    let mut out = String::with_capacity(source.len());
    let mut removed = 0usize;

    while let Some(token) = stream.next_token()? {
        let remove = property_key(&token).is_some_and(|key| properties.contains_key(&key));
        if !remove {
            out.push_str(stream.raw());
            continue;
        }
        removed += 1;
        if token.is_start_tag("title") {
            skip_title(&mut stream)?;
        }
    }

    log::debug!(target: "uic.head_filter", "removed {removed} duplicate head elements");
    *head.content_mut() = out;
    Ok(())
}

/// `<title>` content is raw text; consume up to its end tag.
fn skip_title(stream: &mut TokenStream<'_>) -> Result<(), TokenizeError> {
    while let Some(token) = stream.next_token()? {
        if token.is_end_tag("title") {
            break;
        }
    }
    Ok(())
}

/// Property keys present in `head`, each mapped to the element's value: the
/// title text, the charset, or the meta `content`. The first occurrence wins.
pub fn head_properties(head: &Fragment) -> Result<HashMap<String, String>, TokenizeError> {
    let mut stream = TokenStream::new(head.content());
    let mut properties = HashMap::new();

    while let Some(token) = stream.next_token()? {
        let Some(key) = property_key(&token) else {
            continue;
        };
        let value = if key == "title" {
            match stream.peek()? {
                Some(Token::Text(text)) => text.trim().to_string(),
                _ => String::new(),
            }
        } else if key == "meta_charset" {
            token.attr("charset").unwrap_or_default().to_string()
        } else {
            token.attr("content").unwrap_or_default().to_string()
        };
        properties.entry(key).or_insert(value);
    }
    Ok(properties)
}
