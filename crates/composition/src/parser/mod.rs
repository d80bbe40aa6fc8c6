//! Backend page parser.
//!
//! One pass over the token stream: the head is copied with `uic-remove`
//! subtrees dropped and the meta script lifted into [`Content::meta`]; the body
//! is split into named fragments, tail and the implicit default fragment, with
//! includes and fetches turned into placeholders and dependency records.

mod fragment;
mod meta;

use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

use markup::{Attribute, Token, TokenStream};

use crate::attrs::{UIC_REMOVE, join_attrs, write_token};
use crate::content::{Content, Params};
use crate::error::ParseError;
use crate::fetch::DEFAULT_TIMEOUT;
use crate::fragment::Fragment;

pub use self::fragment::{ParsedFragment, parse_fragment, skip_subtree_if_remove};
use self::fragment::{FRAGMENT_PADDING, FragmentBuilder, UIC_FRAGMENT, UIC_TAIL};
use self::meta::{is_meta_script, parse_meta_json};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Timeout for a `uic-fetch` without a `timeout` attribute.
    pub fetch_timeout: Duration,
    /// Trim leading and trailing whitespace of every fragment once.
    pub trim_fragments: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_TIMEOUT,
            trim_fragments: true,
        }
    }
}

/// Stateless; one parser can serve any number of documents and threads.
#[derive(Clone, Debug, Default)]
pub struct ContentParser {
    config: ParserConfig,
}

impl ContentParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a whole page from `input` and merge the result into `content`.
    ///
    /// On error `content` is left untouched.
    pub fn parse(&self, content: &mut Content, input: impl Read) -> Result<(), ParseError> {
        let text = markup::decode_input(input)?;
        let parsed = self.parse_str(&text)?;
        content.absorb(parsed);
        Ok(())
    }

    pub fn parse_str(&self, input: &str) -> Result<Content, ParseError> {
        let mut stream = TokenStream::new(input);
        let mut content = Content::new();
        let mut seen_head = false;
        let mut seen_body = false;

        while let Some(token) = stream.next_token()? {
            match token {
                Token::StartTag { name, .. } if name == "head" => {
                    if seen_head {
                        return Err(ParseError::malformed("document has more than one <head>"));
                    }
                    seen_head = true;
                    self.parse_head(&mut stream, &mut content)?;
                }
                Token::StartTag {
                    name, attributes, ..
                } if name == "body" => {
                    if seen_body {
                        return Err(ParseError::malformed("document has more than one <body>"));
                    }
                    seen_body = true;
                    self.parse_body(&mut stream, &attributes, &mut content)?;
                }
                _ => {}
            }
        }

        log::debug!(
            target: "uic.parser",
            "parsed document: head={} fragments={} tail={} meta={} dependencies={} fetches={}",
            content.head.is_some(),
            content.body.len(),
            content.tail.is_some(),
            content.meta.len(),
            content.dependencies.len(),
            content.required_content.len()
        );
        Ok(content)
    }

    /// Walk the children of `<head>`, whose start tag was just consumed.
    ///
    /// Stops at `</head>`, in front of `<body>`, or at end of input.
    pub(crate) fn parse_head(
        &self,
        stream: &mut TokenStream<'_>,
        content: &mut Content,
    ) -> Result<(), ParseError> {
        let mut out = String::new();
        loop {
            if stream.peek()?.is_some_and(|next| next.is_start_tag("body")) {
                break;
            }
            let Some(token) = stream.next_token()? else {
                break;
            };
            if token.is_end_tag("head") {
                break;
            }
            if skip_subtree_if_remove(stream, &token)? {
                continue;
            }
            if is_meta_script(&token) {
                parse_meta_json(stream, &mut content.meta)?;
                continue;
            }
            write_token(&mut out, &token);
        }

        let head = out.trim_matches(FRAGMENT_PADDING);
        if !head.is_empty() {
            content.head = Some(Fragment::text(head));
        }
        Ok(())
    }

    /// Walk the children of `<body>`, whose start tag (with `attributes`) was
    /// just consumed. Stops at `</body>` or end of input.
    pub(crate) fn parse_body(
        &self,
        stream: &mut TokenStream<'_>,
        attributes: &[Attribute],
        content: &mut Content,
    ) -> Result<(), ParseError> {
        content.body_attributes = Fragment::Text(join_attrs(attributes));

        let mut default = FragmentBuilder::new(&self.config);
        // Dependencies per stored slot (`None` is the tail), in document order.
        // A slot written twice keeps only the last writer's dependencies.
        let mut slot_dependencies: Vec<(Option<String>, HashMap<String, Params>)> = Vec::new();
        while let Some(token) = stream.next_token()? {
            if token.is_end_tag("body") {
                break;
            }
            let container = match &token {
                Token::StartTag { name, .. } if !token.has_attr(UIC_REMOVE) => {
                    if name == UIC_FRAGMENT {
                        Some(UIC_FRAGMENT)
                    } else if name == UIC_TAIL {
                        Some(UIC_TAIL)
                    } else {
                        None
                    }
                }
                _ => None,
            };
            let Some(container) = container else {
                default.push(stream, token)?;
                continue;
            };

            let parsed = match &token {
                Token::StartTag {
                    self_closing: true, ..
                } => ParsedFragment::default(),
                _ => parse_fragment(stream, container, &self.config)?,
            };
            content.required_content.extend(parsed.fetches);
            if container == UIC_TAIL {
                content.tail = Some(parsed.fragment);
                slot_dependencies.push((None, parsed.dependencies));
            } else {
                let name = token.attr("name").unwrap_or_default().to_string();
                content.body.insert(name.clone(), parsed.fragment);
                slot_dependencies.push((Some(name), parsed.dependencies));
            }
        }

        let explicit_default = content.body.contains_key("");
        let has_default_text = !default.text().trim_matches(FRAGMENT_PADDING).is_empty();
        let parsed = default.finish();
        content.required_content.extend(parsed.fetches);
        if has_default_text && !explicit_default {
            content.body.insert(String::new(), parsed.fragment);
            slot_dependencies.push((Some(String::new()), parsed.dependencies));
        } else if !parsed.dependencies.is_empty() {
            log::debug!(
                target: "uic.parser",
                "default fragment discarded with {} dependencies",
                parsed.dependencies.len()
            );
        }

        let last_writer: HashMap<&Option<String>, usize> = slot_dependencies
            .iter()
            .enumerate()
            .map(|(at, (slot, _))| (slot, at))
            .collect();
        let live: Vec<bool> = slot_dependencies
            .iter()
            .enumerate()
            .map(|(at, (slot, _))| last_writer[slot] == at)
            .collect();
        for ((_, dependencies), live) in slot_dependencies.into_iter().zip(live) {
            if live {
                content.dependencies.extend(dependencies);
            }
        }
        Ok(())
    }
}
