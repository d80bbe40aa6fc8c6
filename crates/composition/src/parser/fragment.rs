//! Recursive fragment walk shared by body, tail, fragments and include fallbacks.

use std::collections::HashMap;
use std::time::Duration;

use markup::{Attribute, Token, TokenStream, find_attr, is_void_element};

use crate::attrs::{UIC_REMOVE, parse_required, write_token};
use crate::content::Params;
use crate::discovery::ServiceDiscovery;
use crate::error::ParseError;
use crate::fetch::FetchDefinition;
use crate::fragment::Fragment;
use crate::parser::ParserConfig;
use crate::placeholder;

pub(crate) const UIC_FRAGMENT: &str = "uic-fragment";
pub(crate) const UIC_TAIL: &str = "uic-tail";
pub(crate) const UIC_INCLUDE: &str = "uic-include";
pub(crate) const UIC_FETCH: &str = "uic-fetch";

/// Characters stripped from both ends of a fragment when trimming.
pub(crate) const FRAGMENT_PADDING: [char; 2] = [' ', '\n'];

/// Result of one fragment walk. The caller merges the side tables.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedFragment {
    pub fragment: Fragment,
    pub dependencies: HashMap<String, Params>,
    pub fetches: HashMap<String, FetchDefinition>,
}

/// Parse the children of `container`, whose start tag was just consumed, up to
/// and including its end tag.
///
/// Non-void elements opened inside are tracked on a stack: an end tag closes
/// the nearest matching open element and everything opened after it. The
/// container's end tag closes whatever is still open.
pub fn parse_fragment(
    stream: &mut TokenStream<'_>,
    container: &str,
    config: &ParserConfig,
) -> Result<ParsedFragment, ParseError> {
    let mut builder = FragmentBuilder::new(config);
    let mut open: Vec<String> = Vec::new();
    loop {
        let Some(token) = stream.next_token()? else {
            return Err(ParseError::malformed(format!(
                "unterminated <{container}>, reached end of input"
            )));
        };
        match &token {
            Token::EndTag(name) if name == container => break,
            Token::EndTag(name) => {
                if let Some(at) = open.iter().rposition(|open| open == name) {
                    open.truncate(at);
                } else if !is_void_element(name) {
                    return Err(ParseError::malformed(format!(
                        "mismatched tag </{name}> inside <{container}>"
                    )));
                }
            }
            Token::StartTag { name, .. } if name == UIC_FRAGMENT || name == UIC_TAIL => {
                return Err(ParseError::malformed(format!(
                    "<{name}> is not allowed inside <{container}>"
                )));
            }
            Token::StartTag {
                name, self_closing, ..
            } if !*self_closing
                && !is_void_element(name)
                && !name.starts_with("uic-")
                && !token.has_attr(UIC_REMOVE) =>
            {
                open.push(name.clone());
            }
            _ => {}
        }
        builder.push(stream, token)?;
    }
    Ok(builder.finish())
}

/// If `token` (just consumed) carries `uic-remove`, discard it together with
/// its subtree and return `true`.
pub fn skip_subtree_if_remove(
    stream: &mut TokenStream<'_>,
    token: &Token,
) -> Result<bool, ParseError> {
    let Token::StartTag {
        name, self_closing, ..
    } = token
    else {
        return Ok(false);
    };
    if !token.has_attr(UIC_REMOVE) {
        return Ok(false);
    }
    log::trace!(target: "uic.parser", "skipping <{name} uic-remove> subtree");
    if *self_closing || is_void_element(name) {
        return Ok(true);
    }
    skip_children(stream, name)?;
    Ok(true)
}

/// Discard tokens up to and including the end tag that closes the element
/// whose start tag was just consumed.
pub(crate) fn skip_children(stream: &mut TokenStream<'_>, name: &str) -> Result<(), ParseError> {
    let mut depth = 1usize;
    while depth > 0 {
        match stream.next_token()? {
            None => {
                return Err(ParseError::malformed(format!(
                    "unterminated <{name}> while skipping its subtree"
                )));
            }
            Some(Token::StartTag {
                name, self_closing, ..
            }) if !self_closing && !is_void_element(&name) => depth += 1,
            Some(Token::EndTag(name)) if !is_void_element(&name) => depth -= 1,
            Some(_) => {}
        }
    }
    Ok(())
}

/// Accumulates fragment text and the dependencies found along the way.
pub(crate) struct FragmentBuilder<'c> {
    config: &'c ParserConfig,
    out: String,
    dependencies: HashMap<String, Params>,
    fetches: HashMap<String, FetchDefinition>,
}

impl<'c> FragmentBuilder<'c> {
    pub(crate) fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            out: String::new(),
            dependencies: HashMap::new(),
            fetches: HashMap::new(),
        }
    }

    /// Handle one consumed token: skip, rewrite or copy it.
    pub(crate) fn push(
        &mut self,
        stream: &mut TokenStream<'_>,
        token: Token,
    ) -> Result<(), ParseError> {
        if skip_subtree_if_remove(stream, &token)? {
            return Ok(());
        }
        match &token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } if name == UIC_INCLUDE => self.include(stream, attributes, *self_closing),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } if name == UIC_FETCH => self.fetch(stream, attributes, *self_closing),
            _ => {
                write_token(&mut self.out, &token);
                Ok(())
            }
        }
    }

    fn include(
        &mut self,
        stream: &mut TokenStream<'_>,
        attributes: &[Attribute],
        self_closing: bool,
    ) -> Result<(), ParseError> {
        let src = find_attr(attributes, "src").ok_or_else(|| ParseError::MissingAttribute {
            tag: UIC_INCLUDE.to_string(),
            attribute: "src".to_string(),
        })?;
        let required = parse_required(UIC_INCLUDE, find_attr(attributes, "required"), false)?;

        let (target, key) = match src.strip_prefix('#') {
            Some(local) => (local, local),
            None => (src, base_url(src)),
        };
        let params: Params = attributes
            .iter()
            .filter_map(|attr| {
                let name = attr.name.strip_prefix("param-")?;
                Some((name.to_string(), attr.value_or_empty().to_string()))
            })
            .collect();
        self.dependencies.insert(key.to_string(), params);
        log::trace!(target: "uic.parser", "include {target} (required: {required})");

        if required {
            placeholder::write_include(&mut self.out, target);
            if !self_closing {
                skip_children(stream, UIC_INCLUDE)?;
            }
            return Ok(());
        }

        placeholder::write_optional_open(&mut self.out, target);
        if !self_closing {
            let fallback = parse_fragment(stream, UIC_INCLUDE, self.config)?;
            self.out.push_str(fallback.fragment.content());
            self.dependencies.extend(fallback.dependencies);
            self.fetches.extend(fallback.fetches);
        }
        placeholder::write_optional_close(&mut self.out, target);
        Ok(())
    }

    fn fetch(
        &mut self,
        stream: &mut TokenStream<'_>,
        attributes: &[Attribute],
        self_closing: bool,
    ) -> Result<(), ParseError> {
        let src = find_attr(attributes, "src").ok_or_else(|| ParseError::MissingAttribute {
            tag: UIC_FETCH.to_string(),
            attribute: "src".to_string(),
        })?;
        let required = parse_required(UIC_FETCH, find_attr(attributes, "required"), false)?;
        let timeout = match find_attr(attributes, "timeout") {
            None => self.config.fetch_timeout,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ParseError::MalformedAttribute {
                    tag: UIC_FETCH.to_string(),
                    attribute: "timeout".to_string(),
                    value: raw.to_string(),
                })?,
        };

        let mut definition = FetchDefinition::new(src)
            .with_timeout(timeout)
            .with_required(required);
        if let Some(name) = find_attr(attributes, "name") {
            definition = definition.with_name(name);
        }
        if let Some(key) = find_attr(attributes, "discoveredby") {
            definition = definition.with_service_discovery(ServiceDiscovery::new(key));
        }
        log::trace!(target: "uic.parser", "fetch {src} (required: {required}, timeout: {timeout:?})");
        self.fetches.insert(src.to_string(), definition);

        if !self_closing {
            skip_children(stream, UIC_FETCH)?;
        }
        Ok(())
    }

    pub(crate) fn text(&self) -> &str {
        &self.out
    }

    pub(crate) fn finish(self) -> ParsedFragment {
        let text = if self.config.trim_fragments {
            self.out.trim_matches(FRAGMENT_PADDING).to_string()
        } else {
            self.out
        };
        ParsedFragment {
            fragment: Fragment::Text(text),
            dependencies: self.dependencies,
            fetches: self.fetches,
        }
    }
}

/// `src` without its `#fragment` suffix.
fn base_url(src: &str) -> &str {
    src.split_once('#').map_or(src, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment_of(input: &str) -> (Result<ParsedFragment, ParseError>, TokenStream<'_>) {
        let mut stream = TokenStream::new(input);
        let start = stream.next_token().unwrap().unwrap();
        let container = start.tag_name().unwrap().to_string();
        let parsed = parse_fragment(&mut stream, &container, &ParserConfig::default());
        (parsed, stream)
    }

    fn squash(text: &str) -> String {
        text.chars().filter(|c| !matches!(c, ' ' | '\n')).collect()
    }

    #[test]
    fn fragment_rewrites_vocabulary_and_resumes_after_close() {
        let (parsed, mut stream) = fragment_of(
            r#"<uic-fragment name="content">
      Bli Bla blub
      <br>
      <uic-include src="example.com/foo#content" required="true"/>
      <uic-include src="example.com/optional#content" required="false"/>
      <div uic-remove>
         <br>
         Some element for testing
      </div>
      <hr/>
      Bli Bla §[ aVariable ]§ blub
    </uic-fragment><testend>"#,
        );
        let parsed = parsed.unwrap();
        assert_eq!(
            squash(parsed.fragment.content()),
            squash(
                "Bli Bla blub <br> §[> example.com/foo#content]§ \
                 §[#> example.com/optional#content]§§[/example.com/optional#content]§ \
                 <hr/> Bli Bla §[ aVariable ]§ blub"
            )
        );
        assert!(parsed.fragment.content().starts_with("Bli"));
        assert_eq!(parsed.dependencies.len(), 2);
        assert!(parsed.dependencies["example.com/foo"].is_empty());

        let next = stream.next_token().unwrap().unwrap();
        assert!(next.is_start_tag("testend"), "unexpected token {next:?}");
    }

    #[test]
    fn nested_markup_does_not_end_fragment_early() {
        let (parsed, _) =
            fragment_of("<uic-tail><div><p>a</p><section><b>x</b></section></div></uic-tail>");
        assert_eq!(
            parsed.unwrap().fragment.content(),
            "<div><p>a</p><section><b>x</b></section></div>"
        );
    }

    #[test]
    fn unclosed_children_close_with_container() {
        let (parsed, _) = fragment_of(
            r#"<uic-fragment><a style="text-decoration: none" href="/produktkatalog?&amp;page=91"></uic-fragment>"#,
        );
        assert_eq!(
            parsed.unwrap().fragment.content(),
            r#"<a style="text-decoration: none" href="/produktkatalog?&amp;page=91">"#
        );
    }

    #[test]
    fn optional_include_fallback_is_parsed_recursively() {
        let (parsed, _) = fragment_of(
            r#"<uic-fragment><uic-include src="a.com/x#c" param-lang="de">
                <p>alt</p><uic-include src="b.com/y" required="true"/>
                <uic-fetch src="c.com/z"/>
            </uic-include></uic-fragment>"#,
        );
        let parsed = parsed.unwrap();
        assert_eq!(
            squash(parsed.fragment.content()),
            "§[#>a.com/x#c]§<p>alt</p>§[>b.com/y]§§[/a.com/x#c]§"
        );
        assert_eq!(parsed.dependencies["a.com/x"]["lang"], "de");
        assert!(parsed.dependencies.contains_key("b.com/y"));
        assert!(parsed.fetches.contains_key("c.com/z"));
    }

    #[test]
    fn required_include_children_are_dropped() {
        let (parsed, _) = fragment_of(
            r#"<uic-fragment><uic-include src="a" required="true"><uic-include src="hidden"/></uic-include></uic-fragment>"#,
        );
        let parsed = parsed.unwrap();
        assert_eq!(parsed.fragment.content(), "§[> a]§");
        assert_eq!(parsed.dependencies.len(), 1);
    }

    #[test]
    fn local_include_references_the_name() {
        let (parsed, _) =
            fragment_of(r##"<uic-fragment><uic-include src="#local" required="true"/></uic-fragment>"##);
        let parsed = parsed.unwrap();
        assert_eq!(parsed.fragment.content(), "§[> local]§");
        assert!(parsed.dependencies.contains_key("local"));
    }

    #[test]
    fn structural_errors_are_malformed_document() {
        let cases = [
            "<uic-fragment name=\"bla\"><uic-fragment></uic-fragment></uic-fragment>",
            "<uic-fragment><uic-tail></uic-tail></uic-fragment>",
            "<uic-fragment><div></span></div></uic-fragment>",
            "<uic-fragment><div>never closed",
            "<uic-fragment><uic-include src=\"x\"><uic-fragment></uic-fragment></uic-include></uic-fragment>",
        ];
        for input in cases {
            let (parsed, _) = fragment_of(input);
            assert!(
                matches!(parsed, Err(ParseError::MalformedDocument(_))),
                "input {input:?}: {parsed:?}"
            );
        }
    }

    #[test]
    fn attribute_errors_are_reported() {
        let (parsed, _) = fragment_of("<uic-fragment><uic-include/></uic-fragment>");
        assert!(matches!(parsed, Err(ParseError::MissingAttribute { .. })), "{parsed:?}");

        let (parsed, _) =
            fragment_of(r#"<uic-fragment><uic-include src="a" required="tr42ue"/></uic-fragment>"#);
        assert!(matches!(parsed, Err(ParseError::MalformedAttribute { .. })), "{parsed:?}");

        let (parsed, _) = fragment_of(
            r#"<uic-fragment><uic-fetch src="a" timeout="sdcascdsdc"/></uic-fragment>"#,
        );
        assert!(
            matches!(&parsed, Err(ParseError::MalformedAttribute { attribute, .. }) if attribute == "timeout"),
            "{parsed:?}"
        );
    }

    #[test]
    fn skip_subtree_resumes_at_following_sibling() {
        let mut stream = TokenStream::new(
            r#"<a><b uic-remove>
    sdcsdc
    <hr/>
    <br>
    <img src="http://foo">
    <foo>xxx<i><u>deep</u></i></foo>
    <br/>
</b></a>"#,
        );
        stream.next_token().unwrap();
        let b = stream.next_token().unwrap().unwrap();
        assert!(skip_subtree_if_remove(&mut stream, &b).unwrap());

        let next = stream.next_token().unwrap().unwrap();
        assert!(next.is_end_tag("a"), "unexpected token {next:?}");
    }

    #[test]
    fn skip_subtree_ignores_unmarked_and_void_elements() {
        let mut stream = TokenStream::new("<p>x</p><br uic-remove><i>y</i>");
        let p = stream.next_token().unwrap().unwrap();
        assert!(!skip_subtree_if_remove(&mut stream, &p).unwrap());
        stream.next_token().unwrap();
        stream.next_token().unwrap();

        let br = stream.next_token().unwrap().unwrap();
        assert!(skip_subtree_if_remove(&mut stream, &br).unwrap());
        let next = stream.next_token().unwrap().unwrap();
        assert!(next.is_start_tag("i"), "unexpected token {next:?}");
    }

    #[test]
    fn skip_subtree_at_end_of_input_fails() {
        let mut stream = TokenStream::new("<div uic-remove><p>");
        let div = stream.next_token().unwrap().unwrap();
        let err = skip_subtree_if_remove(&mut stream, &div).unwrap_err();
        assert!(matches!(err, ParseError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn fetch_defaults_and_discovery() {
        let (parsed, _) = fragment_of(
            r#"<uic-fragment><uic-fetch src="example.com/foo" timeout="42000" required="true" name="foo"/><uic-fetch src="discovered" discoveredBy="192.168.0.42:8008"></uic-fetch></uic-fragment>"#,
        );
        let parsed = parsed.unwrap();
        assert_eq!(parsed.fragment.content(), "");
        assert_eq!(
            parsed.fetches["example.com/foo"],
            FetchDefinition::new("example.com/foo")
                .with_name("foo")
                .with_timeout(Duration::from_millis(42000))
                .with_required(true)
        );
        let discovered = &parsed.fetches["discovered"];
        assert!(discovered.service_discovery_active());
        assert!(!discovered.required);
        assert_eq!(discovered.timeout, crate::fetch::DEFAULT_TIMEOUT);
    }
}
