/// Byte range of a token in the tokenizer input.
///
/// Invariant: both ends sit on UTF-8 char boundaries of the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must be <= end");
        Self { start, end }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// A single tag attribute.
///
/// `name` is ASCII-lowercased by the tokenizer and `value` is entity-decoded.
/// `namespace` is never filled by the tokenizer itself (a prefixed name such
/// as `xlink:href` stays in `name`); it exists for attributes built by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Attribute written without `=value`, e.g. `<script async>`.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            value: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        /// Set only for a literal `/>`; void elements keep `false`.
        self_closing: bool,
    },
    EndTag(String),
    /// Comment body without the `<!--`/`-->` delimiters.
    Comment(String),
    /// Raw source text; entities are not decoded.
    Text(String),
}

impl Token {
    /// Tag name for start and end tags.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::StartTag { name, .. } | Token::EndTag(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_start_tag(&self, tag: &str) -> bool {
        matches!(self, Token::StartTag { name, .. } if name == tag)
    }

    pub fn is_end_tag(&self, tag: &str) -> bool {
        matches!(self, Token::EndTag(name) if name == tag)
    }

    /// Attributes of a start tag; empty for every other token.
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Token::StartTag { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Value of the first attribute named `key` on a start tag.
    pub fn attr(&self, key: &str) -> Option<&str> {
        find_attr(self.attributes(), key)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attributes()
            .iter()
            .any(|a| a.name.eq_ignore_ascii_case(key))
    }
}

pub fn find_attr<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name.eq_ignore_ascii_case(key))
        .map(Attribute::value_or_empty)
}

/// Elements that never have content or an end tag.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
