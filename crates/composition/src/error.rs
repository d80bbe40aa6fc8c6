use markup::TokenizeError;

/// Failure of a whole parse. The first problem wins; nothing partial is kept.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid value {value:?} for attribute '{attribute}' on <{tag}>")]
    MalformedAttribute {
        tag: String,
        attribute: String,
        value: String,
    },

    #[error("missing required attribute '{attribute}' on <{tag}>")]
    MissingAttribute { tag: String, attribute: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error(transparent)]
    Meta(#[from] MetaError),

    #[error("tokenizer error: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        ParseError::MalformedDocument(message.into())
    }
}

/// Problems with the `text/uic-meta` script.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("expected text node for meta json")]
    MissingTextNode,

    #[error("error while parsing json from meta json: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("error while parsing json from meta json: expected an object, found {0}")]
    NotAnObject(&'static str),

    #[error("Tag not properly ended, expected </script> after meta json")]
    NotProperlyEnded,
}
