use crate::tokenizer::{TokenizeError, Tokenizer};
use crate::types::{Span, Token};

/// Token stream with one token of lookahead.
///
/// Invariant: `peek` never consumes; the token it returns is the one the next
/// `next_token` call hands out. `raw` always refers to the last token returned
/// by `next_token`, never to a peeked one.
pub struct TokenStream<'a> {
    tokenizer: Tokenizer<'a>,
    peeked: Option<Option<(Token, Span)>>,
    last: Span,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            peeked: None,
            last: Span::new(0, 0),
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        let next = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.tokenizer.next_token()?,
        };
        Ok(next.map(|(token, span)| {
            self.last = span;
            token
        }))
    }

    pub fn peek(&mut self) -> Result<Option<&Token>, TokenizeError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.tokenizer.next_token()?);
        }
        Ok(self
            .peeked
            .as_ref()
            .and_then(|peeked| peeked.as_ref().map(|(token, _)| token)))
    }

    /// Source text of the last token returned by `next_token`.
    pub fn raw(&self) -> &'a str {
        &self.tokenizer.input()[self.last.start..self.last.end]
    }

    pub fn last_span(&self) -> Span {
        self.last
    }
}
