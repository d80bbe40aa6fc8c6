//! Token source for the UI composition parser.
//!
//! `TokenStream` is the entry point: a forward-only stream with one token of
//! lookahead and access to the raw source text of the last token.

mod entities;
mod input;
mod stream;
mod tokenizer;
mod types;

pub use crate::input::decode_input;
pub use crate::stream::TokenStream;
pub use crate::tokenizer::{TokenizeError, TokenizeErrorKind, Tokenizer, tokenize};
pub use crate::types::{Attribute, Span, Token, find_attr, is_void_element};
