//! Server-side UI composition: parses backend pages annotated with the
//! `uic-*` vocabulary into fragments, placeholders and fetch dependencies.
//!
//! [`ContentParser`] turns one page into a [`Content`]; a compositor fetches
//! what `Content::required_content` and `Content::dependencies` name, then
//! substitutes the placeholders (see [`placeholder`]) in the fragments.

mod attrs;
mod content;
mod discovery;
mod error;
mod fetch;
mod fragment;
mod handler;
mod head_filter;
mod parser;
pub mod placeholder;

pub use crate::attrs::{UIC_REMOVE, join_attrs};
pub use crate::content::{Content, Params};
pub use crate::discovery::{DiscoveryError, DiscoveryResolver, ServiceDiscovery};
pub use crate::error::{MetaError, ParseError};
pub use crate::fetch::{DEFAULT_PRIORITY, DEFAULT_TIMEOUT, FetchDefinition};
pub use crate::fragment::Fragment;
pub use crate::handler::{
    DefaultErrHandler, ErrHandler, ErrHandlerRef, FetchFailure, ProcessError, ResponseProcessor,
};
pub use crate::head_filter::{filter_head_fragment, head_properties};
pub use crate::parser::{
    ContentParser, ParsedFragment, ParserConfig, parse_fragment, skip_subtree_if_remove,
};
