use std::fmt;

use crate::placeholder::{self, Placeholders};

/// Serialized markup that may contain placeholder markers.
///
/// Only the text form exists today; further variants (e.g. a list of parts
/// stitched at render time) would be added here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
}

impl Fragment {
    pub fn text(content: impl Into<String>) -> Self {
        Fragment::Text(content.into())
    }

    pub fn content(&self) -> &str {
        match self {
            Fragment::Text(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content().is_empty()
    }

    /// Walk the fragment as text and placeholder segments.
    pub fn segments(&self) -> Placeholders<'_> {
        placeholder::scan(self.content())
    }

    pub(crate) fn content_mut(&mut self) -> &mut String {
        match self {
            Fragment::Text(text) => text,
        }
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Fragment::Text(String::new())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}
