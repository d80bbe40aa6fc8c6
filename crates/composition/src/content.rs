use std::collections::HashMap;

use serde_json::Value;

use crate::fetch::FetchDefinition;
use crate::fragment::Fragment;

/// `param-*` attributes of one include target, prefix stripped.
pub type Params = HashMap<String, String>;

/// Everything one backend page contributes to the composed page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Content {
    pub(crate) head: Option<Fragment>,
    pub(crate) tail: Option<Fragment>,
    pub(crate) body: HashMap<String, Fragment>,
    pub(crate) body_attributes: Fragment,
    pub(crate) meta: HashMap<String, Value>,
    pub(crate) required_content: HashMap<String, FetchDefinition>,
    pub(crate) dependencies: HashMap<String, Params>,
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head markup; `None` when the head was empty.
    pub fn head(&self) -> Option<&Fragment> {
        self.head.as_ref()
    }

    /// Tail markup; `None` when the page had no `uic-tail`.
    pub fn tail(&self) -> Option<&Fragment> {
        self.tail.as_ref()
    }

    /// Body fragments by name; `""` is the default fragment.
    pub fn body(&self) -> &HashMap<String, Fragment> {
        &self.body
    }

    /// Raw attribute text of the `<body>` tag.
    pub fn body_attributes(&self) -> &Fragment {
        &self.body_attributes
    }

    pub fn meta(&self) -> &HashMap<String, Value> {
        &self.meta
    }

    /// Fetches that must complete for the page to render, keyed by URL.
    pub fn required_content(&self) -> &HashMap<String, FetchDefinition> {
        &self.required_content
    }

    /// Include targets keyed by URL without the `#fragment` suffix.
    pub fn dependencies(&self) -> &HashMap<String, Params> {
        &self.dependencies
    }

    /// Move everything `other` carries into `self`. Maps are merged with
    /// `other` winning per key; head, tail and body attributes are replaced
    /// only when `other` has them.
    pub(crate) fn absorb(&mut self, other: Content) {
        if other.head.is_some() {
            self.head = other.head;
        }
        if other.tail.is_some() {
            self.tail = other.tail;
        }
        if !other.body_attributes.is_empty() {
            self.body_attributes = other.body_attributes;
        }
        self.body.extend(other.body);
        self.meta.extend(other.meta);
        self.required_content.extend(other.required_content);
        self.dependencies.extend(other.dependencies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_overwrites_per_key_and_keeps_missing_parts() {
        let mut base = Content::new();
        base.head = Some(Fragment::text("<title>a</title>"));
        base.body.insert("x".to_string(), Fragment::text("old"));
        base.meta.insert("keep".to_string(), Value::from(1));

        let mut other = Content::new();
        other.body.insert("x".to_string(), Fragment::text("new"));
        other.meta.insert("foo".to_string(), Value::from("bar"));

        base.absorb(other);
        assert_eq!(base.head(), Some(&Fragment::text("<title>a</title>")));
        assert_eq!(base.body()["x"], Fragment::text("new"));
        assert_eq!(base.meta().len(), 2);
        assert!(base.tail().is_none());
        assert!(base.body_attributes().is_empty());
    }
}
