use std::collections::HashMap;

use markup::{Token, TokenStream};
use serde_json::Value;

use crate::error::{MetaError, ParseError};

pub(crate) const META_SCRIPT_TYPE: &str = "text/uic-meta";

pub(crate) fn is_meta_script(token: &Token) -> bool {
    token.is_start_tag("script")
        && token
            .attr("type")
            .is_some_and(|ty| ty.eq_ignore_ascii_case(META_SCRIPT_TYPE))
}

/// Read the JSON object of a meta script whose start tag was just consumed,
/// merging its keys into `meta`. The closing `</script>` is consumed too.
pub(crate) fn parse_meta_json(
    stream: &mut TokenStream<'_>,
    meta: &mut HashMap<String, Value>,
) -> Result<(), ParseError> {
    let Some(Token::Text(text)) = stream.next_token()? else {
        return Err(MetaError::MissingTextNode.into());
    };
    let value: Value = serde_json::from_str(&text).map_err(MetaError::InvalidJson)?;
    let Value::Object(object) = value else {
        return Err(MetaError::NotAnObject(json_kind(&value)).into());
    };
    match stream.next_token()? {
        Some(token) if token.is_end_tag("script") => {}
        _ => return Err(MetaError::NotProperlyEnded.into()),
    }
    log::trace!(target: "uic.parser", "meta script with {} keys", object.len());
    meta.extend(object);
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_meta(input: &str) -> Result<HashMap<String, Value>, ParseError> {
        let mut stream = TokenStream::new(input);
        let start = stream.next_token().unwrap().unwrap();
        assert!(is_meta_script(&start), "not a meta script: {start:?}");
        let mut meta = HashMap::new();
        parse_meta_json(&mut stream, &mut meta)?;
        Ok(meta)
    }

    #[test]
    fn meta_object_is_merged() {
        let meta = parse_meta(
            r#"<script type="text/uic-meta">
      {
       "foo": "bar",
       "boo": "bazz",
       "categories": ["animal", "human"]
      }
    </script>"#,
        )
        .unwrap();
        assert_eq!(meta["foo"], "bar");
        assert_eq!(meta["categories"], serde_json::json!(["animal", "human"]));
    }

    #[test]
    fn meta_errors_name_the_problem() {
        let cases = [
            (r#"<script type="text/uic-meta"></script>"#, "expected text node for meta"),
            (
                r#"<script type="text/uic-meta">{"sdc":</script>"#,
                "error while parsing json from meta json",
            ),
            (
                r#"<script type="text/uic-meta">["a"]</script>"#,
                "error while parsing json from meta json",
            ),
            (r#"<script type="text/uic-meta">{}"#, "Tag not properly ended"),
        ];
        for (input, expected) in cases {
            let err = parse_meta(input).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "input {input:?}: expected {expected:?} in {err}"
            );
        }
    }

    #[test]
    fn only_typed_scripts_are_meta() {
        let plain = TokenStream::new("<script>x</script>").next_token().unwrap().unwrap();
        assert!(!is_meta_script(&plain));
    }
}
