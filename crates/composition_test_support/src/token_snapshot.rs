use crate::escape_text;
use markup::{Token, TokenStream, TokenizeError};

/// One line per token, e.g. `StartTag(a href="x" /)` or `Text(hi)`.
pub fn format_token(token: &Token) -> String {
    match token {
        Token::Doctype(value) => format!("Doctype({value})"),
        Token::StartTag {
            name,
            attributes,
            self_closing,
        } => {
            let mut line = format!("StartTag({name}");
            for attr in attributes {
                line.push(' ');
                line.push_str(&attr.name);
                if let Some(value) = &attr.value {
                    line.push_str("=\"");
                    line.push_str(&escape_text(value));
                    line.push('"');
                }
            }
            if *self_closing {
                line.push_str(" /");
            }
            line.push(')');
            line
        }
        Token::EndTag(name) => format!("EndTag({name})"),
        Token::Comment(text) => format!("Comment({})", escape_text(text)),
        Token::Text(text) => format!("Text({})", escape_text(text)),
    }
}

/// Drain the rest of `stream` into snapshot lines.
pub fn snapshot_rest(stream: &mut TokenStream<'_>) -> Result<Vec<String>, TokenizeError> {
    let mut out = Vec::new();
    while let Some(token) = stream.next_token()? {
        out.push(format_token(&token));
    }
    Ok(out)
}

pub fn token_snapshot(input: &str) -> Result<Vec<String>, TokenizeError> {
    snapshot_rest(&mut TokenStream::new(input))
}
