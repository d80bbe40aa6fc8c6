//! Shared helpers for composition and markup tests.

pub mod fixtures;
pub mod perf_fixtures;
pub mod token_snapshot;

/// Drop spaces, tabs and newlines so markup can be compared independent of layout.
pub fn strip_whitespace(markup: &str) -> String {
    markup
        .chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\t' | '\r'))
        .collect()
}

/// Assert that two markup strings are equal modulo whitespace.
#[track_caller]
pub fn assert_markup_eq(expected: &str, actual: &str) {
    let left = strip_whitespace(expected);
    let right = strip_whitespace(actual);
    if left != right {
        let at = left
            .chars()
            .zip(right.chars())
            .take_while(|(a, b)| a == b)
            .count();
        panic!(
            "markup differs (modulo whitespace) at char {at}\nexpected: {expected}\n  actual: {actual}"
        );
    }
}

/// Escape control characters so snapshot lines stay on one line.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => out.push_str(&format!("\\u{{{:02X}}}", ch as u32)),
            _ => out.push(ch),
        }
    }
    out
}

/// Compare snapshot lines and report the first mismatch with its neighbours.
#[track_caller]
pub fn assert_lines_eq(expected: &[&str], actual: &[String]) {
    let first_mismatch = (0..expected.len().max(actual.len()))
        .find(|&i| expected.get(i).copied() != actual.get(i).map(String::as_str));
    let Some(i) = first_mismatch else {
        return;
    };
    let mut report = format!("first mismatch at line {}:\n", i + 1);
    for line in i.saturating_sub(2)..(i + 3).min(expected.len().max(actual.len())) {
        let marker = if line == i { ">" } else { " " };
        let left = expected.get(line).copied().unwrap_or("<missing>");
        let right = actual.get(line).map(String::as_str).unwrap_or("<missing>");
        report.push_str(&format!("{marker} {:>4}  expected: {left}\n", line + 1));
        report.push_str(&format!("{marker} {:>4}    actual: {right}\n", line + 1));
    }
    report.push_str(&format!(
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    ));
    panic!("{report}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_whitespace_ignores_layout_only() {
        assert_eq!(strip_whitespace(" <a>\n\t x </a> "), "<a>x</a>");
    }

    #[test]
    #[should_panic(expected = "markup differs")]
    fn assert_markup_eq_reports_differences() {
        assert_markup_eq("<a>x</a>", "<a>y</a>");
    }

    #[test]
    fn escape_text_keeps_lines_single() {
        assert_eq!(escape_text("a\nb\t\u{1}"), "a\\nb\\t\\u{01}");
    }
}
