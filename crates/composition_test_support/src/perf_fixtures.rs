//! Generated pages for benchmarks.

const BLOCK_TEMPLATE: &str = r#"<div class="box"><span>hello</span><img src="x.png"><uic-include src="svc.example/teaser#card" required="false" param-id="7"><p>fallback</p></uic-include><ul uic-remove><li>debug</li></ul></div>
"#;

/// A page with a small head and `blocks` copies of a block mixing plain markup,
/// an optional include and a removed subtree, split across two fragments.
pub fn make_page(blocks: usize) -> String {
    let mut html = String::with_capacity(BLOCK_TEMPLATE.len() * blocks + 512);
    html.push_str(
        "<html><head><meta charset=\"utf-8\"><title>bench</title>\
         <script type=\"text/uic-meta\">{\"page\": \"bench\"}</script></head><body class=\"bench\">\n\
         <uic-fragment name=\"first\">\n",
    );
    for i in 0..blocks {
        if i == blocks / 2 {
            html.push_str("</uic-fragment>\n<uic-fragment name=\"second\">\n");
        }
        html.push_str(BLOCK_TEMPLATE);
    }
    html.push_str("</uic-fragment>\n<uic-tail><script src=\"tail.js\"></script></uic-tail></body></html>\n");
    html
}

/// A body whose only content is one `uic-remove` subtree nested `depth` levels.
pub fn make_removed_subtree(depth: usize) -> String {
    let mut html = String::from("<body><section uic-remove>");
    for _ in 0..depth {
        html.push_str("<div><br><span>x</span>");
    }
    for _ in 0..depth {
        html.push_str("</div>");
    }
    html.push_str("</section><p>after</p></body>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pages_scale_with_input() {
        assert!(make_page(10).len() > make_page(2).len());
        assert_eq!(make_page(4).matches("uic-fragment name=").count(), 2);
        assert_eq!(make_removed_subtree(3).matches("<div>").count(), 3);
    }
}
