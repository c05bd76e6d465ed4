// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

/// Presentation settings of a preview page.
pub struct PageOptions<'a> {
    pub title: &'a str,
    pub font_size: u32,
    pub dark_mode: bool,
    pub math_script: &'a str,
}

/// A standalone page around a preview fragment. Math in the fragment is
/// typeset by MathJax once the page has loaded.
pub fn html_doc(fragment: &str, options: &PageOptions) -> String {
    let doc_type = "<!DOCTYPE html>";
    let body_class = match options.dark_mode {
        true => r#" class="dark-mode""#,
        false => "",
    };
    let body_style = format!(r#" style="--font-size: {}px;""#, options.font_size);

    let head = format!(
        r#"<head>
<meta http-equiv="Content-Type" content="text/html; charset=utf-8">
<meta name="viewport" content="width=device-width">
<title>{}</title>
{}{}{}</head>"#,
        htmlize::escape_text(options.title),
        html_import_math(options.math_script),
        html_css(),
        html_javascript(),
    );

    let body = format!(
        r#"<body{}{}>
<main id="preview">{}</main>
</body>"#,
        body_class, body_style, fragment
    );

    format!(
        "{}\n<html lang=\"en-US\">\n{}\n{}\n</html>\n",
        doc_type, head, body
    )
}

pub fn html_import_math(math_script: &str) -> String {
    format!(
        "{}<script id=\"MathJax-script\" async src=\"{}\"></script>\n",
        include_str!("include/import-math.html"),
        htmlize::escape_attribute(math_script)
    )
}

pub fn html_css() -> String {
    format!("<style>\n{}</style>\n", html_main_style())
}

pub fn html_javascript() -> String {
    format!("<script>\n{}</script>\n", include_str!("include/typeset.js"))
}

pub fn html_main_style() -> &'static str {
    include_str!("include/preview.css")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(dark_mode: bool) -> PageOptions<'static> {
        PageOptions {
            title: "A & B",
            font_size: 18,
            dark_mode,
            math_script: "https://example.com/tex.js?a=1&b=2",
        }
    }

    #[test]
    fn test_page_embeds_fragment() {
        let page = html_doc("<p><h1>Hi</h1></p>", &options(false));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<main id="preview"><p><h1>Hi</h1></p></main>"#));
        assert!(page.contains("<title>A &amp; B</title>"));
        assert!(page.contains(r#"<body style="--font-size: 18px;">"#));
        assert!(page.contains("MathJax.typesetPromise([preview])"));
        assert!(page.contains("inlineMath: [['$', '$'], ['\\\\(', '\\\\)']]"));
    }

    #[test]
    fn test_dark_mode_class() {
        let page = html_doc("", &options(true));
        assert!(page.contains(r#"<body class="dark-mode" style="--font-size: 18px;">"#));
    }

    #[test]
    fn test_script_url_is_escaped() {
        let page = html_doc("", &options(false));
        assert!(page.contains(r#"src="https://example.com/tex.js?a=1&amp;b=2""#));
    }
}
