// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use pulldown_cmark_escape::escape_html_body_text;

use super::event::{Event, ListKind, MathLayout, Tag};

pub const PLACEHOLDER: &str =
    r#"<div class="math-preview"><p>Start typing to see your document preview...</p></div>"#;

const TABLE_OPEN: &str = r#"<table border="1" style="border-collapse: collapse; margin: 10px 0;">"#;
const CELL_OPEN: &str = r#"<td style="padding: 5px;">"#;

/// Write the events as HTML into `out`.
///
/// Returns `false` if nothing visible was written, i.e. the output is at
/// most whitespace.
pub fn push_html<'s, I>(out: &mut String, iter: I) -> bool
where
    I: Iterator<Item = Event<'s>>,
{
    HtmlWriter::new(iter, out).run()
}

struct HtmlWriter<'o, I> {
    /// Iterator supplying events.
    iter: I,

    out: &'o mut String,

    /// One entry per open list, `true` while its last item is unclosed.
    lists: Vec<bool>,

    /// Whether the current paragraph has visible content.
    in_paragraph: bool,

    /// A paragraph break is written lazily, right before the next visible content.
    pending_break: bool,

    visible: bool,
}

impl<'o, 's, I> HtmlWriter<'o, I>
where
    I: Iterator<Item = Event<'s>>,
{
    fn new(iter: I, out: &'o mut String) -> Self {
        Self {
            iter,
            out,
            lists: vec![],
            in_paragraph: false,
            pending_break: false,
            visible: false,
        }
    }

    #[inline]
    fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    #[inline]
    fn write_escaped(&mut self, s: &str) {
        escape_html_body_text(&mut *self.out, s).unwrap();
    }

    /// Mark the start of visible content.
    fn touch(&mut self) {
        if self.pending_break {
            self.write("</p><p>");
            self.pending_break = false;
        }
        self.in_paragraph = true;
        self.visible = true;
    }

    /// Whitespace is dropped at the very start and around paragraph breaks.
    fn write_space(&mut self, s: &str) {
        if self.visible && !self.pending_break {
            self.write_escaped(s);
        }
    }

    fn run(mut self) -> bool {
        use Event::*;
        while let Some(event) = self.iter.next() {
            match event {
                Start(tag) => self.start_tag(tag),
                End(tag) => self.end_tag(tag),
                Text(text) if text.trim().is_empty() => self.write_space(text),
                Text(text) => {
                    self.touch();
                    self.write_escaped(text);
                }
                // a bare dollar would open a math span
                Char('$') => {
                    self.touch();
                    self.write("\\$");
                }
                Char('\u{a0}') => {
                    self.touch();
                    self.write("&nbsp;");
                }
                Char(c) => {
                    self.touch();
                    self.write_escaped(c.encode_utf8(&mut [0; 4]));
                }
                InlineMath(math) => {
                    self.touch();
                    self.write("$");
                    self.write_escaped(math);
                    self.write("$");
                }
                DisplayMath(math, layout) => {
                    self.touch();
                    self.write("$$");
                    match layout {
                        MathLayout::Plain => self.write_escaped(math),
                        MathLayout::Wrapped(env) => {
                            self.write(&format!("\\begin{{{}}}", env));
                            self.write_escaped(math);
                            self.write(&format!("\\end{{{}}}", env));
                        }
                    }
                    self.write("$$");
                }
                Verbatim(text) => {
                    self.touch();
                    self.write("<pre>");
                    self.write_escaped(text);
                    self.write("</pre>");
                }
                Item(label) => self.item(label),
                LineBreak => {
                    self.touch();
                    self.write("<br>");
                }
                SoftBreak => self.write_space(" "),
                ParagraphBreak => {
                    if self.in_paragraph {
                        self.pending_break = true;
                        self.in_paragraph = false;
                    }
                }
                Command(raw) => {
                    self.touch();
                    self.write_escaped(raw);
                }
                CellBreak | RowBreak | Rule => (),
            }
        }
        self.visible
    }

    fn start_tag(&mut self, tag: Tag) {
        if matches!(tag, Tag::Group | Tag::Transparent) {
            return;
        }
        self.touch();
        match tag {
            Tag::Title => self.write("<h1>"),
            Tag::Author => self.write("<p><strong>By: "),
            Tag::Heading(level) => self.write(&format!("<{}>", level)),
            Tag::Strong => self.write("<strong>"),
            Tag::Emphasis => self.write("<em>"),
            Tag::Underline => self.write("<u>"),
            Tag::Code => self.write("<code>"),
            Tag::Caption => self.write("<caption>"),
            Tag::List(kind) => {
                self.lists.push(false);
                match kind {
                    ListKind::Bulleted => self.write("<ul>"),
                    ListKind::Numbered => self.write("<ol>"),
                }
            }
            Tag::Table => self.write(TABLE_OPEN),
            Tag::TableRow => self.write("<tr>"),
            Tag::TableCell => self.write(CELL_OPEN),
            Tag::Group | Tag::Transparent => (),
        }
    }

    fn end_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Title => self.write("</h1>"),
            Tag::Author => self.write("</strong></p>"),
            Tag::Heading(level) => self.write(&format!("</{}>", level)),
            Tag::Strong => self.write("</strong>"),
            Tag::Emphasis => self.write("</em>"),
            Tag::Underline => self.write("</u>"),
            Tag::Code => self.write("</code>"),
            Tag::Caption => self.write("</caption>"),
            Tag::List(kind) => {
                if self.lists.pop() == Some(true) {
                    self.write("</li>");
                }
                match kind {
                    ListKind::Bulleted => self.write("</ul>"),
                    ListKind::Numbered => self.write("</ol>"),
                }
            }
            Tag::Table => self.write("</table>"),
            Tag::TableRow => self.write("</tr>"),
            Tag::TableCell => self.write("</td>"),
            Tag::Group | Tag::Transparent => (),
        }
    }

    /// Items are closed before the next item of the same list and before
    /// the list itself ends.
    fn item(&mut self, label: Option<&str>) {
        self.touch();
        if let Some(open) = self.lists.last_mut() {
            if *open {
                self.out.push_str("</li>");
            }
            *open = true;
        }
        self.write("<li>");
        if let Some(label) = label {
            self.write("<strong>");
            self.write_escaped(label);
            self.write("</strong> ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::events;

    fn html(source: &str) -> String {
        let mut out = String::new();
        push_html(&mut out, events(source));
        out
    }

    #[test]
    fn test_list_items_are_closed() {
        assert_eq!(
            html("\\begin{itemize}\n\\item One\n\\item Two\n\\end{itemize}"),
            "<ul> <li>One </li><li>Two </li></ul>"
        );
    }

    #[test]
    fn test_nested_lists() {
        assert_eq!(
            html("\\begin{enumerate}\\item A\\begin{itemize}\\item B\\end{itemize}\\item C\\end{enumerate}"),
            "<ol><li>A<ul><li>B</li></ul></li><li>C</li></ol>"
        );
    }

    #[test]
    fn test_paragraph_breaks_collapse() {
        assert_eq!(html("\n\na\n\n\n\nb\nc\n\n"), "a</p><p>b c");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(html("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(html(r"$x<y$ costs \$5"), r"$x&lt;y$ costs \$5");
    }

    #[test]
    fn test_unknown_command_passes_through() {
        assert_eq!(html(r"\date{x}\today"), r"\today");
    }

    #[test]
    fn test_wrapped_math() {
        assert_eq!(
            html("\\begin{align*}a &= b\\end{align*}"),
            "$$\\begin{aligned}a &amp;= b\\end{aligned}$$"
        );
    }

    #[test]
    fn test_whitespace_is_not_visible() {
        let mut out = String::new();
        assert!(!push_html(&mut out, events("  \n \n\n\t")));
        assert!(out.is_empty());
    }
}
