// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::event::{Event, HeadingLevel, Tag};

pub const TITLE_RULE_WIDTH: usize = 40;
pub const SECTION_RULE_WIDTH: usize = 20;
pub const SUBSECTION_RULE_WIDTH: usize = 15;

pub const MATH_PLACEHOLDER: &str = "[Math]";
pub const BULLET: &str = "• ";

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Write the events as plain text into `out`. Math is not reproducible in
/// plain text, so every math span becomes [`MATH_PLACEHOLDER`].
///
/// Commands without a plain-text form are dropped together with their
/// argument, see [`is_dropped`].
pub fn push_text<'s, I>(out: &mut String, iter: I)
where
    I: Iterator<Item = Event<'s>>,
{
    let mut cell_index = 0;
    let mut hidden = 0usize;
    for event in iter {
        match event {
            Event::Start(tag) if is_dropped(tag) => hidden += 1,
            Event::End(tag) if is_dropped(tag) => hidden = hidden.saturating_sub(1),
            _ if hidden > 0 => (),
            Event::Start(tag) => match tag {
                Tag::Author => out.push_str("\nBy: "),
                Tag::Heading(HeadingLevel::H2) => out.push_str("\n\n"),
                Tag::Heading(_) | Tag::Table => out.push('\n'),
                Tag::Strong => out.push_str("**"),
                Tag::Emphasis => out.push('*'),
                Tag::TableRow => cell_index = 0,
                Tag::TableCell if cell_index > 0 => out.push_str(" | "),
                _ => (),
            },
            Event::End(tag) => match tag {
                Tag::Title => push_rule(out, '=', TITLE_RULE_WIDTH),
                Tag::Heading(HeadingLevel::H2) => push_rule(out, '-', SECTION_RULE_WIDTH),
                Tag::Heading(HeadingLevel::H3) => push_rule(out, '~', SUBSECTION_RULE_WIDTH),
                Tag::Author | Tag::Heading(_) | Tag::TableRow => out.push('\n'),
                Tag::Strong => out.push_str("**"),
                Tag::Emphasis => out.push('*'),
                Tag::TableCell => cell_index += 1,
                _ => (),
            },
            Event::Text(text) => out.extend(text.chars().filter(|c| !matches!(c, '{' | '}'))),
            Event::Char('\u{a0}') => out.push(' '),
            Event::Char(c) => out.push(c),
            Event::InlineMath(_) | Event::DisplayMath(..) => out.push_str(MATH_PLACEHOLDER),
            Event::Verbatim(text) => out.push_str(text),
            Event::Item(label) => {
                out.push_str(BULLET);
                if let Some(label) = label {
                    out.push_str(label);
                    out.push(' ');
                }
            }
            Event::LineBreak | Event::SoftBreak | Event::RowBreak => out.push('\n'),
            Event::ParagraphBreak => out.push_str("\n\n"),
            Event::CellBreak => out.push_str(" | "),
            Event::Rule | Event::Command(_) => (),
        }
    }
}

/// Only titles, authors, headings down to subsections, bold and italic
/// survive in plain text. Bare brace groups keep their content.
fn is_dropped(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::Heading(HeadingLevel::H4)
            | Tag::Underline
            | Tag::Code
            | Tag::Caption
            | Tag::Transparent
    )
}

fn push_rule(out: &mut String, c: char, width: usize) {
    out.push('\n');
    out.push_str(&c.to_string().repeat(width));
}

/// Collapse runs of blank lines into one and trim the whole text.
pub fn tidy(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::events;

    fn plain(source: &str) -> String {
        let mut out = String::new();
        push_text(&mut out, events(source));
        tidy(&out)
    }

    #[test]
    fn test_headings_and_rules() {
        assert_eq!(
            plain(r"\section{A}\subsection{B}"),
            format!("A\n{}\nB\n{}", "-".repeat(20), "~".repeat(15))
        );
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            plain("\\begin{itemize}\n\\item First\n\\item Second\n\\end{itemize}"),
            "• First\n• Second"
        );
    }

    #[test]
    fn test_unknown_commands_and_braces() {
        assert_eq!(plain(r"\foo{bar} baz {qux} }"), "baz qux");
    }

    #[test]
    fn test_other_commands_drop_their_argument() {
        assert_eq!(plain(r"\underline{keep} \texttt{code} \paragraph{P} \caption{C}"), "");
        assert_eq!(plain(r"a \mbox{\textbf{b}} {c} \text{d}e"), "a  c e");
        assert_eq!(plain(r"\subsubsection{Deep} \textit{x}"), "*x*");
    }

    #[test]
    fn test_math_is_lossy() {
        assert_eq!(plain(r"Let $x^2 + \frac{1}{2}$ be"), "Let [Math] be");
        assert_eq!(plain(r"\[\int_0^1 f\]"), "[Math]");
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(
            plain("\\begin{tabular}{cc}\\hline a & b \\\\ c & d \\\\ \\hline\\end{tabular}"),
            "a | b\nc | d"
        );
    }

    #[test]
    fn test_blank_lines_collapse() {
        assert_eq!(plain("a\n\n\n\n\nb"), "a\n\nb");
    }
}
