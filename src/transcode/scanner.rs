// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::collections::VecDeque;

use super::event::{Event, HeadingLevel, ListKind, MathLayout, Tag};

struct Environment<'s> {
    name: &'s str,
    tag: Option<Tag>,
}

/// Splits markup source into a flat sequence of [`Event`]s.
///
/// Brace groups and environments are tracked on two independent stacks, so
/// a construct left open at the end of the source is closed there.
pub struct Scanner<'s> {
    source: &'s str,
    pos: usize,
    groups: Vec<Tag>,
    environments: Vec<Environment<'s>>,
    pending: VecDeque<Event<'s>>,
}

impl<'s> Scanner<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            groups: vec![],
            environments: vec![],
            pending: VecDeque::new(),
        }
    }

    fn rest(&self) -> &'s str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn in_tabular(&self) -> bool {
        self.environments
            .last()
            .is_some_and(|env| matches!(env.name, "tabular" | "tabular*" | "tabularx"))
    }

    fn scan(&mut self) -> Option<Event<'s>> {
        let rest = self.rest();
        match rest.as_bytes()[0] {
            b'\\' => self.control(),
            b'{' => {
                self.pos += 1;
                self.groups.push(Tag::Group);
                Some(Event::Start(Tag::Group))
            }
            b'}' => {
                self.pos += 1;
                match self.groups.pop() {
                    Some(tag) => Some(Event::End(tag)),
                    None => Some(Event::Text(&rest[..1])),
                }
            }
            b'$' => Some(self.dollar_math()),
            b'%' => {
                self.pos += rest.find('\n').unwrap_or(rest.len());
                None
            }
            b'&' if self.in_tabular() => {
                self.pos += 1;
                Some(Event::CellBreak)
            }
            b'~' => {
                self.pos += 1;
                Some(Event::Char('\u{a0}'))
            }
            b'\r' => {
                self.pos += 1;
                None
            }
            b'\n' => Some(self.newline()),
            _ => Some(self.text()),
        }
    }

    fn text(&mut self) -> Event<'s> {
        let rest = self.rest();
        let tabular = self.in_tabular();
        let len = rest
            .bytes()
            .position(|b| {
                matches!(b, b'\\' | b'{' | b'}' | b'$' | b'%' | b'~' | b'\r' | b'\n')
                    || (tabular && b == b'&')
            })
            .unwrap_or(rest.len());
        self.pos += len;
        Event::Text(&rest[..len])
    }

    /// A newline followed by a whitespace-only line starts a new paragraph,
    /// any other newline is soft.
    fn newline(&mut self) -> Event<'s> {
        let rest = &self.rest()[1..];
        if starts_blank_line(rest) {
            let blank = rest.bytes().take_while(u8::is_ascii_whitespace).count();
            self.pos += 1 + blank;
            Event::ParagraphBreak
        } else {
            self.pos += 1;
            Event::SoftBreak
        }
    }

    fn dollar_math(&mut self) -> Event<'s> {
        let rest = self.rest();
        if let Some(body) = rest.strip_prefix("$$") {
            return match find_unescaped(body, "$$") {
                Some(end) => {
                    self.pos += 2 + end + 2;
                    Event::DisplayMath(&body[..end], MathLayout::Plain)
                }
                None => {
                    self.pos += 2;
                    Event::Text(&rest[..2])
                }
            };
        }

        let body = &rest[1..];
        match inline_math_end(body) {
            Some(end) => {
                self.pos += 1 + end + 1;
                Event::InlineMath(&body[..end])
            }
            None => {
                self.pos += 1;
                Event::Text(&rest[..1])
            }
        }
    }

    /// `\[ .. \]` and `\( .. \)`.
    fn delimited_math(&mut self, close: &str, display: bool) -> Event<'s> {
        let rest = self.rest();
        let body = &rest[2..];
        match body.find(close) {
            Some(end) => {
                self.pos += 2 + end + close.len();
                let body = &body[..end];
                match display {
                    true => Event::DisplayMath(body, MathLayout::Plain),
                    false => Event::InlineMath(body),
                }
            }
            None => {
                self.pos += 2;
                Event::Text(&rest[..2])
            }
        }
    }

    fn control(&mut self) -> Option<Event<'s>> {
        let start = self.pos;
        let rest = self.rest();
        let Some(next) = rest[1..].chars().next() else {
            self.pos += 1;
            return Some(Event::Text(rest));
        };

        match next {
            '\\' => {
                self.pos += 2;
                self.take_option();
                match self.in_tabular() {
                    true => Some(Event::RowBreak),
                    false => Some(Event::LineBreak),
                }
            }
            '[' => Some(self.delimited_math("\\]", true)),
            '(' => Some(self.delimited_math("\\)", false)),
            '$' | '%' | '&' | '#' | '_' | '{' | '}' | ' ' => {
                self.pos += 2;
                Some(Event::Char(next))
            }
            ',' => {
                self.pos += 2;
                Some(Event::Char(' '))
            }
            c if c.is_ascii_alphabetic() => self.control_word(start),
            c => {
                let len = 1 + c.len_utf8();
                self.pos += len;
                Some(Event::Command(&rest[..len]))
            }
        }
    }

    fn control_word(&mut self, start: usize) -> Option<Event<'s>> {
        let name_len = self.source[start + 1..]
            .bytes()
            .take_while(u8::is_ascii_alphabetic)
            .count();
        let name = &self.source[start + 1..start + 1 + name_len];
        self.pos = start + 1 + name_len;
        if self.peek() == Some(b'*') {
            self.pos += 1;
        }

        let tag = match name {
            "title" => Tag::Title,
            "author" => Tag::Author,
            "chapter" | "section" => Tag::Heading(HeadingLevel::H2),
            "subsection" | "frametitle" => Tag::Heading(HeadingLevel::H3),
            "subsubsection" | "paragraph" => Tag::Heading(HeadingLevel::H4),
            "textbf" => Tag::Strong,
            "textit" | "emph" => Tag::Emphasis,
            "underline" => Tag::Underline,
            "texttt" => Tag::Code,
            "caption" => Tag::Caption,
            "opening" | "closing" | "mbox" | "text" | "frame" => Tag::Transparent,
            _ => return self.command(start, name),
        };
        self.open_argument(tag).or_else(|| self.raw_command(start))
    }

    fn command(&mut self, start: usize, name: &'s str) -> Option<Event<'s>> {
        match name {
            "documentclass" | "usepackage" | "date" | "label" | "vspace" | "hspace"
            | "usetheme" => {
                self.skip_arguments();
                None
            }
            "maketitle" | "centering" | "hfill" | "tableofcontents" | "titlepage"
            | "noindent" | "newpage" | "clearpage" => None,
            "item" => {
                self.skip_spaces();
                let label = self.take_option();
                self.skip_spaces();
                Some(Event::Item(label))
            }
            "hline" | "toprule" | "midrule" | "bottomrule" => Some(Event::Rule),
            "cline" => {
                self.skip_arguments();
                Some(Event::Rule)
            }
            "par" => Some(Event::ParagraphBreak),
            "newline" => Some(Event::LineBreak),
            "begin" => self.begin_environment(start),
            "end" => self.end_environment(start),
            _ => self.raw_command(start),
        }
    }

    fn begin_environment(&mut self, start: usize) -> Option<Event<'s>> {
        let Some(name) = self.take_argument() else {
            return self.raw_command(start);
        };
        match name {
            "itemize" | "description" => self.enter(name, Some(Tag::List(ListKind::Bulleted))),
            "enumerate" => self.enter(name, Some(Tag::List(ListKind::Numbered))),
            "tabular" => {
                self.take_option();
                self.take_argument();
                self.enter(name, Some(Tag::Table))
            }
            "tabular*" | "tabularx" => {
                self.take_argument();
                self.take_option();
                self.take_argument();
                self.enter(name, Some(Tag::Table))
            }
            "table" | "table*" | "figure" | "figure*" => {
                self.take_option();
                self.enter(name, None)
            }
            "verbatim" => Some(Event::Verbatim(self.raw_body(name))),
            "math" => Some(Event::InlineMath(self.raw_body(name))),
            "equation" | "equation*" | "displaymath" => {
                Some(Event::DisplayMath(self.raw_body(name), MathLayout::Plain))
            }
            "align" | "align*" | "flalign" | "flalign*" => Some(Event::DisplayMath(
                self.raw_body(name),
                MathLayout::Wrapped("aligned"),
            )),
            "gather" | "gather*" | "multline" | "multline*" => Some(Event::DisplayMath(
                self.raw_body(name),
                MathLayout::Wrapped("gathered"),
            )),
            _ => self.enter(name, None),
        }
    }

    fn end_environment(&mut self, start: usize) -> Option<Event<'s>> {
        let Some(name) = self.take_argument() else {
            return self.raw_command(start);
        };
        if let Some(index) = self.environments.iter().rposition(|env| env.name == name) {
            for env in self.environments.drain(index..).rev() {
                if let Some(tag) = env.tag {
                    self.pending.push_back(Event::End(tag));
                }
            }
        }
        None
    }

    fn enter(&mut self, name: &'s str, tag: Option<Tag>) -> Option<Event<'s>> {
        self.environments.push(Environment { name, tag });
        tag.map(Event::Start)
    }

    /// Takes everything up to `\end{name}` without interpreting it.
    fn raw_body(&mut self, name: &str) -> &'s str {
        let rest = self.rest();
        let marker = format!("\\end{{{}}}", name);
        match rest.find(&marker) {
            Some(end) => {
                self.pos += end + marker.len();
                &rest[..end]
            }
            None => {
                self.pos = self.source.len();
                rest
            }
        }
    }

    fn open_argument(&mut self, tag: Tag) -> Option<Event<'s>> {
        let rest = self.rest();
        let spaces = rest.bytes().take_while(|b| matches!(b, b' ' | b'\t')).count();
        if !rest[spaces..].starts_with('{') {
            return None;
        }
        self.pos += spaces + 1;
        self.groups.push(tag);
        Some(Event::Start(tag))
    }

    fn raw_command(&mut self, start: usize) -> Option<Event<'s>> {
        self.skip_arguments();
        Some(Event::Command(&self.source[start..self.pos]))
    }

    fn take_argument(&mut self) -> Option<&'s str> {
        let body = self.rest().strip_prefix('{')?;
        let end = closing_brace(body)?;
        self.pos += 1 + end + 1;
        Some(&body[..end])
    }

    fn take_option(&mut self) -> Option<&'s str> {
        let body = self.rest().strip_prefix('[')?;
        let end = body.find(']')?;
        self.pos += 1 + end + 1;
        Some(&body[..end])
    }

    fn skip_arguments(&mut self) {
        while self.take_option().is_some() || self.take_argument().is_some() {}
    }

    fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }
}

impl<'s> Iterator for Scanner<'s> {
    type Item = Event<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            if self.pos >= self.source.len() {
                if let Some(tag) = self.groups.pop() {
                    return Some(Event::End(tag));
                }
                match self.environments.pop() {
                    Some(Environment { tag: Some(tag), .. }) => return Some(Event::End(tag)),
                    Some(_) => continue,
                    None => return None,
                }
            }

            if let Some(event) = self.scan() {
                return Some(event);
            }
        }
    }
}

/// Byte offset of the first `needle` not preceded by a backslash escape.
fn find_unescaped(haystack: &str, needle: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(needle.as_bytes()) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Offset of the `}` closing a group whose `{` was just consumed.
fn closing_brace(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => (),
        }
        i += 1;
    }
    None
}

/// Offset of the `$` closing an inline span. Inline math never runs across
/// a blank line, so the search stops at the first one.
fn inline_math_end(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) != Some(&b'\n') => {
                i += 2;
                continue;
            }
            b'$' => return Some(i),
            b'\n' if starts_blank_line(&body[i + 1..]) => return None,
            _ => (),
        }
        i += 1;
    }
    None
}

fn starts_blank_line(rest: &str) -> bool {
    let indent = rest
        .bytes()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r'))
        .count();
    rest.as_bytes().get(indent) == Some(&b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Event<'_>> {
        Scanner::new(source).collect()
    }

    #[test]
    fn test_section_with_nested_emphasis() {
        assert_eq!(
            scan(r"\section{A \textbf{b}}"),
            vec![
                Event::Start(Tag::Heading(HeadingLevel::H2)),
                Event::Text("A "),
                Event::Start(Tag::Strong),
                Event::Text("b"),
                Event::End(Tag::Strong),
                Event::End(Tag::Heading(HeadingLevel::H2)),
            ]
        );
    }

    #[test]
    fn test_preamble_is_silent() {
        let source = "\\documentclass[12pt]{article}\\usepackage[utf8]{inputenc}\\date{\\today}\\maketitle";
        assert!(scan(source).is_empty());
    }

    #[test]
    fn test_breaks() {
        assert_eq!(
            scan("a\nb\n  \n\nc"),
            vec![
                Event::Text("a"),
                Event::SoftBreak,
                Event::Text("b"),
                Event::ParagraphBreak,
                Event::Text("c"),
            ]
        );
    }

    #[test]
    fn test_math_spans() {
        assert_eq!(
            scan(r"$a<b$ \[x\] $$y$$"),
            vec![
                Event::InlineMath("a<b"),
                Event::Text(" "),
                Event::DisplayMath("x", MathLayout::Plain),
                Event::Text(" "),
                Event::DisplayMath("y", MathLayout::Plain),
            ]
        );
        assert_eq!(scan(r"\$5"), vec![Event::Char('$'), Event::Text("5")]);
        assert_eq!(scan("$a\n\nb$")[0], Event::Text("$"));
    }

    #[test]
    fn test_unmatched_dollar_stops_at_paragraph() {
        assert_eq!(
            scan("5$ costs\n\n$x$"),
            vec![
                Event::Text("5"),
                Event::Text("$"),
                Event::Text(" costs"),
                Event::ParagraphBreak,
                Event::InlineMath("x"),
            ]
        );
        assert_eq!(inline_math_end("a\n \t\nb$"), None);
        assert_eq!(inline_math_end("a\nb$"), Some(3));
        assert_eq!(inline_math_end(r"a\$b$"), Some(4));
    }

    #[test]
    fn test_math_keeps_environments() {
        let events = scan("\\[\\begin{bmatrix}a & b\\end{bmatrix}\\]");
        assert_eq!(
            events,
            vec![Event::DisplayMath(
                "\\begin{bmatrix}a & b\\end{bmatrix}",
                MathLayout::Plain
            )]
        );
    }

    #[test]
    fn test_tabular_separators() {
        let events = scan("\\begin{tabular}{|c|c|}\\hline a & b \\\\\\end{tabular} x & y");
        assert_eq!(
            events,
            vec![
                Event::Start(Tag::Table),
                Event::Rule,
                Event::Text(" a "),
                Event::CellBreak,
                Event::Text(" b "),
                Event::RowBreak,
                Event::End(Tag::Table),
                Event::Text(" x & y"),
            ]
        );
    }

    #[test]
    fn test_items_and_lists() {
        let events = scan("\\begin{itemize}\\item One\\item[b] Two\\end{itemize}");
        assert_eq!(
            events,
            vec![
                Event::Start(Tag::List(ListKind::Bulleted)),
                Event::Item(None),
                Event::Text("One"),
                Event::Item(Some("b")),
                Event::Text("Two"),
                Event::End(Tag::List(ListKind::Bulleted)),
            ]
        );
    }

    #[test]
    fn test_unknown_command_keeps_arguments() {
        assert_eq!(
            scan(r"\foo[x]{y}{z} w \today"),
            vec![
                Event::Command(r"\foo[x]{y}{z}"),
                Event::Text(" w "),
                Event::Command(r"\today"),
            ]
        );
    }

    #[test]
    fn test_unclosed_constructs_are_closed_at_the_end() {
        assert_eq!(
            scan(r"\begin{enumerate}\textit{x"),
            vec![
                Event::Start(Tag::List(ListKind::Numbered)),
                Event::Start(Tag::Emphasis),
                Event::Text("x"),
                Event::End(Tag::Emphasis),
                Event::End(Tag::List(ListKind::Numbered)),
            ]
        );
    }

    #[test]
    fn test_comment_and_stray_brace() {
        assert_eq!(
            scan("a % hidden\n}"),
            vec![Event::Text("a "), Event::SoftBreak, Event::Text("}")]
        );
    }
}
