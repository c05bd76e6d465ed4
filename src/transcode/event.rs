// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

/// Heading depth of the preview. The number is the HTML heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2 = 2,
    H3 = 3,
    H4 = 4,
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "h{}", *self as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// A construct with a start and an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Title,
    Author,
    Heading(HeadingLevel),
    Strong,
    Emphasis,
    Underline,
    Code,
    Caption,
    List(ListKind),
    Table,
    TableRow,
    TableCell,

    /// A bare brace group: only the content is rendered.
    Group,

    /// A command such as `\mbox` whose argument the preview shows as is.
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathLayout {
    /// Body is used as is.
    Plain,

    /// Body is a multi-line environment that needs a wrapping `aligned`-like block.
    Wrapped(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'s> {
    Start(Tag),
    End(Tag),
    Text(&'s str),

    /// An escaped or substituted single character, e.g. `\%` or `~`.
    Char(char),
    InlineMath(&'s str),
    DisplayMath(&'s str, MathLayout),
    Verbatim(&'s str),

    /// `\item`, with its optional `[label]`.
    Item(Option<&'s str>),
    LineBreak,
    SoftBreak,
    ParagraphBreak,

    /// `&` inside a tabular.
    CellBreak,

    /// `\\` inside a tabular.
    RowBreak,

    /// `\hline` and its relatives.
    Rule,

    /// An unrecognized command, spanning its name, options and brace arguments.
    Command(&'s str),
}

impl Event<'_> {
    /// Whether the event renders to nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Event::Text(text) => text.trim().is_empty(),
            Event::SoftBreak | Event::ParagraphBreak | Event::Rule => true,
            _ => false,
        }
    }
}
