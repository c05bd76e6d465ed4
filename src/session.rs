// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::ops::Range;

use crate::{
    history::History,
    template::{self, ListKind, MathKind, Template},
};

/// The document being edited together with its selection and history.
///
/// Every mutation records a snapshot, so the history always ends with the
/// current source unless an undo moved the cursor back.
#[derive(Debug)]
pub struct EditorSession {
    source: String,

    /// Byte range, always on char boundaries.
    selection: Range<usize>,

    history: History,
}

impl EditorSession {
    /// A source edited outside of the session since the last run is
    /// recorded as a new snapshot.
    pub fn new(source: String, mut history: History) -> Self {
        history.record(&source);
        let end = source.len();
        Self {
            source,
            selection: end..end,
            history,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn selected_text(&self) -> &str {
        &self.source[self.selection.clone()]
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Out of range bounds are clamped to the source, and bounds inside a
    /// character move back to its start.
    pub fn select(&mut self, range: Range<usize>) {
        let end = floor_char_boundary(&self.source, range.end);
        let start = floor_char_boundary(&self.source, range.start.min(end));
        self.selection = start..end;
    }

    /// Surround the selection with `before` and `after`. The selection stays
    /// on the originally selected text.
    pub fn insert_text(&mut self, before: &str, after: &str) {
        let Range { start, end } = self.selection.clone();
        let replacement = format!("{}{}{}", before, &self.source[start..end], after);
        self.source.replace_range(start..end, &replacement);

        let selected = start + before.len();
        self.selection = selected..selected + (end - start);
        self.history.record(&self.source);
    }

    pub fn insert_list(&mut self, kind: ListKind) {
        self.insert_text(&template::list_snippet(kind), "");
    }

    pub fn insert_table(&mut self) {
        self.insert_text(template::TABLE_SNIPPET, "");
    }

    pub fn insert_math(&mut self, kind: MathKind) {
        let (before, after) = kind.delimiters();
        self.insert_text(before, after);
    }

    /// Replace the whole source.
    pub fn load_template(&mut self, template: Template) {
        self.source = template.source().to_string();
        self.selection = 0..0;
        self.history.record(&self.source);
    }

    /// Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().map(str::to_string) {
            Some(source) => {
                self.restore(source);
                true
            }
            None => false,
        }
    }

    /// Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().map(str::to_string) {
            Some(source) => {
                self.restore(source);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, source: String) {
        self.source = source;
        let end = self.source.len();
        self.selection = end..end;
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(source: &str) -> EditorSession {
        EditorSession::new(source.to_string(), History::new(50))
    }

    #[test]
    fn test_wrap_selection() {
        let mut session = session("say hello world");
        session.select(4..9);
        session.insert_text("\\textbf{", "}");

        assert_eq!(session.source(), "say \\textbf{hello} world");
        assert_eq!(session.selected_text(), "hello");
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut session = session("ab");
        session.select(1..1);
        session.insert_math(MathKind::Inline);

        assert_eq!(session.source(), "a$$b");
        assert_eq!(session.selection(), 2..2);

        session.insert_text("x", "");
        assert_eq!(session.source(), "a$x$b");
    }

    #[test]
    fn test_display_math_wraps_selection() {
        let mut session = session("E = mc^2");
        session.select(0..8);
        session.insert_math(MathKind::Display);
        assert_eq!(session.source(), "\\[E = mc^2\\]");
    }

    #[test]
    fn test_insert_list_at_end() {
        let mut session = session("");
        session.insert_list(ListKind::Itemize);
        assert!(session.source().starts_with("\\begin{itemize}\n\\item First item"));
        assert!(session.source().ends_with("\\end{itemize}\n\n"));
    }

    #[test]
    fn test_insert_table_replaces_nothing() {
        let mut session = session("before");
        session.select(6..6);
        session.insert_table();
        assert_eq!(session.source(), format!("before{}", template::TABLE_SNIPPET));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut session = session("héllo");
        session.select(2..100);
        assert_eq!(session.selection(), 1..6);

        session.select(5..3);
        assert_eq!(session.selection(), 3..3);
    }

    #[test]
    fn test_undo_redo_through_edits() {
        let mut session = session("a");
        session.insert_text("b", "");
        session.load_template(Template::Letter);

        assert!(session.undo());
        assert_eq!(session.source(), "ab");
        assert!(session.undo());
        assert_eq!(session.source(), "a");
        assert!(!session.undo());

        assert!(session.redo());
        assert!(session.redo());
        assert!(session.source().starts_with("\\documentclass{letter}"));
        assert!(!session.redo());
    }

    #[test]
    fn test_edits_are_recorded() {
        let mut session = session("a");
        session.insert_text("b", "");
        session.insert_text("b", "");

        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history().current(), Some("abb"));
        assert_eq!(session.history().capacity(), 50);
    }

    #[test]
    fn test_external_edit_is_recorded() {
        let mut history = History::new(50);
        history.record("old");
        let mut session = EditorSession::new("new".to_string(), history);

        assert!(session.undo());
        assert_eq!(session.source(), "old");
    }
}
