// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::collections::VecDeque;

use super::event::{Event, Tag};

/// Regroups the separator events of a tabular into row and cell tags.
///
/// Rows are split at [`Event::RowBreak`] and cells at [`Event::CellBreak`].
/// Rules are dropped, and a row left with nothing but whitespace is skipped.
pub struct TableRows<'s, E> {
    events: E,
    pending: VecDeque<Event<'s>>,
}

impl<'s, E> TableRows<'s, E> {
    pub fn new(events: E) -> Self {
        Self {
            events,
            pending: VecDeque::new(),
        }
    }
}

impl<'s, E: Iterator<Item = Event<'s>>> TableRows<'s, E> {
    /// Collect events up to the `End(Table)` matching an already consumed start.
    fn table_body(&mut self) -> Vec<Event<'s>> {
        let mut body = vec![];
        let mut depth = 0;
        for e in self.events.by_ref() {
            match e {
                Event::Start(Tag::Table) => depth += 1,
                Event::End(Tag::Table) if depth == 0 => break,
                Event::End(Tag::Table) => depth -= 1,
                _ => (),
            }
            body.push(e);
        }
        body
    }
}

impl<'s, E: Iterator<Item = Event<'s>>> Iterator for TableRows<'s, E> {
    type Item = Event<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(e) = self.pending.pop_front() {
            return Some(e);
        }
        match self.events.next()? {
            Event::Start(Tag::Table) => {
                let body = self.table_body();
                layout_table(body, &mut self.pending);
                self.pending.pop_front()
            }
            e => Some(e),
        }
    }
}

fn layout_table<'s>(body: Vec<Event<'s>>, out: &mut VecDeque<Event<'s>>) {
    out.push_back(Event::Start(Tag::Table));
    for row in split_at(body, |e| *e == Event::RowBreak) {
        let row: Vec<Event<'s>> = row.into_iter().filter(|e| *e != Event::Rule).collect();
        if row.iter().all(Event::is_blank) {
            continue;
        }

        out.push_back(Event::Start(Tag::TableRow));
        for cell in split_at(row, |e| *e == Event::CellBreak) {
            out.push_back(Event::Start(Tag::TableCell));
            // cells may hold a nested tabular
            out.extend(TableRows::new(trim_cell(cell).into_iter()));
            out.push_back(Event::End(Tag::TableCell));
        }
        out.push_back(Event::End(Tag::TableRow));
    }
    out.push_back(Event::End(Tag::Table));
}

fn split_at<'s, F>(events: Vec<Event<'s>>, is_separator: F) -> Vec<Vec<Event<'s>>>
where
    F: Fn(&Event<'s>) -> bool,
{
    let mut parts = vec![vec![]];
    for e in events {
        if is_separator(&e) {
            parts.push(vec![]);
        } else if let Some(last) = parts.last_mut() {
            last.push(e);
        }
    }
    parts
}

/// Drop surrounding whitespace of a cell, whether it is a separate event or
/// the edge of a text run.
fn trim_cell(mut cell: Vec<Event<'_>>) -> Vec<Event<'_>> {
    while cell.first().is_some_and(Event::is_blank) {
        cell.remove(0);
    }
    while cell.last().is_some_and(Event::is_blank) {
        cell.pop();
    }
    if let Some(Event::Text(text)) = cell.first_mut() {
        *text = text.trim_start();
    }
    if let Some(Event::Text(text)) = cell.last_mut() {
        *text = text.trim_end();
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::scanner::Scanner;

    fn rows(source: &str) -> Vec<Event<'_>> {
        TableRows::new(Scanner::new(source)).collect()
    }

    #[test]
    fn test_rows_and_cells() {
        let source = "\\begin{tabular}{|c|c|}\n\\hline\n a & b \\\\\n\\hline\n c &  d\\\\\n\\hline\n\\end{tabular}";
        assert_eq!(
            rows(source),
            vec![
                Event::Start(Tag::Table),
                Event::Start(Tag::TableRow),
                Event::Start(Tag::TableCell),
                Event::Text("a"),
                Event::End(Tag::TableCell),
                Event::Start(Tag::TableCell),
                Event::Text("b"),
                Event::End(Tag::TableCell),
                Event::End(Tag::TableRow),
                Event::Start(Tag::TableRow),
                Event::Start(Tag::TableCell),
                Event::Text("c"),
                Event::End(Tag::TableCell),
                Event::Start(Tag::TableCell),
                Event::Text("d"),
                Event::End(Tag::TableCell),
                Event::End(Tag::TableRow),
                Event::End(Tag::Table),
            ]
        );
    }

    #[test]
    fn test_cell_keeps_formatting() {
        let events = rows("\\begin{tabular}{c} \\textbf{x} \\end{tabular}");
        assert_eq!(
            events[2..7],
            [
                Event::Start(Tag::TableCell),
                Event::Start(Tag::Strong),
                Event::Text("x"),
                Event::End(Tag::Strong),
                Event::End(Tag::TableCell),
            ]
        );
    }

    #[test]
    fn test_empty_cells_still_count() {
        let events = rows("\\begin{tabular}{cc} & \\\\ \\end{tabular}");
        let cells = events
            .iter()
            .filter(|e| **e == Event::Start(Tag::TableCell))
            .count();
        assert_eq!(cells, 2);
    }

    #[test]
    fn test_events_outside_tables_pass_through() {
        assert_eq!(rows("a & b"), vec![Event::Text("a & b")]);
    }
}
