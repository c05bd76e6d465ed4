// Copyright (c) 2025 Texpad Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    cli::{read_document, write_document},
    config, environment,
    session::EditorSession,
    storage::Storage,
    template::{ListKind, MathKind, Template},
};

/// A document opened together with its persisted history.
pub struct EditState {
    document: Utf8PathBuf,
    key: String,
    storage: Storage,
    pub session: EditorSession,
}

impl EditState {
    pub fn open(document: &Utf8Path) -> eyre::Result<EditState> {
        let source = read_document(document)?;
        Self::with_source(document, source)
    }

    pub fn with_source(document: &Utf8Path, source: String) -> eyre::Result<EditState> {
        let key = environment::document_key(document);
        let mut storage = Storage::load(&environment::storage_path())?;
        let history = storage.take_history(&key, environment::history_capacity());
        Ok(EditState {
            document: document.to_owned(),
            key,
            storage,
            session: EditorSession::new(source, history),
        })
    }

    /// Write the document and its history back.
    pub fn save(self) -> eyre::Result<()> {
        let EditState {
            document,
            key,
            mut storage,
            session,
        } = self;
        write_document(&document, session.source())?;
        storage.put_history(key, session.into_history());
        storage.save(&environment::storage_path())
    }
}

#[derive(clap::Args)]
pub struct InsertCommand {
    /// Path to the document (e.g., "paper.tex").
    #[arg(required = true)]
    document: Utf8PathBuf,

    #[command(subcommand)]
    snippet: Snippet,

    /// Start of the selection as a byte offset, defaults to the end of the document.
    #[arg(short, long, global = true)]
    start: Option<usize>,

    /// End of the selection as a byte offset, defaults to the start.
    #[arg(short, long, global = true)]
    end: Option<usize>,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, global = true, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    config: String,
}

#[derive(clap::Subcommand)]
pub enum Snippet {
    /// Surround the selection with the given text.
    #[command(visible_alias = "w")]
    Wrap {
        before: String,

        #[arg(default_value = "")]
        after: String,
    },

    /// Insert a list with three items.
    #[command(visible_alias = "l")]
    List {
        #[arg(value_enum, default_value = "itemize")]
        kind: ListKind,
    },

    /// Insert a 3x3 table with caption.
    #[command(visible_alias = "t")]
    Table,

    /// Surround the selection with math delimiters.
    #[command(visible_alias = "m")]
    Math {
        #[arg(value_enum, default_value = "inline")]
        kind: MathKind,
    },

    /// Replace the whole document with a template.
    Template {
        #[arg(value_enum)]
        template: Template,
    },
}

pub fn insert(command: &InsertCommand) -> eyre::Result<()> {
    environment::init_environment(command.config.as_str().into())?;

    let mut state = EditState::open(&command.document)?;
    let session = &mut state.session;
    let start = command.start.unwrap_or(session.source().len());
    let end = command.end.unwrap_or(start);
    session.select(start..end);

    match &command.snippet {
        Snippet::Wrap { before, after } => session.insert_text(before, after),
        Snippet::List { kind } => session.insert_list(*kind),
        Snippet::Table => session.insert_table(),
        Snippet::Math { kind } => session.insert_math(*kind),
        Snippet::Template { template } => session.load_template(*template),
    }

    let selection = session.selection();
    let selected = session.selected_text().to_string();
    state.save()?;
    println!(
        "Updated {} (selection {}..{})",
        command.document, selection.start, selection.end
    );
    if !selected.is_empty() {
        println!("Selected: {}", selected);
    }
    Ok(())
}

#[derive(clap::Args)]
pub struct HistoryCommand {
    /// Path to the document (e.g., "paper.tex").
    #[arg(required = true)]
    document: Utf8PathBuf,

    /// Number of steps.
    #[arg(short = 'n', long, default_value_t = 1)]
    steps: usize,

    /// Path to the configuration file (e.g., "Texpad.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    config: String,
}

pub fn undo(command: &HistoryCommand) -> eyre::Result<()> {
    step_history(command, "undo", EditorSession::undo)
}

pub fn redo(command: &HistoryCommand) -> eyre::Result<()> {
    step_history(command, "redo", EditorSession::redo)
}

fn step_history<F>(command: &HistoryCommand, name: &str, step: F) -> eyre::Result<()>
where
    F: Fn(&mut EditorSession) -> bool,
{
    environment::init_environment(command.config.as_str().into())?;

    let mut state = EditState::open(&command.document)?;
    let taken = (0..command.steps)
        .take_while(|_| step(&mut state.session))
        .count();
    let history = state.session.history();
    let (kept, capacity) = (history.len(), history.capacity());
    state.save()?;

    if taken < command.steps {
        color_print::ceprintln!(
            "<y>Warning: Nothing more to {} after {} step(s).</>",
            name,
            taken
        );
    }
    if taken > 0 {
        println!("Applied {} {} step(s) to {}", taken, name, command.document);
    }
    println!("History: {} of {} snapshot(s) kept", kept, capacity);
    Ok(())
}
