//! Page-based TUI for the document backend.
//!
//! Three pages mirror the backend operations: Home (browse + delete),
//! Add Document (index), and Search. Every user action is a single
//! blocking HTTP round trip on the UI thread; a failed action changes
//! nothing but the notice bar.

pub mod widgets;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use miette::IntoDiagnostic;
use serde_json::Value;

use crate::client::BackendClient;
use crate::model::{DocType, DocumentRecord, default_index_config};

/// Search result count bounds, enforced by the top-k spinner.
pub const TOP_K_MIN: usize = 1;
pub const TOP_K_MAX: usize = 10;
const TOP_K_DEFAULT: usize = 5;

/// Which page is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Add,
    Search,
}

impl Page {
    /// Tab title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Add => "Add Document",
            Self::Search => "Search",
        }
    }

    /// All pages, in tab order.
    pub const ALL: [Page; 3] = [Self::Home, Self::Add, Self::Search];

    /// Next page in tab order, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Home => Self::Add,
            Self::Add => Self::Search,
            Self::Search => Self::Home,
        }
    }
}

/// Feedback from the last action, shown in the notice bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
}

/// Form focus on the Add page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    DocType,
    Source,
    Config,
}

impl AddField {
    fn next(self) -> Self {
        match self {
            Self::DocType => Self::Source,
            Self::Source => Self::Config,
            Self::Config => Self::DocType,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::DocType => Self::Config,
            Self::Source => Self::DocType,
            Self::Config => Self::Source,
        }
    }
}

/// Form focus on the Search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Query,
    TopK,
}

/// Home page: the fetched catalog and the selection cursor.
struct HomeState {
    documents: Vec<DocumentRecord>,
    selected: usize,
}

/// Add page form.
struct AddState {
    doc_type: DocType,
    source: String,
    config: String,
    focus: AddField,
}

/// Search page form and last results.
struct SearchState {
    query: String,
    top_k: usize,
    results: Vec<Value>,
    focus: SearchField,
    scroll: usize,
}

/// TUI application state.
pub struct DeckTui {
    client: BackendClient,
    page: Page,
    home: HomeState,
    add: AddState,
    search: SearchState,
    notice: Option<Notice>,
    should_quit: bool,
}

impl DeckTui {
    pub fn new(client: BackendClient) -> Self {
        let config_text = serde_json::to_string(&default_index_config())
            .unwrap_or_else(|_| "{}".to_string());
        let notice = Some(Notice::Info(format!(
            "Connected to {}. Tab switches pages, Esc quits.",
            client.base_url()
        )));

        Self {
            client,
            page: Page::Home,
            home: HomeState {
                documents: Vec::new(),
                selected: 0,
            },
            add: AddState {
                doc_type: DocType::Pdf,
                source: String::new(),
                config: config_text,
                focus: AddField::DocType,
            },
            search: SearchState {
                query: String::new(),
                top_k: TOP_K_DEFAULT,
                results: Vec::new(),
                focus: SearchField::Query,
                scroll: 0,
            },
            notice,
            should_quit: false,
        }
    }

    /// Run the TUI event loop.
    pub fn run(&mut self) -> miette::Result<()> {
        let mut terminal = ratatui::init();

        self.reload_documents();

        loop {
            terminal
                .draw(|frame| widgets::render(frame, self))
                .into_diagnostic()?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100)).into_diagnostic()? {
                if let Event::Key(key) = event::read().into_diagnostic()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }

        ratatui::restore();
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.page = self.page.next();
                // Entering Home re-fetches so the catalog is current.
                if self.page == Page::Home {
                    self.reload_documents();
                }
                return;
            }
            _ => {}
        }

        match self.page {
            Page::Home => self.handle_home_key(code),
            Page::Add => self.handle_add_key(code),
            Page::Search => self.handle_search_key(code),
        }
    }

    fn handle_home_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                self.home.selected = self.home.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if !self.home.documents.is_empty() {
                    self.home.selected =
                        (self.home.selected + 1).min(self.home.documents.len() - 1);
                }
            }
            KeyCode::Char('r') => {
                if self.reload_documents() {
                    self.notice = Some(Notice::Info(format!(
                        "{} document(s).",
                        self.home.documents.len()
                    )));
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            _ => {}
        }
    }

    fn handle_add_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.add.focus = self.add.focus.prev(),
            KeyCode::Down => self.add.focus = self.add.focus.next(),
            KeyCode::Enter => self.submit_add(),
            KeyCode::Left if self.add.focus == AddField::DocType => {
                self.add.doc_type = self.add.doc_type.prev();
            }
            KeyCode::Right if self.add.focus == AddField::DocType => {
                self.add.doc_type = self.add.doc_type.next();
            }
            KeyCode::Char(c) => match self.add.focus {
                AddField::Source => self.add.source.push(c),
                AddField::Config => self.add.config.push(c),
                AddField::DocType => {}
            },
            KeyCode::Backspace => match self.add.focus {
                AddField::Source => {
                    self.add.source.pop();
                }
                AddField::Config => {
                    self.add.config.pop();
                }
                AddField::DocType => {}
            },
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.search.focus = SearchField::Query,
            KeyCode::Down => self.search.focus = SearchField::TopK,
            KeyCode::Enter => self.submit_search(),
            KeyCode::Left if self.search.focus == SearchField::TopK => {
                self.search.top_k = self.search.top_k.saturating_sub(1).max(TOP_K_MIN);
            }
            KeyCode::Right if self.search.focus == SearchField::TopK => {
                self.search.top_k = (self.search.top_k + 1).min(TOP_K_MAX);
            }
            KeyCode::Char(c) if self.search.focus == SearchField::Query => {
                self.search.query.push(c);
            }
            KeyCode::Backspace if self.search.focus == SearchField::Query => {
                self.search.query.pop();
            }
            KeyCode::PageUp => self.search.scroll = self.search.scroll.saturating_sub(10),
            KeyCode::PageDown => self.search.scroll += 10,
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Actions — one HTTP round trip each
    // -----------------------------------------------------------------------

    /// Fetch the document list. On failure the previously displayed list
    /// stays as it was.
    fn reload_documents(&mut self) -> bool {
        match self.client.list_documents() {
            Ok(docs) => {
                self.home.selected = self.home.selected.min(docs.len().saturating_sub(1));
                self.home.documents = docs;
                true
            }
            Err(e) => {
                self.notice = Some(Notice::Error(e.to_string()));
                false
            }
        }
    }

    /// Delete the selected document, then re-fetch the list.
    fn delete_selected(&mut self) {
        let Some(doc) = self.home.documents.get(self.home.selected) else {
            self.notice = Some(Notice::Info("Nothing to delete.".to_string()));
            return;
        };

        match self.client.delete_document(&doc.doc_id) {
            Ok(resp) => match resp.get("doc_id").and_then(Value::as_str) {
                Some(id) => {
                    self.notice = Some(Notice::Success(format!("Deleted: {id}")));
                    // A reload failure replaces the notice, which is right:
                    // the displayed list may now be stale.
                    self.reload_documents();
                }
                None => {
                    self.notice = Some(Notice::Error(format!(
                        "backend response missing doc_id: {resp}"
                    )));
                }
            },
            Err(e) => self.notice = Some(Notice::Error(e.to_string())),
        }
    }

    /// Parse the config field and index the document.
    fn submit_add(&mut self) {
        // The config text is parsed here, before the client is involved; a
        // syntax error never turns into an HTTP request.
        let config: Value = match serde_json::from_str(&self.add.config) {
            Ok(v) => v,
            Err(e) => {
                self.notice = Some(Notice::Error(format!("invalid config JSON: {e}")));
                return;
            }
        };

        match self
            .client
            .index_document(self.add.doc_type, &self.add.source, config)
        {
            Ok(resp) => match resp.get("doc_id").and_then(Value::as_str) {
                Some(id) => {
                    self.notice = Some(Notice::Success(format!("Document indexed: {id}")));
                }
                None => {
                    self.notice = Some(Notice::Error(format!(
                        "backend response missing doc_id: {resp}"
                    )));
                }
            },
            Err(e) => self.notice = Some(Notice::Error(e.to_string())),
        }
    }

    /// Run the search. On failure the previous results stay displayed.
    fn submit_search(&mut self) {
        match self
            .client
            .search_documents(&self.search.query, self.search.top_k)
        {
            Ok(resp) => match resp.get("results").and_then(Value::as_array) {
                Some(results) => {
                    self.notice = Some(Notice::Info(format!("{} result(s).", results.len())));
                    self.search.results = results.clone();
                    self.search.scroll = 0;
                }
                None => {
                    self.notice = Some(Notice::Error(format!(
                        "backend response missing results: {resp}"
                    )));
                }
            },
            Err(e) => self.notice = Some(Notice::Error(e.to_string())),
        }
    }
}

/// Launch the TUI against the configured backend.
pub fn launch(client: BackendClient) -> miette::Result<()> {
    let mut tui = DeckTui::new(client);
    tui.run()
}
