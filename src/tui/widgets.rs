//! Widget rendering: page tabs, page bodies, notice bar, key hints.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::{AddField, DeckTui, Notice, Page, SearchField};

/// Main TUI layout rendering.
pub fn render(frame: &mut Frame, app: &DeckTui) {
    let [header_area, body_area, notice_area, hints_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header_area, app);

    match app.page {
        Page::Home => render_home(frame, body_area, app),
        Page::Add => render_add(frame, body_area, app),
        Page::Search => render_search(frame, body_area, app),
    }

    render_notice(frame, notice_area, app);
    render_hints(frame, hints_area, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &DeckTui) {
    let mut spans = vec![Span::styled(
        " docdeck ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for page in Page::ALL {
        spans.push(Span::raw(" "));
        if page == app.page {
            spans.push(Span::styled(
                format!("[{}]", page.title()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", page.title()),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    spans.push(Span::styled(
        format!(" :: {}", app.client.base_url()),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

fn render_home(frame: &mut Frame, area: Rect, app: &DeckTui) {
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(area);

    let lines: Vec<Line> = if app.home.documents.is_empty() {
        vec![Line::from(Span::styled(
            "No documents indexed yet.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.home
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| {
                let selected = i == app.home.selected;
                let marker = if selected { "> " } else { "  " };
                let id_style = if selected {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(doc.doc_id.clone(), id_style),
                    Span::styled(
                        format!(" · {} field(s)", doc.meta.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    // Keep the selection visible when the list outgrows the pane.
    let inner_height = list_area.height.saturating_sub(2) as usize;
    let offset = app
        .home
        .selected
        .saturating_sub(inner_height.saturating_sub(1)) as u16;

    let list = Paragraph::new(lines)
        .scroll((offset, 0))
        .block(Block::default().borders(Borders::ALL).title(" Indexed Documents "));
    frame.render_widget(list, list_area);

    let (title, body) = match app.home.documents.get(app.home.selected) {
        Some(doc) => (format!(" Document ID: {} ", doc.doc_id), pretty(doc)),
        None => (" Metadata ".to_string(), String::new()),
    };
    let detail = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(detail, detail_area);
}

// ---------------------------------------------------------------------------
// Add Document page
// ---------------------------------------------------------------------------

fn render_add(frame: &mut Frame, area: Rect, app: &DeckTui) {
    let [type_area, source_area, config_area, _] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_field(
        frame,
        type_area,
        " Document Type ",
        &format!("< {} >", app.add.doc_type),
        app.add.focus == AddField::DocType,
    );
    render_field(
        frame,
        source_area,
        " Source (URL for webpage, file path for PDF, or manual text) ",
        &app.add.source,
        app.add.focus == AddField::Source,
    );
    render_field(
        frame,
        config_area,
        " Configuration (JSON) ",
        &app.add.config,
        app.add.focus == AddField::Config,
    );
}

// ---------------------------------------------------------------------------
// Search page
// ---------------------------------------------------------------------------

fn render_search(frame: &mut Frame, area: Rect, app: &DeckTui) {
    let [query_area, topk_area, results_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_field(
        frame,
        query_area,
        " Search Query ",
        &app.search.query,
        app.search.focus == SearchField::Query,
    );
    render_field(
        frame,
        topk_area,
        " Number of Results (1-10) ",
        &format!("< {} >", app.search.top_k),
        app.search.focus == SearchField::TopK,
    );

    let mut lines: Vec<Line> = Vec::new();
    if app.search.results.is_empty() {
        lines.push(Line::from(Span::styled(
            "No results yet. Enter runs the search.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for (i, result) in app.search.results.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("Result {}:", i + 1),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            for text_line in pretty(result).lines() {
                lines.push(Line::from(Span::raw(text_line.to_string())));
            }
            lines.push(Line::default());
        }
    }

    let results = Paragraph::new(lines)
        .scroll((app.search.scroll as u16, 0))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(results, results_area);
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// A single bordered input row; the focused field gets a cyan frame and a
/// trailing cursor.
fn render_field(frame: &mut Frame, area: Rect, title: &str, text: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let content = if focused {
        format!("{text}_")
    } else {
        text.to_string()
    };

    let field = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title.to_string()),
    );
    frame.render_widget(field, area);
}

fn render_notice(frame: &mut Frame, area: Rect, app: &DeckTui) {
    let line = match &app.notice {
        Some(Notice::Success(text)) => Line::from(vec![
            Span::styled("[ok] ", Style::default().fg(Color::Green)),
            Span::raw(text.clone()),
        ]),
        Some(Notice::Error(text)) => Line::from(vec![
            Span::styled(
                "[error] ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(text.clone()),
        ]),
        Some(Notice::Info(text)) => Line::from(Span::styled(
            text.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame, area: Rect, app: &DeckTui) {
    let hints = match app.page {
        Page::Home => " Tab pages | Up/Down select | r reload | d delete | Esc quit",
        Page::Add => " Tab pages | Up/Down field | Left/Right type | Enter submit | Esc quit",
        Page::Search => {
            " Tab pages | Up/Down field | Left/Right top-k | Enter search | PgUp/PgDn scroll | Esc quit"
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}

/// Pretty-print a JSON-serializable value for display.
fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "<unrenderable>".to_string())
}
