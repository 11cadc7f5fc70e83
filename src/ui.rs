//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! Layout, top to bottom: a header with the view tabs and network state,
//! the search bar (only while a query is active), the main pane, and a
//! one-line status bar.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode, View};
use crate::detail::ArticleDetail;
use crate::source::Article;

const BOOKMARK: &str = "★";

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let show_search = app.input_mode == InputMode::Search || app.is_searching();
    let [header_area, search_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(if show_search { 3 } else { 0 }),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(app, frame, header_area);
    if show_search {
        draw_search_bar(app, frame, search_area);
    }
    match app.view() {
        View::Headlines => draw_headlines(app, frame, main_area),
        View::ReadingList => draw_reading_list(app, frame, main_area),
        View::Detail => draw_detail(app, frame, main_area),
    }
    draw_status_bar(app, frame, status_area);
}

fn draw_header(app: &App, frame: &mut Frame, area: Rect) {
    let tab = |label: String, active: bool| {
        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {label} "), style)
    };

    let on_saved = app.view() == View::ReadingList;
    let network = match app.online {
        Some(true) => Span::styled("● online", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("● offline", Style::default().fg(Color::Red)),
        None => Span::styled("● checking", Style::default().fg(Color::DarkGray)),
    };

    let mut spans = vec![
        Span::styled(" newsdesk ", Style::default().add_modifier(Modifier::BOLD)),
        tab("Headlines".to_string(), !on_saved),
        Span::raw(" "),
        tab(format!("Reading list ({})", app.saved_articles().len()), on_saved),
        Span::raw("  "),
        network,
    ];
    if app.showing_cache {
        spans.push(Span::styled("  (cached)", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Search;
    let mut text = vec![Span::raw(app.query())];
    if editing {
        text.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
    }
    let border = if editing { Color::Cyan } else { Color::DarkGray };
    let bar = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(format!(" Search ({} matches) ", app.visible_count()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(bar, area);
}

/// One list row: date, bookmark marker, title, source.
///
/// Rows own their text so the list does not hold a borrow of [`App`] while
/// its selection state is borrowed mutably for rendering.
fn article_row(article: &Article, saved: bool) -> ListItem<'static> {
    let date_str = article
        .published()
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "no date".into());

    let line = Line::from(vec![
        Span::styled(format!("{date_str:<17}"), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(
            if saved { BOOKMARK } else { " " },
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" "),
        Span::styled(
            article.title.clone().unwrap_or_else(|| "(untitled)".into()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", article.source_id.as_deref().unwrap_or("?")),
            Style::default().fg(Color::Cyan),
        ),
    ]);

    ListItem::new(line)
}

fn styled_list(items: Vec<ListItem<'static>>, title: String) -> List<'static> {
    List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ")
}

fn draw_headlines(app: &mut App, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem<'static>> = app
        .visible_articles()
        .map(|a| article_row(a, app.is_bookmarked(a)))
        .collect();

    let title = if app.new_headlines {
        " Headlines · new headlines above, press g ".to_string()
    } else {
        " Headlines ".to_string()
    };

    if items.is_empty() {
        let hint = if app.is_searching() {
            "No headlines match the search."
        } else if app.loading {
            "Loading headlines…"
        } else {
            "No headlines yet. Press r to refresh."
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let list = styled_list(items, title);
    frame.render_stateful_widget(list, area, &mut app.headlines_state);
}

fn draw_reading_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = " Reading list ".to_string();
    if app.saved_articles().is_empty() {
        let empty = Paragraph::new("Your reading list is empty. Press b on a headline to save it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'static>> = app
        .saved_articles()
        .iter()
        .map(|a| article_row(a, true))
        .collect();
    let list = styled_list(items, title);
    frame.render_stateful_widget(list, area, &mut app.reading_state);
}

fn draw_detail(app: &App, frame: &mut Frame, area: Rect) {
    let Some(article) = app.detail() else {
        return;
    };
    let detail = ArticleDetail::new(article);
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![Span::styled("By        ", label), Span::raw(detail.creator())]),
        Line::from(vec![Span::styled("Published ", label), Span::raw(detail.published())]),
        Line::from(vec![Span::styled("Source    ", label), Span::raw(detail.source())]),
    ];
    if let Some(link) = detail.link() {
        lines.push(Line::from(vec![
            Span::styled("Link      ", label),
            Span::styled(link, Style::default().fg(Color::Blue)),
        ]));
    }
    if let Some(image) = detail.image_url() {
        lines.push(Line::from(vec![
            Span::styled("Image     ", label),
            Span::raw(image.to_string()),
        ]));
    }
    lines.push(Line::raw(""));
    let body = detail
        .content()
        .unwrap_or("No content available for this article.");
    lines.extend(body.lines().map(Line::raw));

    let marker = if app.is_bookmarked(article) {
        format!(" Article {BOOKMARK} ")
    } else {
        " Article ".to_string()
    };
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(marker).borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let count = match app.view() {
        View::ReadingList => format!("{} saved", app.saved_articles().len()),
        _ if app.is_searching() => {
            format!("{}/{} items", app.visible_count(), app.articles().len())
        }
        _ => format!("{} items", app.visible_count()),
    };
    let help = match (app.input_mode, app.view()) {
        (InputMode::Search, _) => "type to filter  Enter: keep  Esc: clear",
        (_, View::Detail) => "Esc: back  ↑/↓: scroll  b: save",
        (_, View::ReadingList) => "q: quit  Tab: headlines  Enter: open  d: remove",
        (_, View::Headlines) => "q: quit  ↑/↓: scroll  Enter: open  b: save  /: search  Tab: saved  r: refresh",
    };

    let mut spans = vec![Span::raw(" ")];
    if app.loading {
        spans.push(Span::styled("⟳ ", Style::default().fg(Color::Cyan)));
    }
    spans.extend([
        Span::styled(app.status.as_str(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(count, Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::raw(help),
    ]);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
