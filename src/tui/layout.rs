use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::controller::{FrameBody, RenderFrame};
use crate::domain::SortMode;
use crate::render::card::{Badge, CardView};
use crate::tui::app::{InputMode, TuiApp};

pub fn render(frame: &mut Frame, view: &RenderFrame<'_>, app: &mut TuiApp, colors: &ColorConfig) {
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header stats
            Constraint::Length(3), // Search, pills, sort
            Constraint::Min(5),    // Topic list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0], colors);
    render_controls(frame, view, app, chunks[1], colors);
    render_body(frame, view, app, chunks[2], colors);
    render_status_bar(frame, view, app, chunks[3], colors);
}

fn render_header(frame: &mut Frame, view: &RenderFrame<'_>, area: Rect, colors: &ColorConfig) {
    let stat = |value: Option<&String>, label: &'static str| {
        vec![
            Span::styled(
                value.cloned().unwrap_or_else(|| "--".to_string()),
                Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}   ", label), Style::default().fg(colors.muted)),
        ]
    };
    let stats = view.stats.as_ref();

    let mut counters = Vec::new();
    counters.extend(stat(stats.map(|s| &s.screened), "screened"));
    counters.extend(stat(stats.map(|s| &s.topics), "topics"));
    counters.extend(stat(stats.map(|s| &s.trending), "trending"));
    counters.extend(stat(stats.map(|s| &s.new_policies), "new policies"));

    let lines = vec![
        Line::from(counters),
        Line::from(Span::styled(
            format!("Updated {}", view.last_updated),
            Style::default().fg(colors.muted),
        )),
    ];

    let block = Block::default()
        .title(" Trend Alert ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .style(Style::default().fg(colors.text)),
        area,
    );
}

fn render_controls(
    frame: &mut Frame,
    view: &RenderFrame<'_>,
    app: &TuiApp,
    area: Rect,
    colors: &ColorConfig,
) {
    let active = Style::default()
        .bg(colors.selection_bg)
        .fg(colors.selection_fg)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(colors.text);

    let mut spans = Vec::new();

    let search = if app.mode == InputMode::Search {
        format!("/{}_", app.search_buffer)
    } else if view.search_query.is_empty() {
        "/ search".to_string()
    } else {
        format!("/{}", view.search_query)
    };
    spans.push(Span::styled(
        search,
        if app.mode == InputMode::Search {
            Style::default().fg(colors.accent)
        } else {
            Style::default().fg(colors.muted)
        },
    ));
    spans.push(Span::raw("  "));

    for pill in view.pills {
        let label = match pill.count {
            Some(count) => format!(" {} {} ", pill.label, count),
            None => format!(" {} ", pill.label),
        };
        let style = if &pill.filter == view.active_filter {
            active
        } else {
            inactive
        };
        spans.push(Span::styled(label, style));
    }

    spans.push(Span::raw("  |  "));
    for mode in [SortMode::Trending, SortMode::Recent] {
        let style = if mode == view.sort { active } else { inactive };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn card_item<'a>(card: &CardView<'a>, colors: &ColorConfig) -> ListItem<'a> {
    let mut header: Vec<Span> = card
        .badges
        .iter()
        .map(|badge| {
            let color = match badge {
                Badge::Trending => colors.badge_trending,
                Badge::New => colors.badge_new,
                Badge::Type(_) => colors.badge_type,
            };
            Span::styled(format!("[{}] ", badge.label()), Style::default().fg(color))
        })
        .collect();
    header.push(Span::styled(
        card.label.to_string(),
        Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
    ));
    header.push(Span::styled(
        format!("  {} articles", card.article_count),
        Style::default().fg(colors.muted),
    ));

    let mut meta = vec![Span::styled(
        format!("  Latest: {}  ", card.latest),
        Style::default().fg(colors.muted),
    )];
    meta.extend(
        card.entities
            .iter()
            .map(|e| Span::styled(format!("#{} ", e), Style::default().fg(colors.entity))),
    );

    let mut lines = vec![Line::from(header), Line::from(meta)];

    if card.expanded {
        for article in card.visible_articles() {
            lines.push(Line::from(vec![
                Span::raw("    • "),
                Span::styled(article.title.to_string(), Style::default().fg(colors.link)),
                Span::styled(
                    format!("  {} · {}", article.source, article.date),
                    Style::default().fg(colors.muted),
                ),
            ]));
            if let Some(summary) = article.summary {
                lines.push(Line::from(Span::styled(
                    format!("      Why flagged: {}", summary),
                    Style::default().fg(colors.muted),
                )));
            }
        }
        if let Some(label) = card.show_more_label() {
            lines.push(Line::from(Span::styled(
                format!("    {}", label),
                Style::default().fg(colors.accent),
            )));
        }
    } else if !card.articles.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  ▸ View {} articles", card.article_count),
            Style::default().fg(colors.muted),
        )));
    }

    lines.push(Line::from(""));
    ListItem::new(Text::from(lines))
}

fn render_body(
    frame: &mut Frame,
    view: &RenderFrame<'_>,
    app: &mut TuiApp,
    area: Rect,
    colors: &ColorConfig,
) {
    let title = match view.body.load_more() {
        Some(remaining) => format!(" Topics ({} more) ", remaining),
        None => " Topics ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let message = |text: &str, color: Color| {
        Paragraph::new(text.to_string())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: false })
    };

    match &view.body {
        FrameBody::Loading => {
            frame.render_widget(message("Loading...", colors.muted).block(block), area)
        }
        FrameBody::Error(text) => frame.render_widget(
            message(&format!("⚠ {}", text), colors.error).block(block),
            area,
        ),
        FrameBody::Empty => frame.render_widget(
            message("No topics match your filters.", colors.muted).block(block),
            area,
        ),
        FrameBody::Cards { cards, .. } => {
            let items: Vec<ListItem> = cards.iter().map(|c| card_item(c, colors)).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

fn render_status_bar(
    frame: &mut Frame,
    view: &RenderFrame<'_>,
    app: &TuiApp,
    area: Rect,
    colors: &ColorConfig,
) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.mode == InputMode::Search {
        "Type to search  Enter:Done  Esc:Clear".to_string()
    } else if view.body.load_more().is_some() {
        "j/k:Nav  h/l:Filter  t/r:Sort  /:Search  Enter:Expand  m:More  o:Open  n:Load more  T:Theme  q:Quit"
            .to_string()
    } else {
        "j/k:Nav  h/l:Filter  t/r:Sort  /:Search  Enter:Expand  m:More  o:Open  T:Theme  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
