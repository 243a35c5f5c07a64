use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{EventKind, EventOutcome};
use tui_dispatch_components::centered_rect;

use crate::action::Action;
use crate::state::{AppState, Card, FilterKey, Mode};

const BG_BASE: Color = Color::Rgb(24, 26, 36);
const BG_PANEL: Color = Color::Rgb(34, 38, 58);
const TEXT_MAIN: Color = Color::Rgb(228, 230, 238);
const TEXT_DIM: Color = Color::Rgb(160, 166, 186);
const ACCENT: Color = Color::Rgb(120, 162, 222);
const HIGHLIGHT_BG: Color = ACCENT;
const HIGHLIGHT_TEXT: Color = Color::Rgb(16, 18, 26);
const ERROR_FG: Color = Color::Rgb(240, 120, 120);

const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 4;

/// Card tint per creature type.
fn type_color(type_name: &str) -> Color {
    match type_name {
        "fire" => Color::Rgb(255, 107, 107),
        "water" => Color::Rgb(78, 205, 196),
        "grass" => Color::Rgb(81, 207, 102),
        "electric" => Color::Rgb(255, 212, 59),
        "psychic" => Color::Rgb(229, 153, 247),
        "ice" => Color::Rgb(116, 192, 252),
        "dragon" => Color::Rgb(132, 94, 247),
        "dark" => Color::Rgb(73, 80, 87),
        "fighting" => Color::Rgb(240, 140, 0),
        "poison" => Color::Rgb(190, 75, 219),
        "ground" => Color::Rgb(245, 159, 0),
        "flying" => Color::Rgb(145, 167, 255),
        "bug" => Color::Rgb(140, 233, 154),
        "rock" => Color::Rgb(134, 142, 150),
        "ghost" => Color::Rgb(151, 117, 250),
        "steel" => Color::Rgb(173, 181, 189),
        "normal" => Color::Rgb(206, 212, 218),
        _ => Color::Rgb(99, 114, 105),
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(area);

    render_filter_bar(frame, chunks[0], state);
    render_search_bar(frame, chunks[1], state);
    render_body(frame, chunks[2], state);
    render_footer(frame, chunks[3], state);
}

fn render_filter_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(Span::styled(
        " PokeVerse ",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));

    let mut spans = vec![Span::raw(" ")];
    for (index, key) in FilterKey::ALL.iter().enumerate() {
        let active = state.filter == Some(*key) && state.mode != Mode::Searching;
        let style = if active {
            Style::default()
                .fg(HIGHLIGHT_TEXT)
                .bg(HIGHLIGHT_BG)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        spans.push(Span::styled(format!("{index}:{} ", key.label()), style));
    }

    frame.render_widget(Paragraph::new(vec![title, Line::from(spans)]), area);
}

fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let (content, style) = if state.search.active {
        (
            format!("{}█", state.search.query),
            Style::default().fg(TEXT_MAIN),
        )
    } else if state.mode == Mode::Searching {
        (state.search.query.clone(), Style::default().fg(TEXT_DIM))
    } else {
        (
            "press / to search by name or id".to_string(),
            Style::default().fg(TEXT_DIM),
        )
    };

    let border_style = if state.search.active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    let block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(content).style(style).block(block), area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.loading {
        render_loader(frame, area, state);
        return;
    }

    if state.cards.is_empty() {
        let hint = match state.mode {
            Mode::Searching => "no result",
            _ => "Pick a filter (0-9) or search (/) to load the catalog.",
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(TEXT_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inset(area, 1, area.height / 3));
        return;
    }

    let show_detail = state.selected_record().is_some() && area.width > CARD_WIDTH * 2;
    let (grid_area, detail_area) = if show_detail {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(CARD_WIDTH), Constraint::Length(32)])
            .split(area);
        (halves[0], Some(halves[1]))
    } else {
        (area, None)
    };

    render_card_grid(frame, grid_area, state);
    if let Some(detail_area) = detail_area {
        render_detail_panel(frame, detail_area, state);
    }
}

fn render_loader(frame: &mut Frame, area: Rect, state: &AppState) {
    let dots = ".".repeat((state.tick % 4) as usize);
    let boxed = centered_rect(24, 3, area);
    frame.render_widget(Clear, boxed);
    let paragraph = Paragraph::new(format!("Loading{dots}"))
        .style(Style::default().fg(ACCENT))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT)),
        );
    frame.render_widget(paragraph, boxed);
}

fn render_card_grid(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = (area.width / CARD_WIDTH).max(1);
    for (index, card) in state.cards.iter().enumerate() {
        let col = index as u16 % columns;
        let row = index as u16 / columns;
        let y = area.y + row * CARD_HEIGHT;
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        let cell = Rect {
            x: area.x + col * CARD_WIDTH,
            y,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT,
        };
        render_card(frame, cell, card, index == state.selected_card);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, selected: bool) {
    let border_style = if selected {
        Style::default().fg(HIGHLIGHT_BG).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(Style::default().bg(BG_PANEL));

    let lines = match card {
        Card::Minimal(record) => vec![
            Line::from(Span::styled(
                format!("#{:03} {}", record.id, record.name),
                Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {} ", record.primary_type),
                Style::default()
                    .fg(HIGHLIGHT_TEXT)
                    .bg(type_color(&record.primary_type)),
            )),
        ],
        Card::Error(input) => vec![
            Line::from(Span::styled(
                "not found",
                Style::default().fg(ERROR_FG).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                input.clone(),
                Style::default().fg(TEXT_DIM),
            )),
        ],
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_detail_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(record) = state.selected_record() else {
        return;
    };
    let block = Block::default()
        .title(format!(" #{:03} {} ", record.id, record.name))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(type_color(&record.primary_type)))
        .style(Style::default().bg(BG_PANEL));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("type  ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                format!(" {} ", record.primary_type),
                Style::default()
                    .fg(HIGHLIGHT_TEXT)
                    .bg(type_color(&record.primary_type)),
            ),
        ]),
        Line::from(vec![
            Span::styled("image ", Style::default().fg(TEXT_DIM)),
            Span::styled(record.image_url.clone(), Style::default().fg(TEXT_MAIN)),
        ]),
        Line::default(),
    ];
    for stat in record.stats.iter().take(6) {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", stat.name), Style::default().fg(TEXT_DIM)),
            Span::styled(stat.value.to_string(), Style::default().fg(TEXT_MAIN)),
        ]));
    }
    if !record.moves.is_empty() {
        lines.push(Line::default());
        let preview: Vec<&str> = record.moves.iter().take(4).map(String::as_str).collect();
        lines.push(Line::from(Span::styled(
            format!("moves: {}", preview.join(", ")),
            Style::default().fg(TEXT_DIM),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    // Pagination is a browse-mode affordance; search shows a single result.
    if state.mode != Mode::Searching && state.pager.total_items() > 0 {
        let info = state.pager.page_info();
        let nav_style = |enabled: bool| {
            if enabled {
                Style::default().fg(TEXT_MAIN)
            } else {
                Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
            }
        };
        let line = Line::from(vec![
            Span::styled(" ◀ prev ", nav_style(info.has_previous)),
            Span::styled(
                format!(" page {}/{} · {} items ", info.current_page, info.total_pages, info.total_items),
                Style::default().fg(ACCENT),
            ),
            Span::styled(" next ▶ ", nav_style(info.has_next)),
        ]);
        frame.render_widget(Paragraph::new(line), rows[0]);
    }

    let status = match &state.message {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(ERROR_FG),
        )),
        None => Line::from(Span::styled(
            " 0-9 filter · / search · ←/→ pages · ↑/↓ select · esc clear · q quit",
            Style::default().fg(TEXT_DIM),
        )),
    };
    frame.render_widget(Paragraph::new(status), rows[1]);
}

fn inset(area: Rect, dx: u16, dy: u16) -> Rect {
    Rect {
        x: area.x + dx.min(area.width / 2),
        y: area.y + dy.min(area.height.saturating_sub(1)),
        width: area.width.saturating_sub(dx * 2),
        height: area.height.saturating_sub(dy).max(1),
    }
}

pub fn handle_event(event: &EventKind, state: &AppState) -> EventOutcome<Action> {
    match event {
        EventKind::Resize(width, height) => {
            EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render()
        }
        EventKind::Key(key) => match key_action(*key, state) {
            Some(action) => EventOutcome::action(action),
            None => EventOutcome::ignored(),
        },
        _ => EventOutcome::ignored(),
    }
}

/// Keymap. While the search input is open it captures every character.
pub fn key_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    if state.search.active {
        return match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::SearchStart),
        KeyCode::Esc => Some(Action::SearchCancel),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PagePrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::PageNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectionMove(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectionMove(1)),
        KeyCode::Tab => {
            let next = state.filter.map(|key| key.next()).unwrap_or(FilterKey::All);
            Some(Action::FilterSelect(next))
        }
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            let index = ch as usize - '0' as usize;
            FilterKey::ALL.get(index).map(|filter| Action::FilterSelect(*filter))
        }
        _ => None,
    }
}
