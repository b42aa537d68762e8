//! Stateless UI rendering for the memory board.

use super::app::App;
use super::layout::BoardLayout;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use strictly_memory::{CardState, CardView, Scheduler, WinSummary};

/// Renders the whole screen and returns where things were drawn.
pub fn draw<S: Scheduler>(frame: &mut Frame, app: &App<S>) -> BoardLayout {
    let layout = BoardLayout::compute(frame.area(), app.dimension());

    let title = Paragraph::new("Strictly Memory")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);

    let cards = app.cards();
    for (id, rect) in &layout.cells {
        if let Some(card) = cards.get(id.index()) {
            draw_card(frame, *rect, card, id.index() == app.cursor());
        }
    }

    let status = app.status();
    let status_text = Paragraph::new(vec![
        Line::from(format!("{}    {}", status.moves_label(), status.time_label())),
        Line::from(app.message().to_string()),
    ])
    .style(Style::default().fg(Color::Yellow))
    .alignment(Alignment::Center);
    frame.render_widget(status_text, layout.status);

    draw_start(frame, layout.start, app.start_enabled());

    if let Some(summary) = app.banner() {
        draw_banner(frame, layout.board, summary);
    }

    layout
}

fn draw_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let (label, base_style) = match card.state {
        CardState::Hidden => (String::new(), Style::default().fg(Color::DarkGray)),
        CardState::FaceUp => (
            card.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        CardState::Matched => (
            card.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            Style::default().fg(Color::Green),
        ),
    };

    let style = if selected {
        base_style.add_modifier(Modifier::REVERSED)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(paragraph, area);
}

fn draw_start(frame: &mut Frame, area: Rect, enabled: bool) {
    let style = if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new("Start")
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(button, area);
}

fn draw_banner(frame: &mut Frame, board: Rect, summary: WinSummary) {
    let width = 30.min(board.width);
    let height = 6.min(board.height);
    let area = Rect::new(
        board.x + board.width.saturating_sub(width) / 2,
        board.y + board.height.saturating_sub(height) / 2,
        width,
        height,
    );

    let text = vec![
        Line::from("You Won!"),
        Line::from(format!("with {} moves", summary.total_moves)),
        Line::from(format!("under {} seconds", summary.elapsed_seconds)),
    ];
    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(banner, area);
}
