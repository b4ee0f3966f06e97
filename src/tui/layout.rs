//! Single-screen layout.
//!
//! ```text
//!  Rollcall ─ 默认主题                            55 students   title
//! ┌──────────────────────────────────────────────────────────┐
//! │                          王子墨                          │  display area
//! └──────────────────────────────────────────────────────────┘
//! ────────────────────────────────────────────────────────────
//!  孙雨欣  韩馨雨 [杜艺嘉乐] 李致远  董洁 ...                    student cards
//! ────────────────────────────────────────────────────────────
//! ┌────────────────────────────┐┌────────────────────────────┐
//! │        ▶ Start (s)         ││         ■ Stop (x)         │  buttons
//! └────────────────────────────┘└────────────────────────────┘
//!  themes: 1 默认主题 2 海洋   last: 王子墨   space:roll ...      footer
//! ```
//!
//! Every color comes from the applier's assignments through
//! [`palette`](super::palette). Nothing here touches engine state.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::theme::{Property, Target};

use super::app::{DisplayCue, TuiApp};
use super::palette::color_or;

/// Resolve a theme value painted over `under`. Transparent or unknown
/// values let `under` show through.
fn layered(value: Option<&str>, under: Color) -> Color {
    match value.map(|v| color_or(v, under)) {
        Some(Color::Reset) | None => under,
        Some(c) => c,
    }
}

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &TuiApp) {
    let a = app.applier.assignments();
    let page_bg = layered(a.get(Target::Body, Property::BackgroundImage), Color::Reset);
    let container_bg = layered(a.get(Target::Container, Property::BackgroundColor), page_bg);
    let text = layered(a.get(Target::DisplayArea, Property::Color), Color::Reset);

    f.render_widget(
        Block::default().style(Style::default().bg(container_bg)),
        f.area(),
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(5), // display area
            Constraint::Min(3),    // student cards
            Constraint::Length(3), // buttons
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    draw_title(f, app, outer[0], text);
    draw_display(f, app, outer[1], container_bg);
    draw_cards(f, app, outer[2]);
    draw_buttons(f, app, outer[3], container_bg);
    draw_footer(f, app, outer[4], text);
}

fn draw_title(f: &mut Frame, app: &TuiApp, area: Rect, text: Color) {
    let title = Line::from(vec![
        Span::styled(" Rollcall ", Style::default().fg(text).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("─ {} ", app.applier.current().theme_name),
            Style::default().fg(text),
        ),
    ]);
    let count = Line::from(Span::styled(
        format!("{} students ", app.engine.roster().len()),
        Style::default().fg(text),
    ))
    .alignment(Alignment::Right);
    f.render_widget(Paragraph::new(title), area);
    f.render_widget(Paragraph::new(count), area);
}

fn draw_display(f: &mut Frame, app: &TuiApp, area: Rect, under: Color) {
    let a = app.applier.assignments();
    let bg = layered(a.get(Target::DisplayArea, Property::Background), under);
    let border = layered(a.get(Target::DisplayArea, Property::BorderColor), Color::DarkGray);
    let fg = layered(a.get(Target::DisplayArea, Property::Color), Color::Reset);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
    match app.display.cue {
        DisplayCue::Flash => style = style.add_modifier(Modifier::ITALIC),
        DisplayCue::Pulse => style = style.add_modifier(Modifier::SLOW_BLINK),
        DisplayCue::None => {}
    }

    // Vertically center the single headline row.
    if inner.height > 0 {
        let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        let para = Paragraph::new(Span::styled(app.display.headline.as_str(), style))
            .alignment(Alignment::Center);
        f.render_widget(para, row);
    }
}

/// Flow the roster into rows of `width` cells, one span per card. Also
/// returns the row holding the selected card.
pub fn card_lines(app: &TuiApp, width: u16) -> (Vec<Line<'static>>, Option<usize>) {
    let styles = app
        .applier
        .card_styles(app.engine.roster().len(), app.display.highlighted);
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;
    let mut selected_row = None;

    for (name, card) in app.engine.roster().iter().zip(styles) {
        let fg = layered(Some(card.color.as_str()), Color::Reset);
        let bg = layered(Some(card.background.as_str()), Color::Reset);
        let mut style = Style::default().fg(fg).bg(bg);
        let label = if card.selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            format!("[{name}]")
        } else {
            format!(" {name} ")
        };
        let span = Span::styled(label, style);
        let span_width = span.width() + 1;
        if used > 0 && used + span_width > width as usize {
            lines.push(Line::from(std::mem::take(&mut current)));
            used = 0;
        }
        if card.selected {
            selected_row = Some(lines.len());
        }
        used += span_width;
        current.push(span);
        current.push(Span::raw(" "));
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    (lines, selected_row)
}

fn draw_cards(f: &mut Frame, app: &TuiApp, area: Rect) {
    let border = layered(
        app.applier
            .assignments()
            .get(Target::StudentCard, Property::BorderColor),
        Color::DarkGray,
    );
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.engine.roster().is_empty() {
        f.render_widget(
            Paragraph::new("No students on the roster.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let (lines, selected_row) = card_lines(app, inner.width);
    // Keep the highlighted card on screen.
    let scroll = selected_row
        .map(|row| (row as u16).saturating_sub(inner.height.saturating_sub(1)))
        .unwrap_or(0);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn draw_buttons(f: &mut Frame, app: &TuiApp, area: Rect, under: Color) {
    let a = app.applier.assignments();
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let rolling = app.engine.is_rolling();
    let buttons = [
        (
            " ▶ Start (s) ",
            a.get(Target::StartButton, Property::Background),
            !rolling,
        ),
        (
            " ■ Stop (x) ",
            a.get(Target::StopButton, Property::Background),
            rolling,
        ),
    ];

    for ((label, bg, enabled), slot) in buttons.into_iter().zip(halves.iter()) {
        let bg = layered(bg, under);
        let style = if enabled {
            Style::default()
                .fg(Color::White)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).bg(bg).add_modifier(Modifier::DIM)
        };
        let para = Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(para, *slot);
    }
}

fn draw_footer(f: &mut Frame, app: &TuiApp, area: Rect, text: Color) {
    let bg = layered(
        app.applier
            .assignments()
            .get(Target::Footer, Property::BackgroundColor),
        Color::Reset,
    );

    let mut spans = vec![Span::styled(" themes:", Style::default().fg(Color::DarkGray))];
    for (i, theme) in app.list_themes().iter().enumerate().take(9) {
        let style = if i == app.theme_index {
            Style::default().fg(text).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(text)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!("{} {}", i + 1, theme.theme_name), style));
    }

    if let Some(last) = app.display.history.back() {
        spans.push(Span::styled("   last: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(last.clone(), Style::default().fg(text).add_modifier(Modifier::BOLD)));
    }
    spans.push(Span::styled(
        "   space:roll t:theme q:quit",
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}
