//! Terminal drawing
//!
//! Screen layout, top to bottom: toolbar with the navigation buttons and the
//! address bar, the tree and contents panes side by side, the status bar.
//! An error popup is drawn over everything while a notification is pending.

pub mod file_explorer;
pub mod listing;

use crate::app::{Explorer, Focus};
use crate::services::notifier::Notification;
use crate::view::listing::DirectoryListing;
use file_explorer::FileExplorerRenderer;
use listing::ListingRenderer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draw the whole explorer
pub fn draw(
    frame: &mut Frame,
    explorer: &mut Explorer<DirectoryListing>,
    tree_width_percent: u16,
    notification: Option<&Notification>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_toolbar(frame, explorer, rows[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(tree_width_percent),
            Constraint::Percentage(100u16.saturating_sub(tree_width_percent)),
        ])
        .split(rows[1]);

    let focus = explorer.focus();
    FileExplorerRenderer::render(
        explorer.tree_view_mut(),
        frame,
        panes[0],
        focus == Focus::Tree,
    );
    ListingRenderer::render(explorer.renderer(), frame, panes[1], focus == Focus::Listing);

    draw_status_bar(frame, explorer, rows[2]);

    if let Some(notification) = notification {
        draw_notification(frame, notification);
    }
}

fn draw_toolbar(frame: &mut Frame, explorer: &Explorer<DirectoryListing>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(10)])
        .split(area);

    let button = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(label, style)
    };

    let has_location = explorer.current_location().is_some();
    let buttons = Paragraph::new(Line::from(vec![
        button(" ◀ ", explorer.can_go_back()),
        button(" ▶ ", explorer.can_go_forward()),
        button(" ▲ ", has_location),
        button(" ⟳ ", has_location),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(buttons, columns[0]);

    let focused = explorer.focus() == Focus::AddressBar;
    let address = explorer.address();
    let address_widget = Paragraph::new(address.text()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Address ")
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(address_widget, columns[1]);

    if focused {
        let prefix: String = address.text().chars().take(address.cursor).collect();
        let x = (columns[1].x + 1).saturating_add(text_width(&prefix));
        let max_x = columns[1].right().saturating_sub(2);
        frame.set_cursor_position(Position::new(x.min(max_x), columns[1].y + 1));
    }
}

fn draw_status_bar(frame: &mut Frame, explorer: &Explorer<DirectoryListing>, area: Rect) {
    let status = Paragraph::new(format!(" {}", explorer.status_text()))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status, area);
}

fn draw_notification(frame: &mut Frame, notification: &Notification) {
    let area = centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(vec![
        Line::from(notification.message.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "[ OK ]",
            Style::default().add_modifier(Modifier::REVERSED),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", notification.title))
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(popup, area);
}

/// A rectangle `percent_x` wide and `height` tall in the middle of `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Terminal columns taken by `text`
fn text_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}
