use crate::model::filesystem::DirEntry;
use crate::view::listing::DirectoryListing;
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use std::time::SystemTime;

/// Draws the directory contents pane
pub struct ListingRenderer;

impl ListingRenderer {
    pub fn render(listing: &DirectoryListing, frame: &mut Frame, area: Rect, is_focused: bool) {
        let title = format!(" {} ", listing.location().unwrap_or_default());

        let rows: Vec<Row> = listing
            .entries()
            .iter()
            .skip(listing.scroll_offset())
            .map(Self::render_entry)
            .collect();

        let header = Row::new(vec!["Name", "Date modified", "Size"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(if is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                }),
        );

        frame.render_widget(table, area);
    }

    fn render_entry(entry: &DirEntry) -> Row<'static> {
        let (icon, style) = if entry.is_dir() {
            ("📁 ", Style::default().fg(Color::Cyan))
        } else {
            ("📄 ", Style::default().fg(Color::White))
        };

        let modified = entry.modified.map(Self::format_modified).unwrap_or_default();
        let size = match (entry.is_file(), entry.size) {
            (true, Some(size)) => Self::format_size(size),
            _ => String::new(),
        };

        Row::new(vec![
            Cell::from(format!("{icon}{}", entry.name)).style(style),
            Cell::from(modified).style(Style::default().fg(Color::DarkGray)),
            Cell::from(size).style(Style::default().fg(Color::DarkGray)),
        ])
    }

    /// Local time, minute resolution
    fn format_modified(time: SystemTime) -> String {
        DateTime::<Local>::from(time).format("%Y-%m-%d %H:%M").to_string()
    }

    /// Format file size for display
    fn format_size(size: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if size >= GB {
            format!("{:.2} GB", size as f64 / GB as f64)
        } else if size >= MB {
            format!("{:.2} MB", size as f64 / MB as f64)
        } else if size >= KB {
            format!("{:.2} KB", size as f64 / KB as f64)
        } else {
            format!("{} B", size)
        }
    }
}
