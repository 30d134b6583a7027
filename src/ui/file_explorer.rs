use crate::model::filesystem::DriveKind;
use crate::view::file_tree::{FileTreeView, NodeIcon, NodeId};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Draws the directory tree pane
pub struct FileExplorerRenderer;

impl FileExplorerRenderer {
    /// Render the tree in the given frame area
    pub fn render(view: &mut FileTreeView, frame: &mut Frame, area: Rect, is_focused: bool) {
        // Borders take two rows
        view.set_viewport_height(area.height.saturating_sub(2) as usize);

        let display_nodes = view.get_display_nodes();
        let scroll_offset = view.get_scroll_offset();
        let selected_index = view.get_selected_index();

        let items: Vec<ListItem> = display_nodes
            .iter()
            .skip(scroll_offset)
            .filter_map(|&(node_id, indent)| Self::render_node(view, node_id, indent))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Folders ")
                    .border_style(if is_focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default()
                    }),
            )
            .highlight_style(if is_focused {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default().bg(Color::DarkGray)
            });

        let mut list_state = ListState::default();
        if let Some(selected) = selected_index {
            list_state.select(selected.checked_sub(scroll_offset));
        }

        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_node(view: &FileTreeView, node_id: NodeId, indent: usize) -> Option<ListItem<'static>> {
        let node = view.tree().get_node(node_id)?;

        let mut spans = Vec::new();

        if indent > 0 {
            spans.push(Span::raw("  ".repeat(indent)));
        }

        let indicator = match (node.has_expander(), node.is_open) {
            (true, true) => "▼ ",
            (true, false) => "▶ ",
            (false, _) => "  ",
        };
        spans.push(Span::styled(indicator, Style::default().fg(Color::Yellow)));

        let icon = node.icon();
        spans.push(Span::styled(Self::get_icon(icon), Self::get_icon_color(icon)));
        spans.push(Span::styled(
            node.label.clone(),
            Style::default().fg(Color::Cyan),
        ));

        Some(ListItem::new(Line::from(spans)))
    }

    /// Icon for a node class
    fn get_icon(icon: NodeIcon) -> &'static str {
        match icon {
            NodeIcon::Locked => "🔒 ",
            NodeIcon::Folder => "📁 ",
            NodeIcon::Drive(kind) => match kind {
                DriveKind::Fixed => "🖴  ",
                DriveKind::Removable => "💾 ",
                DriveKind::Network => "🌐 ",
                DriveKind::CdRom => "💿 ",
                DriveKind::Ram => "⚡ ",
                DriveKind::Unknown | DriveKind::NoRootDirectory => "❔ ",
            },
        }
    }

    fn get_icon_color(icon: NodeIcon) -> Style {
        match icon {
            NodeIcon::Locked => Style::default().fg(Color::Red),
            NodeIcon::Folder => Style::default().fg(Color::Blue),
            NodeIcon::Drive(_) => Style::default().fg(Color::White),
        }
    }
}
