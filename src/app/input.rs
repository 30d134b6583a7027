//! Keyboard input for the terminal front-end

use super::{Command, Explorer, Focus};
use crate::view::listing::DirectoryListing;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Close the error popup
    Dismiss,
    /// A controller command
    Run(Command),
    /// Move focus to the next pane
    CycleFocus,
    TreeNext,
    TreePrev,
    TreePageUp,
    TreePageDown,
    TreeOpen,
    TreeClose,
    TreeActivate,
    TreeRefresh,
    AddressInsert(char),
    AddressBackspace,
    AddressDelete,
    AddressLeft,
    AddressRight,
    AddressHome,
    AddressEnd,
    /// Drop edits and go back to the tree
    AddressCancel,
    ListingUp,
    ListingDown,
    ListingPageUp,
    ListingPageDown,
}

/// Map a key press to an action.
///
/// `modal` is true while an error popup is shown; only dismissing it (or
/// quitting) is possible then.
pub fn map_key(key: KeyEvent, focus: Focus, modal: bool) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return Some(Action::Quit);
    }

    if modal {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::Dismiss),
            _ => None,
        };
    }

    // Toolbar shortcuts work from every pane
    match key.code {
        KeyCode::Left if alt => return Some(Action::Run(Command::Back)),
        KeyCode::Right if alt => return Some(Action::Run(Command::Forward)),
        KeyCode::Up if alt => return Some(Action::Run(Command::Up)),
        KeyCode::F(5) => return Some(Action::Run(Command::Refresh)),
        KeyCode::Char('l') if ctrl => return Some(Action::Run(Command::Focus(Focus::AddressBar))),
        KeyCode::F(4) => return Some(Action::Run(Command::Focus(Focus::AddressBar))),
        KeyCode::Tab => return Some(Action::CycleFocus),
        _ => {}
    }

    match focus {
        Focus::Tree => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::TreeNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::TreePrev),
            KeyCode::PageUp => Some(Action::TreePageUp),
            KeyCode::PageDown => Some(Action::TreePageDown),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::TreeOpen),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::TreeClose),
            KeyCode::Enter => Some(Action::TreeActivate),
            KeyCode::Char('r') if ctrl => Some(Action::TreeRefresh),
            KeyCode::Backspace => Some(Action::Run(Command::Up)),
            _ => None,
        },
        Focus::AddressBar => match key.code {
            KeyCode::Enter => Some(Action::Run(Command::SubmitAddress)),
            KeyCode::Esc => Some(Action::AddressCancel),
            KeyCode::Backspace => Some(Action::AddressBackspace),
            KeyCode::Delete => Some(Action::AddressDelete),
            KeyCode::Left => Some(Action::AddressLeft),
            KeyCode::Right => Some(Action::AddressRight),
            KeyCode::Home => Some(Action::AddressHome),
            KeyCode::End => Some(Action::AddressEnd),
            KeyCode::Char(c) if !ctrl => Some(Action::AddressInsert(c)),
            _ => None,
        },
        Focus::Listing => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ListingUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ListingDown),
            KeyCode::PageUp => Some(Action::ListingPageUp),
            KeyCode::PageDown => Some(Action::ListingPageDown),
            KeyCode::Backspace => Some(Action::Run(Command::Up)),
            KeyCode::Esc => Some(Action::Run(Command::Focus(Focus::Tree))),
            _ => None,
        },
    }
}

/// Apply a non-quit, non-dismiss action to the explorer
pub fn apply(explorer: &mut Explorer<DirectoryListing>, action: Action, page: usize) {
    let page = page.max(1);
    match action {
        Action::Quit | Action::Dismiss => {}
        Action::Run(command) => explorer.dispatch(command),
        Action::CycleFocus => {
            let next = match explorer.focus() {
                Focus::Tree => Focus::Listing,
                Focus::Listing => Focus::AddressBar,
                Focus::AddressBar => Focus::Tree,
            };
            explorer.dispatch(Command::Focus(next));
        }
        Action::TreeNext => explorer.tree_view_mut().select_next(),
        Action::TreePrev => explorer.tree_view_mut().select_prev(),
        Action::TreePageUp => explorer.tree_view_mut().select_page_up(),
        Action::TreePageDown => explorer.tree_view_mut().select_page_down(),
        Action::TreeOpen => explorer.tree_view_mut().open_selected(),
        Action::TreeClose => explorer.tree_view_mut().close_selected(),
        Action::TreeActivate => {
            if let Some(id) = explorer.tree_view().get_selected() {
                explorer.dispatch(Command::ActivateNode(id));
            }
        }
        Action::TreeRefresh => {
            if let Some(id) = explorer.tree_view().get_selected() {
                explorer.dispatch(Command::RefreshNode(id));
            }
        }
        Action::AddressInsert(c) => explorer.address_mut().insert(c),
        Action::AddressBackspace => explorer.address_mut().backspace(),
        Action::AddressDelete => explorer.address_mut().delete(),
        Action::AddressLeft => explorer.address_mut().move_left(),
        Action::AddressRight => explorer.address_mut().move_right(),
        Action::AddressHome => explorer.address_mut().move_home(),
        Action::AddressEnd => explorer.address_mut().move_end(),
        Action::AddressCancel => {
            explorer.address_mut().restore();
            explorer.dispatch(Command::Focus(Focus::Tree));
        }
        Action::ListingUp => explorer.renderer_mut().scroll_up(1),
        Action::ListingDown => explorer.renderer_mut().scroll_down(1),
        Action::ListingPageUp => explorer.renderer_mut().scroll_up(page),
        Action::ListingPageDown => explorer.renderer_mut().scroll_down(page),
    }
}
