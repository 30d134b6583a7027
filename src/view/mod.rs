//! View layer
//!
//! UI-independent state behind each pane: the directory tree, the contents
//! listing, the address bar and the status text.

pub mod address_bar;
pub mod file_tree;
pub mod listing;
pub mod status;
