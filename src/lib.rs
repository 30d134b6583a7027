// File explorer library - exposes all core modules for testing

pub mod app;
pub mod config;
pub mod model;
pub mod nav;
pub mod services;
pub mod view;

#[cfg(feature = "runtime")]
pub mod ui;
