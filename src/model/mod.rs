//! Core data model
//!
//! Host capabilities (filesystem, environment) and the location string
//! rules shared by every other layer.

pub mod environment;
pub mod filesystem;
pub mod location;
pub mod memory_fs;
