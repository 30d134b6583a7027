//! Services that sit beside the core: notifications and logging

pub mod log_dirs;
pub mod notifier;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
