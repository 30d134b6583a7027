//! Location navigation: address resolution and back/forward history

pub mod history;
pub mod navigator;

pub use history::History;
pub use navigator::Navigator;
