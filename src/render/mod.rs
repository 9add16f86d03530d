pub mod context;
pub mod layout;
pub mod overlays;

pub use context::RenderContext;
pub use layout::{app_layout, centered_rect, table_with_sidebar, AppLayout};
