//! The panel's screens.
//!
//! Each module implements [`View`](crate::ui::View) for one screen. The menu
//! overlay is a view as well but is owned by
//! [`AppState`](crate::app::AppState) rather than the registry.

mod control;
mod dashboard;
mod files;
mod graph;
mod menu;
mod settings;

pub use control::ControlView;
pub use dashboard::DashboardView;
pub use files::FilesView;
pub use graph::GraphView;
pub use menu::MenuView;
pub use settings::SettingsView;

use super::registry::ViewRegistry;
use super::view::Layout;
use crate::domain::error::Result;
use crate::Config;

pub const DASHBOARD: &str = "dashboard";
pub const GRAPH: &str = "graph";
pub const CONTROL: &str = "control";
pub const FILES: &str = "files";
pub const SETTINGS: &str = "settings";

/// Height of one list row in the menu and the file list.
pub(crate) const ROW_HEIGHT: u32 = 40;

/// Registers every built-in view in menu order.
///
/// # Errors
///
/// Returns [`PanelError::DuplicateView`](crate::PanelError::DuplicateView) if
/// two views share a name.
pub fn default_registry(config: &Config, layout: Layout) -> Result<ViewRegistry> {
    let mut registry = ViewRegistry::new();
    registry.register(DASHBOARD, "Dashboard", Box::new(DashboardView::new(layout)))?;
    registry.register(GRAPH, "Temperature Graph", Box::new(GraphView::new(layout)))?;
    registry.register(CONTROL, "Control", Box::new(ControlView::new(layout, config.jog_amount)))?;
    registry.register(FILES, "Files", Box::new(FilesView::new(layout)))?;
    registry.register(
        SETTINGS,
        "Settings",
        Box::new(SettingsView::new(layout, config.hotend_preheat, config.bed_preheat)),
    )?;
    Ok(registry)
}

/// Index of the list row under `y`, or `None` outside the content area.
pub(crate) fn row_at(layout: Layout, y: i32) -> Option<usize> {
    let content = layout.content();
    if y < content.y || y >= content.bottom() {
        return None;
    }
    usize::try_from((y - content.y) / super::view::to_i32(ROW_HEIGHT)).ok()
}

/// Number of whole list rows that fit in the content area.
pub(crate) fn rows_per_page(layout: Layout) -> usize {
    usize::try_from(layout.content().h / ROW_HEIGHT).unwrap_or(0).max(1)
}
