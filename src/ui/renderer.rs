//! Top-level frame composition.
//!
//! Draw order, back to front:
//!
//! 1. background and completion shade
//! 2. the menu overlay if open, otherwise the active view
//! 3. title bar, menu button
//! 4. status bar
//!
//! The active view's first-frame flag is consumed here, so it is only
//! spent on a frame where that view is actually drawn.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::surface::Surface;
use crate::ui::view::ViewContext;

/// Renders one complete frame. Does not present it.
pub fn render(state: &mut AppState, surface: &mut dyn Surface, ctx: &ViewContext<'_>) {
    let layout = ctx.layout;
    components::render_background(surface, layout, ctx.theme);
    components::render_progress_shade(surface, layout, ctx.printer, ctx.theme);

    if state.menu_state.is_open() {
        state.menu.render(surface, ctx, false);
    } else {
        state.registry.render_active(surface, ctx);
    }

    components::render_title_bar(surface, layout, state.title(), ctx.theme);
    state.menu_button.draw(surface, ctx.theme);
    components::render_status_bar(surface, layout, ctx.printer, ctx.theme);
}
