//! Core page abstraction for the UI page system.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::core::{Action, PageEvent, PageId, TouchEvent};

/// Trait that full-screen pages implement.
///
/// The [`DisplayManager`](crate::display_manager::DisplayManager) calls
/// these in a fixed order:
///
/// 1. **`on_activate`**: when the screen becomes visible.
/// 2. **`on_event`**: for each incoming event.
/// 3. **`handle_touch`**: when a touch event targets this page.
/// 4. **`draw_page`**: when `is_dirty()` is true.
/// 5. **`on_deactivate`**: when the screen is hidden.
pub trait Page {
    /// Unique identifier used for lookup and logging.
    fn id(&self) -> PageId;

    /// Human-readable title, drawn in the page header.
    fn title(&self) -> &str;

    /// Called when this page becomes visible.
    fn on_activate(&mut self) {}

    /// Called when this page is hidden.
    fn on_deactivate(&mut self) {}

    /// Process a touch event and optionally return an [`Action`] for the
    /// page to apply.
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Apply an action produced by this page's widgets (or an external
    /// input such as a keyboard shortcut).
    ///
    /// Returns `true` if the page state changed.
    fn apply_action(&mut self, action: Action) -> bool;

    /// Handle an incoming [`PageEvent`].
    ///
    /// Returns `true` if the event changed the page and it needs a redraw.
    fn on_event(&mut self, _event: &PageEvent) -> bool {
        false
    }

    /// Render the entire page to the given display target.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page needs redrawing.
    fn is_dirty(&self) -> bool;

    /// Clear the dirty flag after a successful draw.
    fn mark_clean(&mut self);

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}
