//! Name-keyed registry of views with a single active entry.
//!
//! The registry owns every view for the lifetime of the panel. Exactly one
//! entry is active once anything has been registered; the first registered
//! view starts active. Each activation arms a one-shot first-frame flag that
//! the renderer consumes through [`ViewRegistry::take_first_frame`].

use super::surface::Surface;
use super::view::{View, ViewContext};
use crate::domain::error::{PanelError, Result};

/// A registered view with its unique name and menu label.
pub struct ViewDescriptor {
    pub name: String,
    pub label: String,
    view: Box<dyn View>,
}

impl std::fmt::Debug for ViewDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Holds the panel's views and tracks which one is active.
///
/// # Example
///
/// ```
/// use octopanel::app::{Action, InputEvent};
/// use octopanel::ui::{Surface, View, ViewContext, ViewRegistry};
///
/// struct Blank;
///
/// impl View for Blank {
///     fn handle_input(&mut self, _: &InputEvent, _: &ViewContext<'_>) -> Vec<Action> {
///         Vec::new()
///     }
///     fn render(&mut self, _: &mut dyn Surface, _: &ViewContext<'_>, _: bool) {}
/// }
///
/// let mut registry = ViewRegistry::new();
/// registry.register("dashboard", "Dashboard", Box::new(Blank))?;
/// registry.register("graph", "Temperature Graph", Box::new(Blank))?;
///
/// assert!(registry.take_first_frame());
/// assert!(!registry.take_first_frame());
///
/// assert!(!registry.select("missing"));
/// assert_eq!(registry.active_name(), Some("dashboard"));
///
/// assert!(registry.select("graph"));
/// assert!(registry.take_first_frame());
/// # Ok::<(), octopanel::PanelError>(())
/// ```
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: Vec<ViewDescriptor>,
    active: Option<usize>,
    first_frame: bool,
}

impl ViewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a view under a unique name.
    ///
    /// The first registered view becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::DuplicateView`] if `name` is already registered.
    pub fn register(&mut self, name: &str, label: &str, view: Box<dyn View>) -> Result<()> {
        if self.contains(name) {
            return Err(PanelError::DuplicateView(name.to_string()));
        }

        self.views.push(ViewDescriptor {
            name: name.to_string(),
            label: label.to_string(),
            view,
        });

        if self.active.is_none() {
            self.active = Some(0);
            self.first_frame = true;
        }
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.views.iter().any(|d| d.name == name)
    }

    /// Activates the view called `name`.
    ///
    /// Returns `false` and changes nothing if no such view exists. Selecting
    /// the already active view re-arms its first frame.
    pub fn select(&mut self, name: &str) -> bool {
        let Some(index) = self.views.iter().position(|d| d.name == name) else {
            tracing::debug!(view = name, "ignoring selection of unknown view");
            return false;
        };

        tracing::debug!(view = name, "view activated");
        self.active = Some(index);
        self.first_frame = true;
        true
    }

    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active_descriptor().map(|d| d.name.as_str())
    }

    #[must_use]
    pub fn active_label(&self) -> Option<&str> {
        self.active_descriptor().map(|d| d.label.as_str())
    }

    fn active_descriptor(&self) -> Option<&ViewDescriptor> {
        self.active.and_then(|i| self.views.get(i))
    }

    pub fn active_view_mut(&mut self) -> Option<&mut dyn View> {
        let index = self.active?;
        self.views.get_mut(index).map(|d| d.view.as_mut() as &mut dyn View)
    }

    /// Returns `true` exactly once per activation.
    pub fn take_first_frame(&mut self) -> bool {
        std::mem::take(&mut self.first_frame)
    }

    /// Renders the active view, consuming its first-frame flag.
    pub fn render_active(&mut self, surface: &mut dyn Surface, ctx: &ViewContext<'_>) {
        let first_frame = self.take_first_frame();
        if let Some(view) = self.active_view_mut() {
            view.render(surface, ctx, first_frame);
        }
    }

    /// `(name, label)` pairs in registration order, for the menu.
    #[must_use]
    pub fn menu_items(&self) -> Vec<(String, String)> {
        self.views
            .iter()
            .map(|d| (d.name.clone(), d.label.clone()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Action, InputEvent};

    struct Blank;

    impl View for Blank {
        fn handle_input(&mut self, _: &InputEvent, _: &ViewContext<'_>) -> Vec<Action> {
            Vec::new()
        }

        fn render(&mut self, _: &mut dyn Surface, _: &ViewContext<'_>, _: bool) {}
    }

    fn registry() -> ViewRegistry {
        let mut registry = ViewRegistry::new();
        registry.register("dashboard", "Dashboard", Box::new(Blank)).unwrap();
        registry.register("graph", "Temperature Graph", Box::new(Blank)).unwrap();
        registry
    }

    #[test]
    fn first_registered_view_is_active() {
        let mut registry = registry();
        assert_eq!(registry.active_name(), Some("dashboard"));
        assert_eq!(registry.active_label(), Some("Dashboard"));
        assert!(registry.take_first_frame());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = registry();
        let err = registry.register("graph", "Again", Box::new(Blank)).unwrap_err();
        assert!(matches!(err, PanelError::DuplicateView(name) if name == "graph"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn first_frame_once_per_activation() {
        let mut registry = registry();
        assert!(registry.take_first_frame());
        assert!(!registry.take_first_frame());

        assert!(registry.select("graph"));
        assert!(registry.take_first_frame());
        assert!(!registry.take_first_frame());

        assert!(registry.select("dashboard"));
        assert!(registry.take_first_frame());
        assert!(!registry.take_first_frame());
    }

    #[test]
    fn reselecting_active_view_rearms_first_frame() {
        let mut registry = registry();
        registry.take_first_frame();
        assert!(registry.select("dashboard"));
        assert!(registry.take_first_frame());
    }

    #[test]
    fn unknown_view_is_a_no_op() {
        let mut registry = registry();
        registry.take_first_frame();

        assert!(!registry.select("nope"));
        assert_eq!(registry.active_name(), Some("dashboard"));
        assert!(!registry.take_first_frame());
    }

    #[test]
    fn empty_registry_has_no_active_view() {
        let mut registry = ViewRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.active_name().is_none());
        assert!(registry.active_view_mut().is_none());
        assert!(!registry.take_first_frame());
    }

    #[test]
    fn menu_items_follow_registration_order() {
        let registry = registry();
        assert_eq!(
            registry.menu_items(),
            vec![
                ("dashboard".to_string(), "Dashboard".to_string()),
                ("graph".to_string(), "Temperature Graph".to_string()),
            ]
        );
    }
}
