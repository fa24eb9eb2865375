//! User interface layer: views, chrome and drawing backends.
//!
//! Views draw through the abstract [`Surface`]; the concrete backend is chosen
//! by the binary. Every frame is composed from scratch:
//!
//! ```text
//! AppState + PrinterState snapshot → render → Surface draw calls → present
//! ```
//!
//! # Modules
//!
//! - [`surface`]: drawing primitives, the [`Surface`] trait, [`RecordingSurface`]
//! - [`terminal`]: [`TerminalSurface`], a 24-bit ANSI character-grid backend
//! - [`view`]: the [`View`] capability set, [`ViewContext`], [`Layout`]
//! - [`registry`]: [`ViewRegistry`], name-keyed views with one active entry
//! - [`views`]: the built-in screens and the menu overlay
//! - [`components`]: title bar, status bar, completion shade
//! - [`widgets`]: the touch [`Button`]
//! - [`theme`]: colour schemes loaded from TOML
//! - [`renderer`]: frame composition

pub mod components;
pub mod helpers;
pub mod registry;
pub mod renderer;
pub mod surface;
pub mod terminal;
pub mod theme;
pub mod view;
pub mod views;
pub mod widgets;

pub use registry::{ViewDescriptor, ViewRegistry};
pub use renderer::render;
pub use surface::{Color, DrawCall, Point, Rect, RecordingSurface, Surface, TextSize};
pub use terminal::TerminalSurface;
pub use theme::Theme;
pub use view::{Layout, View, ViewContext};
pub use widgets::Button;
