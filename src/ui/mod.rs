//! Presentation layer: view models, plain-text rendering and notification
//! timing.
//!
//! # Architecture
//!
//! ```text
//! AppState → compute_viewmodel → ScreenViewModel → render → lines
//!                 EventChannel → NotificationPresenter → Event::NotificationDismissed
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready screen state
//! - [`renderer`]: Line-oriented renderer
//! - [`presenter`]: Auto-dismissal of shown notifications
//! - [`helpers`]: Highlighting and column fitting

pub mod helpers;
pub mod presenter;
pub mod renderer;
pub mod viewmodel;

pub use presenter::NotificationPresenter;
pub use renderer::{render, render_viewmodel};
pub use viewmodel::{
    EmptyState, FieldRow, FooterInfo, NotificationView, PersonDetailView, PersonRow,
    ScreenContent, ScreenViewModel, SearchBarInfo, TabItem,
};
