//! Navigation back-stack engine.
//!
//! Each top-level destination (a tab) owns an independent [`BackStack`]. The
//! [`TopLevelRegistry`] tracks which tab is active and derives the single
//! effective stack the presentation layer renders.
//!
//! # Modules
//!
//! - [`back_stack`]: Non-empty history with push/pop/replace
//! - [`registry`]: Tab registry, effective-stack derivation and publication
//!
//! # Example
//!
//! ```rust
//! use contactbook::domain::{Destination, PersonId};
//! use contactbook::navigation::TopLevelRegistry;
//!
//! let mut registry = TopLevelRegistry::new(Destination::People);
//! registry.switch_top_level(Destination::Settings);
//! registry.push(Destination::About);
//! assert_eq!(registry.effective_stack().len(), 3);
//! ```

pub mod back_stack;
pub mod registry;

pub use back_stack::BackStack;
pub use registry::{NavigationSnapshot, PopOutcome, StackWatcher, TopLevelRegistry};
