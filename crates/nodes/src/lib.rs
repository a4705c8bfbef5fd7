//! `nodes` crate — the `NodeHandler` trait, node taxonomy, built-in
//! handlers, and the `(type, category)` registry.
//!
//! Every handler — built-in and externally registered alike — implements
//! [`NodeHandler`]. The engine crate dispatches execution through this
//! trait object via [`HandlerRegistry`], so new node kinds plug in without
//! touching the engine's core loop.

pub mod action;
pub mod condition;
pub mod error;
pub mod mock;
pub mod registry;
pub mod traits;
pub mod transform;
pub mod trigger;
pub mod types;

pub use error::HandlerError;
pub use registry::HandlerRegistry;
pub use traits::{Config, NodeHandler};
pub use types::NodeType;
