//! # switchyard-std
//!
//! Standard implementations for the Switchyard controller dispatch layer.
//!
//! This crate provides:
//! - **Action tables**: [`ActionTable`], [`ActionTableBuilder`]
//! - **Dispatch**: [`Dispatcher`], [`Handler`], the per-request [`Dispatch`] context
//!   and forwarding between actions
//! - **Context carrier**: [`ContextCarrier`] for controllers that keep the
//!   current request and response
//! - **HTTP collaborators**: [`http::Request`], [`http::Response`]
//! - **Application handle**: [`app::Application`], [`app::Container`], [`app::ViewRenderer`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use switchyard_core;

// Modules
pub mod app;
pub mod context;
pub mod dispatch;
pub mod http;
pub mod table;
pub mod testing;

pub use context::ContextCarrier;
pub use dispatch::{Actions, Dispatch, Dispatcher, Handler};
pub use table::{ActionFn, ActionFuture, ActionTable, ActionTableBuilder};
