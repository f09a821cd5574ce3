//! # switchyard-core
//!
//! Core traits for the Switchyard controller dispatch layer.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! controller crates and framework adapters that don't need the full
//! `switchyard-std` implementation.
//!
//! # Capability Surfaces
//!
//! Switchyard never requires a controller or a response to implement more
//! than it needs. Every optional operation is exposed through a probe that
//! returns `Option<&mut dyn Trait>` and defaults to `None`:
//!
//! ## Controller ([`Controller`])
//!
//! - [`Controller::request_receiver`] - accepts the current request
//! - [`Controller::response_receiver`] - accepts and holds the current response
//! - [`Controller::initializer`] - runs once context is wired, before the action
//!
//! ## Response ([`DispatchResponse`])
//!
//! - [`DispatchResponse::recorder`] - records which controller and action
//!   produced the response, for introspection in tests
//!
//! A controller that exposes none of these still dispatches; the probes are
//! simply skipped.
//!
//! # Naming
//!
//! [`derive_controller_name`] turns `app::controller::admin::ArticlesController`
//! into `articles`. Types that don't carry the `Controller` suffix are
//! rejected with [`DispatchError::NamingConventionViolation`].
//!
//! # Error Types
//!
//! - [`DispatchError`] - every failure the dispatch layer can report
//! - [`BoxError`] - opaque errors raised by action bodies

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod args;
mod controller;
mod error;
mod metadata;
mod naming;

// Re-exports
pub use args::{FromRouteValue, RouteArgs, RouteValue};
pub use controller::{Controller, Initialize, ReceiveRequest, ReceiveResponse};
pub use error::{BoxError, DispatchError};
pub use metadata::{DispatchMetadata, DispatchRecorder, DispatchResponse, DispatchState};
pub use naming::{ControllerIdentity, derive_controller_name};
