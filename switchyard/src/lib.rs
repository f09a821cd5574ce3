//! # switchyard - Controller-Action Dispatch
//!
//! `switchyard` lets controller types serve as route handlers. Given a
//! controller and an action name it produces a handler the router invokes
//! with `(request, response, args)`. Each call builds a fresh controller,
//! injects the request and response into it, runs its init hook, records
//! which controller and action handled the request, and runs the action.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use switchyard::prelude::*;
//! use switchyard::http::{Request, Response};
//! use std::sync::Arc;
//!
//! struct ArticlesController {
//!     carrier: ContextCarrier<Request, Response>,
//! }
//!
//! impl Controller for ArticlesController {
//!     type App = Application;
//!     type Request = Request;
//!     type Response = Response;
//!     type Output = Response;
//!
//!     fn create(_app: &Arc<Application>) -> Self {
//!         Self { carrier: ContextCarrier::new() }
//!     }
//!
//!     fn response_receiver(&mut self) -> Option<&mut dyn ReceiveResponse<Response>> {
//!         Some(&mut self.carrier)
//!     }
//! }
//!
//! #[switchyard::actions]
//! impl ArticlesController {
//!     async fn show(cx: &mut Dispatch<Self>, id: i64) -> Result<Response, DispatchError> {
//!         let mut response = cx.take_response().unwrap_or_default();
//!         response.write(&format!("article {id}"));
//!         Ok(response)
//!     }
//!
//!     async fn legacy(cx: &mut Dispatch<Self>, id: i64) -> Result<Response, DispatchError> {
//!         cx.forward("show", route_args![id]).await
//!     }
//! }
//!
//! let dispatcher = Dispatcher::<ArticlesController>::new(Arc::new(Application::new()))?;
//! let show = dispatcher.handler("show")?;
//! let response = show.call(request, Response::new(), route_args![5]).await?;
//! assert_eq!(response.action_name(), Some("show"));
//! ```
//!
//! ## Features
//!
//! - `macros` (default): the `#[actions]` attribute
//! - `tracing`: a `dispatch` span per invocation plus debug events
//! - `tower`: `tower::HandlerService`, a `tower::Service` over a handler

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use switchyard_core::{
    // Errors
    BoxError,
    // Controller capabilities
    Controller,
    ControllerIdentity,
    DispatchError,
    // Introspection
    DispatchMetadata,
    DispatchRecorder,
    DispatchResponse,
    DispatchState,
    // Route arguments
    FromRouteValue,
    Initialize,
    ReceiveRequest,
    ReceiveResponse,
    RouteArgs,
    RouteValue,
    // Naming
    derive_controller_name,
    route_args,
};

// Dispatch
pub use switchyard_std::{
    ActionFn, ActionFuture, ActionTable, ActionTableBuilder, Actions, ContextCarrier, Dispatch,
    Dispatcher, Handler,
};

/// Request and response types.
pub mod http {
    pub use switchyard_std::http::{Request, Response};
}

/// Application handle, service container and view rendering.
pub mod app {
    pub use switchyard_std::app::{Application, Container, ViewRenderer, ViewVars};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use switchyard_std::testing::*;
}

#[cfg(feature = "tower")]
pub mod tower;

/// Prelude module - common imports for Switchyard.
///
/// # Usage
///
/// ```rust,ignore
/// use switchyard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::{
        // Dispatch
        ActionFuture,
        Actions,
        // Context
        ContextCarrier,
        // Core traits
        Controller,
        Dispatch,
        // Errors
        DispatchError,
        Dispatcher,
        Initialize,
        ReceiveRequest,
        ReceiveResponse,
        RouteArgs,
        route_args,
    };
}

#[cfg(feature = "macros")]
pub use switchyard_macros::actions;
