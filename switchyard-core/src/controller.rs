//! # Controllers and their optional capabilities
//!
//! A [`Controller`] groups related actions. The dispatch layer builds a fresh
//! instance for every invocation from the application handle, wires the
//! current request and response into it, runs its init hook and hands
//! control to the action.
//!
//! Each of those steps is opt-in. A controller advertises a capability by
//! overriding the matching probe:
//!
//! ```rust,ignore
//! impl Controller for ArticlesController {
//!     type App = Application;
//!     type Request = Request;
//!     type Response = Response;
//!     type Output = Response;
//!
//!     fn create(app: &Arc<Application>) -> Self {
//!         Self { app: Arc::clone(app), carrier: ContextCarrier::new() }
//!     }
//!
//!     fn request_receiver(&mut self) -> Option<&mut dyn ReceiveRequest<Request>> {
//!         Some(&mut self.carrier)
//!     }
//!
//!     fn response_receiver(&mut self) -> Option<&mut dyn ReceiveResponse<Response>> {
//!         Some(&mut self.carrier)
//!     }
//! }
//! ```
//!
//! Controllers that keep no per-request state simply leave the probes alone.

use crate::{error::DispatchError, metadata::DispatchResponse};
use std::sync::Arc;

/// Accepts the request of the current invocation.
pub trait ReceiveRequest<Req> {
    /// Store the request, replacing any previous one.
    fn receive_request(&mut self, request: Req);
}

/// Accepts and holds the response of the current invocation.
pub trait ReceiveResponse<Res> {
    /// Store the response, replacing any previous one.
    fn receive_response(&mut self, response: Res);

    /// The response currently held, if any.
    fn current_response(&mut self) -> Option<&mut Res>;

    /// Remove and return the response currently held.
    fn take_response(&mut self) -> Option<Res>;
}

/// Initialization hook run after context injection and before the action.
pub trait Initialize {
    /// Prepare the controller for the current invocation.
    fn init(&mut self) -> Result<(), DispatchError>;
}

/// A unit grouping related actions.
///
/// # Lifecycle
///
/// One instance is created per invocation through [`Controller::create`], so
/// an instance never serves two in-flight requests.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Switchyard controller",
    label = "missing `Controller` implementation",
    note = "Controllers declare their request, response and output types and how they are created."
)]
pub trait Controller: Sized + Send + 'static {
    /// The application handle controllers are constructed from.
    type App: Send + Sync + 'static;
    /// The request type supplied by the router.
    type Request: Send + 'static;
    /// The response type supplied by the router.
    type Response: DispatchResponse;
    /// What actions return to the router, usually the response.
    type Output: Send + 'static;

    /// Build an instance for one invocation.
    fn create(app: &Arc<Self::App>) -> Self;

    /// The fully-qualified type name the controller is recorded under.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Capability probe for request injection.
    fn request_receiver(&mut self) -> Option<&mut dyn ReceiveRequest<Self::Request>> {
        None
    }

    /// Capability probe for response injection.
    fn response_receiver(&mut self) -> Option<&mut dyn ReceiveResponse<Self::Response>> {
        None
    }

    /// Capability probe for the init hook.
    fn initializer(&mut self) -> Option<&mut dyn Initialize> {
        None
    }
}
