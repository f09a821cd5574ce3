//! Error types for Switchyard.
//!
//! Everything the dispatch layer can fail with is a [`DispatchError`]. The
//! layer does no recovery of its own: errors propagate to the router that
//! invoked the handler, which decides how to turn them into HTTP responses.
//!
//! Absence of an optional capability is never an error.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while dispatching a controller action.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The action name does not resolve to a registered action.
    #[error("action `{action}` not found on controller `{controller}`")]
    MethodNotFound {
        /// Fully-qualified controller type name.
        controller: String,
        /// The action that was requested.
        action: String,
    },

    /// The controller type name does not end with the `Controller` suffix.
    #[error("controller type `{type_name}` does not follow the `<Name>Controller` convention")]
    NamingConventionViolation {
        /// The offending type name.
        type_name: String,
    },

    /// An operation was attempted outside the state it requires.
    #[error("invalid dispatch state: {0}")]
    InvalidState(String),

    /// Two actions were registered under the same name.
    #[error("action `{0}` is already registered")]
    DuplicateAction(String),

    /// The action expected a route argument that the router did not supply.
    #[error("missing route argument at position {index}")]
    MissingArgument {
        /// Zero-based position of the argument.
        index: usize,
    },

    /// A route argument could not be converted to the type the action expects.
    #[error("route argument at position {index} is not a valid {expected}: `{found}`")]
    InvalidArgument {
        /// Zero-based position of the argument.
        index: usize,
        /// Name of the expected type.
        expected: &'static str,
        /// The value that was supplied.
        found: String,
    },

    /// No service is registered under the requested name.
    #[error("no service registered under `{0}`")]
    ServiceNotFound(String),

    /// A service exists under the name but has a different type.
    #[error("service `{name}` is not a `{expected}`")]
    ServiceType {
        /// The service name.
        name: String,
        /// The requested type.
        expected: &'static str,
    },

    /// The view renderer failed.
    #[error("render error: {0}")]
    Render(#[source] BoxError),

    /// An action body or init hook failed.
    #[error(transparent)]
    Action(BoxError),
}

impl DispatchError {
    /// Wrap an arbitrary error raised by an action.
    pub fn action(err: impl Into<BoxError>) -> Self {
        DispatchError::Action(err.into())
    }

    /// Build an [`DispatchError::InvalidState`] from a message.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        DispatchError::InvalidState(message.into())
    }

    /// Build a [`DispatchError::MethodNotFound`].
    pub fn method_not_found(controller: impl Into<String>, action: impl Into<String>) -> Self {
        DispatchError::MethodNotFound {
            controller: controller.into(),
            action: action.into(),
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Action(err)
    }
}
