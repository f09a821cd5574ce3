//! Testing utilities for Switchyard.
//!
//! # Features
//!
//! - [`StatelessController`]: a controller with no capabilities at all
//! - [`PlainResponse`]: a response that does not record dispatch metadata
//! - [`RecordingRenderer`]: a view renderer that remembers what it rendered
//! - [`CallLog`]: a shared log for asserting on call order

use crate::app::{ViewRenderer, ViewVars};
use crate::http::Response;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use switchyard_core::{Controller, DispatchError, DispatchResponse};

// ============================================================================
// Stateless Controller
// ============================================================================

/// A controller that exposes none of the optional capabilities.
///
/// Request, response and output are all plain values; the controller is
/// recorded under the short name `stateless`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatelessController;

impl Controller for StatelessController {
    type App = ();
    type Request = ();
    type Response = ();
    type Output = String;

    fn create(_app: &Arc<()>) -> Self {
        Self
    }
}

// ============================================================================
// Plain Response
// ============================================================================

/// A response without a metadata recorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainResponse {
    /// The body written so far.
    pub body: String,
}

impl PlainResponse {
    /// An empty response.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DispatchResponse for PlainResponse {}

// ============================================================================
// Recording Renderer
// ============================================================================

/// A view renderer that writes `template: k=v, ...` into the body and
/// remembers every template it rendered.
///
/// # Example
///
/// ```rust,ignore
/// let renderer = RecordingRenderer::new();
/// let app = Application::new().with_renderer(renderer.clone());
///
/// // dispatch...
///
/// assert_eq!(renderer.rendered(), vec!["articles/show"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    rendered: CallLog,
}

impl RecordingRenderer {
    /// Create a renderer with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Templates rendered so far, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered.entries()
    }
}

impl ViewRenderer for RecordingRenderer {
    fn render(
        &self,
        response: Response,
        template: &str,
        vars: &ViewVars,
    ) -> Result<Response, DispatchError> {
        self.rendered.push(template);

        let vars: Vec<String> = vars.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let body = if vars.is_empty() {
            template.to_owned()
        } else {
            format!("{template}: {}", vars.join(", "))
        };
        Ok(response.with_body(body))
    }
}

// ============================================================================
// Call Log
// ============================================================================

/// A cloneable, thread-safe list of strings.
///
/// Clones share the same log, so one can be handed to the application and
/// the other kept by the test.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.lock().push(entry.into());
    }

    /// A copy of all entries.
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
