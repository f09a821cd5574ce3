//! Dispatch metadata and the response capability that records it.
//!
//! Responses that implement [`DispatchRecorder`] remember which controller
//! and action produced them. The values are purely observational; nothing in
//! the dispatch path reads them back.

/// Records which controller and action handled a request.
pub trait DispatchRecorder {
    /// Record the controller short name (e.g. `articles`).
    fn set_controller_name(&mut self, name: &str);

    /// Record the fully-qualified controller type name.
    fn set_controller_class(&mut self, class: &str);

    /// Record the action name.
    fn set_action_name(&mut self, action: &str);
}

/// The response capability surface probed by the dispatch layer.
///
/// Responses that don't record metadata keep the default.
pub trait DispatchResponse: Send + 'static {
    /// Capability probe for metadata recording.
    fn recorder(&mut self) -> Option<&mut dyn DispatchRecorder> {
        None
    }
}

impl DispatchResponse for () {}
impl DispatchResponse for String {}
impl<T: DispatchResponse> DispatchResponse for Box<T> {
    fn recorder(&mut self) -> Option<&mut dyn DispatchRecorder> {
        (**self).recorder()
    }
}

/// Which controller and action handled the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DispatchMetadata {
    controller_name: Option<String>,
    controller_class: Option<String>,
    action_name: Option<String>,
}

impl DispatchMetadata {
    /// Create metadata for a dispatch.
    pub fn new(
        controller_name: impl Into<String>,
        controller_class: impl Into<String>,
        action_name: impl Into<String>,
    ) -> Self {
        Self {
            controller_name: Some(controller_name.into()),
            controller_class: Some(controller_class.into()),
            action_name: Some(action_name.into()),
        }
    }

    /// The recorded controller short name.
    pub fn controller_name(&self) -> Option<&str> {
        self.controller_name.as_deref()
    }

    /// The recorded controller type name.
    pub fn controller_class(&self) -> Option<&str> {
        self.controller_class.as_deref()
    }

    /// The recorded action name.
    pub fn action_name(&self) -> Option<&str> {
        self.action_name.as_deref()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.controller_name.is_none()
            && self.controller_class.is_none()
            && self.action_name.is_none()
    }

    /// Copy every recorded value onto `recorder`.
    pub fn record_on(&self, recorder: &mut dyn DispatchRecorder) {
        if let Some(name) = &self.controller_name {
            recorder.set_controller_name(name);
        }
        if let Some(class) = &self.controller_class {
            recorder.set_controller_class(class);
        }
        if let Some(action) = &self.action_name {
            recorder.set_action_name(action);
        }
    }
}

impl DispatchRecorder for DispatchMetadata {
    fn set_controller_name(&mut self, name: &str) {
        self.controller_name = Some(name.to_owned());
    }

    fn set_controller_class(&mut self, class: &str) {
        self.controller_class = Some(class.to_owned());
    }

    fn set_action_name(&mut self, action: &str) {
        self.action_name = Some(action.to_owned());
    }
}

/// Where a dispatch is in its lifecycle.
///
/// `Constructed → ContextInjected → Initialized → Dispatched → Forwarded* → Complete`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DispatchState {
    /// The context exists but nothing has been injected.
    #[default]
    Constructed,
    /// Request and response have been handed out.
    ContextInjected,
    /// The init hook has run (or there was none).
    Initialized,
    /// The routed action is running.
    Dispatched,
    /// Control moved to another action of the same controller.
    Forwarded,
    /// The routed action returned successfully.
    Complete,
}

impl DispatchState {
    /// Whether an action is currently running, i.e. `forward` is allowed.
    pub const fn is_running(self) -> bool {
        matches!(self, DispatchState::Dispatched | DispatchState::Forwarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_records_onto_another_recorder() {
        let source = DispatchMetadata::new("articles", "app::ArticlesController", "index");
        let mut target = DispatchMetadata::default();
        assert!(target.is_empty());

        source.record_on(&mut target);
        assert_eq!(target, source);
    }

    #[test]
    fn test_action_name_overwrite() {
        let mut meta = DispatchMetadata::new("home", "app::HomeController", "a");
        meta.set_action_name("b");
        assert_eq!(meta.action_name(), Some("b"));
        assert_eq!(meta.controller_name(), Some("home"));
    }

    #[test]
    fn test_unit_response_exposes_no_recorder() {
        let mut unit = ();
        assert!(unit.recorder().is_none());
    }

    #[test]
    fn test_state_ordering() {
        assert!(DispatchState::Constructed < DispatchState::Dispatched);
        assert!(DispatchState::Dispatched.is_running());
        assert!(DispatchState::Forwarded.is_running());
        assert!(!DispatchState::Initialized.is_running());
        assert!(!DispatchState::Complete.is_running());
    }
}
